//! 컴포넌트 필터 구성과 판정.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};

use crate::domain::component::Component;
use crate::domain::dates::{parse_date_filter, validate_date_range};
use crate::domain::report::FilterOptions;

/// 날짜/패턴 조건을 합친 컴포넌트 필터.
/// 패턴 종류 사이는 AND, 같은 종류의 패턴끼리는 OR로 판정한다.
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    created_before: Option<DateTime<Utc>>,
    created_after: Option<DateTime<Utc>>,
    updated_before: Option<DateTime<Utc>>,
    updated_after: Option<DateTime<Utc>>,
    downloaded_before: Option<DateTime<Utc>>,
    downloaded_after: Option<DateTime<Utc>>,
    never_downloaded: bool,
    repositories: Vec<String>,
    groups: Vec<String>,
    names: Vec<String>,
}

impl ComponentFilter {
    /// 원문 옵션을 해석하고 범위/충돌을 검증한다.
    pub fn from_options(options: &FilterOptions, now: DateTime<Utc>) -> Result<Self> {
        let created_before = parse_date_filter(options.created_before.as_deref(), now)?;
        let created_after = parse_date_filter(options.created_after.as_deref(), now)?;
        let updated_before = parse_date_filter(options.updated_before.as_deref(), now)?;
        let updated_after = parse_date_filter(options.updated_after.as_deref(), now)?;
        let downloaded_before = parse_date_filter(options.downloaded_before.as_deref(), now)?;
        let downloaded_after = parse_date_filter(options.downloaded_after.as_deref(), now)?;

        validate_date_range(created_before, created_after, "created")?;
        validate_date_range(updated_before, updated_after, "updated")?;
        validate_date_range(downloaded_before, downloaded_after, "downloaded")?;

        if options.never_downloaded && (downloaded_before.is_some() || downloaded_after.is_some()) {
            bail!(
                "cannot combine --never-downloaded with --downloaded-before or --downloaded-after filters"
            );
        }

        Ok(Self {
            created_before,
            created_after,
            updated_before,
            updated_after,
            downloaded_before,
            downloaded_after,
            never_downloaded: options.never_downloaded,
            repositories: options.repositories.clone(),
            groups: options.groups.clone(),
            names: options.names.clone(),
        })
    }

    /// 리포지토리 단위 선별. 패턴이 없으면 전부 통과한다.
    /// 매칭되지 않는 리포지토리는 페이지네이션 자체를 건너뛴다.
    pub fn matches_repository(&self, name: &str) -> bool {
        self.repositories.is_empty() || matches_any_pattern(Some(name), &self.repositories)
    }

    /// 에셋이 없는 컴포넌트는 어떤 조건에도 매칭되지 않는다.
    pub fn matches(&self, component: &Component) -> bool {
        if component.assets.is_empty() {
            return false;
        }

        if !self.matches_component_fields(component) {
            return false;
        }

        if self.never_downloaded
            && component.assets.iter().any(|asset| asset.last_downloaded.is_some())
        {
            return false;
        }

        // 날짜 조건은 한 에셋이 세 범주를 동시에 만족해야 성립한다.
        component.assets.iter().any(|asset| {
            matches_window(asset.blob_created, self.created_before, self.created_after)
                && matches_window(asset.last_modified, self.updated_before, self.updated_after)
                && matches_window(
                    asset.last_downloaded,
                    self.downloaded_before,
                    self.downloaded_after,
                )
        })
    }

    fn matches_component_fields(&self, component: &Component) -> bool {
        if !self.repositories.is_empty()
            && !matches_any_pattern(component.repository.as_deref(), &self.repositories)
        {
            return false;
        }
        if !self.groups.is_empty() && !matches_any_pattern(component.group.as_deref(), &self.groups)
        {
            return false;
        }
        if !self.names.is_empty() && !matches_any_pattern(component.name.as_deref(), &self.names) {
            return false;
        }
        true
    }
}

/// 필터가 걸려 있을 때 값이 없는 에셋은 매칭되지 않는다.
/// before는 미만, after는 초과로 판정한다.
fn matches_window(
    value: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
    after: Option<DateTime<Utc>>,
) -> bool {
    if before.is_none() && after.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    if let Some(before) = before
        && value >= before
    {
        return false;
    }
    if let Some(after) = after
        && value <= after
    {
        return false;
    }
    true
}

fn matches_any_pattern(value: Option<&str>, patterns: &[String]) -> bool {
    let Some(value) = value else {
        return false;
    };
    if value.is_empty() {
        return false;
    }
    patterns.iter().any(|pattern| wildcard_match(value, pattern))
}

/// `*`(임의 길이)와 `?`(한 글자) 와일드카드 매칭. 나머지 문자는 리터럴이다.
pub fn wildcard_match(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let mut vi = 0;
    let mut pi = 0;
    // 마지막 `*` 위치와 그 시점의 값 위치. 불일치 시 여기로 되돌아간다.
    let mut backtrack: Option<(usize, usize)> = None;

    while vi < value.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == value[vi]) {
            vi += 1;
            pi += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            backtrack = Some((pi + 1, vi));
            pi += 1;
        } else if let Some((star_pi, star_vi)) = backtrack {
            pi = star_pi;
            vi = star_vi + 1;
            backtrack = Some((star_pi, star_vi + 1));
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }
    pi == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::Asset;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn component(repository: &str, group: Option<&str>, name: &str, assets: Vec<Asset>) -> Component {
        Component {
            repository: Some(repository.to_string()),
            group: group.map(ToString::to_string),
            name: Some(name.to_string()),
            assets,
            ..Component::default()
        }
    }

    fn plain_asset() -> Asset {
        Asset {
            file_size: Some(10),
            ..Asset::default()
        }
    }

    #[test]
    fn wildcard_matches_literals_and_classes() {
        assert!(wildcard_match("maven-central", "maven-central"));
        assert!(wildcard_match("maven-central", "maven-*"));
        assert!(wildcard_match("maven-central", "*central"));
        assert!(wildcard_match("maven-central", "maven?central"));
        assert!(wildcard_match("org.example.core", "org.*.core"));
        assert!(!wildcard_match("maven-central", "npm-*"));
        assert!(!wildcard_match("ab", "a?c"));
    }

    #[test]
    fn wildcard_treats_regex_metacharacters_literally() {
        assert!(wildcard_match("a.b", "a.b"));
        assert!(!wildcard_match("axb", "a.b"));
        assert!(wildcard_match("a+b[1]", "a+b[1]"));
    }

    #[test]
    fn wildcard_star_spans_empty_and_multiple_segments() {
        assert!(wildcard_match("core", "*core*"));
        assert!(wildcard_match("org.example.sub.core", "org.*core"));
        assert!(!wildcard_match("x", ""));
        assert!(wildcard_match("anything", "*"));
    }

    #[test]
    fn component_without_assets_never_matches() {
        let filter = ComponentFilter::from_options(&FilterOptions::default(), now()).unwrap();
        assert!(!filter.matches(&component("repo", None, "lib", vec![])));
    }

    #[test]
    fn pattern_kinds_combine_with_and() {
        let options = FilterOptions {
            repositories: vec!["maven-*".to_string()],
            groups: vec!["org.example*".to_string()],
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();

        assert!(filter.matches(&component(
            "maven-central",
            Some("org.example.core"),
            "lib",
            vec![plain_asset()]
        )));
        assert!(!filter.matches(&component(
            "npm-proxy",
            Some("org.example.core"),
            "lib",
            vec![plain_asset()]
        )));
        assert!(!filter.matches(&component(
            "maven-central",
            Some("com.other"),
            "lib",
            vec![plain_asset()]
        )));
        // group 필터가 걸려 있으면 group 없는 컴포넌트는 탈락한다.
        assert!(!filter.matches(&component("maven-central", None, "lib", vec![plain_asset()])));
    }

    #[test]
    fn patterns_of_same_kind_combine_with_or() {
        let options = FilterOptions {
            names: vec!["core".to_string(), "util*".to_string()],
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();

        assert!(filter.matches(&component("r", None, "core", vec![plain_asset()])));
        assert!(filter.matches(&component("r", None, "utilities", vec![plain_asset()])));
        assert!(!filter.matches(&component("r", None, "api", vec![plain_asset()])));
    }

    #[test]
    fn never_downloaded_rejects_any_downloaded_asset() {
        let options = FilterOptions {
            never_downloaded: true,
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();

        let fresh = component("r", None, "lib", vec![plain_asset(), plain_asset()]);
        assert!(filter.matches(&fresh));

        let downloaded = component(
            "r",
            None,
            "lib",
            vec![
                plain_asset(),
                Asset {
                    last_downloaded: Some(date(2024, 1, 1)),
                    ..Asset::default()
                },
            ],
        );
        assert!(!filter.matches(&downloaded));
    }

    #[test]
    fn date_window_requires_single_asset_to_satisfy_all_categories() {
        let options = FilterOptions {
            created_after: Some("2024-01-01".to_string()),
            updated_after: Some("2024-03-01".to_string()),
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();

        // 한 에셋이 생성 조건만, 다른 에셋이 수정 조건만 만족하면 탈락한다.
        let split = component(
            "r",
            None,
            "lib",
            vec![
                Asset {
                    blob_created: Some(date(2024, 2, 1)),
                    last_modified: Some(date(2024, 2, 1)),
                    ..Asset::default()
                },
                Asset {
                    blob_created: Some(date(2023, 1, 1)),
                    last_modified: Some(date(2024, 4, 1)),
                    ..Asset::default()
                },
            ],
        );
        assert!(!filter.matches(&split));

        let satisfied = component(
            "r",
            None,
            "lib",
            vec![Asset {
                blob_created: Some(date(2024, 2, 1)),
                last_modified: Some(date(2024, 4, 1)),
                ..Asset::default()
            }],
        );
        assert!(filter.matches(&satisfied));
    }

    #[test]
    fn asset_missing_a_filtered_date_fails_that_category() {
        let options = FilterOptions {
            created_before: Some("2024-06-01".to_string()),
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();

        let undated = component("r", None, "lib", vec![plain_asset()]);
        assert!(!filter.matches(&undated));
    }

    #[test]
    fn before_and_after_bounds_are_strict() {
        let options = FilterOptions {
            created_before: Some("2024-06-01".to_string()),
            created_after: Some("2024-01-01".to_string()),
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();

        let on_before_bound = component(
            "r",
            None,
            "lib",
            vec![Asset {
                blob_created: Some(date(2024, 6, 1)),
                ..Asset::default()
            }],
        );
        assert!(!filter.matches(&on_before_bound));

        let on_after_bound = component(
            "r",
            None,
            "lib",
            vec![Asset {
                blob_created: Some(date(2024, 1, 1)),
                ..Asset::default()
            }],
        );
        assert!(!filter.matches(&on_after_bound));

        let inside = component(
            "r",
            None,
            "lib",
            vec![Asset {
                blob_created: Some(date(2024, 3, 1)),
                ..Asset::default()
            }],
        );
        assert!(filter.matches(&inside));
    }

    #[test]
    fn never_downloaded_conflicts_with_download_window() {
        let options = FilterOptions {
            never_downloaded: true,
            downloaded_before: Some("30d".to_string()),
            ..FilterOptions::default()
        };
        let err = ComponentFilter::from_options(&options, now()).unwrap_err();
        assert!(err.to_string().contains("cannot combine --never-downloaded"));
    }

    #[test]
    fn repository_prefilter_passes_everything_without_patterns() {
        let filter = ComponentFilter::from_options(&FilterOptions::default(), now()).unwrap();
        assert!(filter.matches_repository("anything"));

        let options = FilterOptions {
            repositories: vec!["maven-*".to_string()],
            ..FilterOptions::default()
        };
        let filter = ComponentFilter::from_options(&options, now()).unwrap();
        assert!(filter.matches_repository("maven-central"));
        assert!(!filter.matches_repository("npm-proxy"));
    }
}
