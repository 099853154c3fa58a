//! 리포트 실행 옵션과 섹션 선택 규칙.

use std::str::FromStr;

use crate::domain::sort::SortBy;

/// 생성할 리포트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    All,
    RepositoriesSummary,
    TopGroups,
    AgeReport,
}

impl ReportKind {
    pub fn includes_repositories(self) -> bool {
        matches!(self, Self::All | Self::RepositoriesSummary)
    }

    pub fn includes_groups(self) -> bool {
        matches!(self, Self::All | Self::TopGroups)
    }

    pub fn includes_age(self) -> bool {
        matches!(self, Self::All | Self::AgeReport)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::RepositoriesSummary => "repositories-summary",
            Self::TopGroups => "top-groups",
            Self::AgeReport => "age-report",
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "all" => Ok(Self::All),
            "repositories-summary" => Ok(Self::RepositoriesSummary),
            "top-groups" => Ok(Self::TopGroups),
            "age-report" => Ok(Self::AgeReport),
            other => Err(format!(
                "unknown report type: {other}. Valid reports are: all, repositories-summary, top-groups, age-report"
            )),
        }
    }
}

/// 서버 접속 관련 CLI 입력. 미지정 값은 설정 파일에서 보충된다.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 컴포넌트 필터 관련 CLI 입력(원문 그대로).
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub created_before: Option<String>,
    pub created_after: Option<String>,
    pub updated_before: Option<String>,
    pub updated_after: Option<String>,
    pub downloaded_before: Option<String>,
    pub downloaded_after: Option<String>,
    pub never_downloaded: bool,
    pub repositories: Vec<String>,
    pub groups: Vec<String>,
    pub names: Vec<String>,
}

/// 한 번의 리포트 실행을 기술하는 옵션 묶음.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub report: ReportKind,
    pub connection: ConnectionOptions,
    pub repo_sort: SortBy,
    pub group_sort: SortBy,
    pub top_groups: Option<usize>,
    pub age_buckets: Option<String>,
    pub filter: FilterOptions,
    pub output: Option<String>,
    pub output_components: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kind_parses_known_values() {
        assert_eq!("all".parse::<ReportKind>().unwrap(), ReportKind::All);
        assert_eq!(
            "repositories-summary".parse::<ReportKind>().unwrap(),
            ReportKind::RepositoriesSummary
        );
        assert_eq!("top-groups".parse::<ReportKind>().unwrap(), ReportKind::TopGroups);
        assert_eq!("age-report".parse::<ReportKind>().unwrap(), ReportKind::AgeReport);
    }

    #[test]
    fn report_kind_rejects_unknown_value() {
        let err = "everything".parse::<ReportKind>().unwrap_err();
        assert!(err.contains("unknown report type: everything"));
    }

    #[test]
    fn all_report_enables_every_section() {
        assert!(ReportKind::All.includes_repositories());
        assert!(ReportKind::All.includes_groups());
        assert!(ReportKind::All.includes_age());
    }

    #[test]
    fn single_section_reports_enable_only_their_section() {
        assert!(ReportKind::TopGroups.includes_groups());
        assert!(!ReportKind::TopGroups.includes_repositories());
        assert!(!ReportKind::TopGroups.includes_age());

        assert!(ReportKind::AgeReport.includes_age());
        assert!(!ReportKind::AgeReport.includes_groups());
    }
}
