//! CLI 명령 파싱 모듈.

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::domain::age::AgeSummary;
use crate::domain::filter::ComponentFilter;
use crate::domain::report::{ConnectionOptions, FilterOptions, ReportKind, RunOptions};
use crate::domain::sort::SortBy;
use crate::infrastructure::proxy::parse_proxy_url;
use crate::infrastructure::writers::OutputTarget;

#[derive(Debug, Parser)]
#[command(name = "nxrm-report")]
#[command(about = "Component reports for a Nexus Repository Manager instance")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Report type: all, repositories-summary, top-groups, age-report
    #[arg(value_name = "REPORT", default_value = "all")]
    report: ReportKind,

    /// Nexus Repository Manager URL
    #[arg(long, env = "NEXUS_URL")]
    url: Option<String>,

    /// Nexus Repository Manager username
    #[arg(long, env = "NEXUS_USERNAME")]
    username: Option<String>,

    /// Nexus Repository Manager password
    #[arg(long, env = "NEXUS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Nexus Repository Manager token (takes precedence over username/password)
    #[arg(long, env = "NEXUS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Proxy server URL (e.g. proxy.example.com:8081 or http://proxy.example.com:8081)
    #[arg(long)]
    proxy: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Sort repositories by: name, components, size (default: components)
    #[arg(long, value_name = "KEY", default_value = "components")]
    repo_sort: SortBy,

    /// Show only the top N groups (default: 10)
    #[arg(long, value_name = "N")]
    top_groups: Option<usize>,

    /// Sort groups by: name, components, size (default: components)
    #[arg(long, value_name = "KEY", default_value = "components")]
    group_sort: SortBy,

    /// Age bucket ranges for the age report (default: '0-7,8-30,31-90,91-365,>365')
    #[arg(long, value_name = "SPEC")]
    age_buckets: Option<String>,

    /// Filter components created before this date (ISO-8601 or 'Nd' for N days ago)
    #[arg(long, value_name = "DATE")]
    created_before: Option<String>,

    /// Filter components created after this date (ISO-8601 or 'Nd' for N days ago)
    #[arg(long, value_name = "DATE")]
    created_after: Option<String>,

    /// Filter components updated before this date (ISO-8601 or 'Nd' for N days ago)
    #[arg(long, value_name = "DATE")]
    updated_before: Option<String>,

    /// Filter components updated after this date (ISO-8601 or 'Nd' for N days ago)
    #[arg(long, value_name = "DATE")]
    updated_after: Option<String>,

    /// Filter components downloaded before this date (ISO-8601 or 'Nd' for N days ago)
    #[arg(long, value_name = "DATE")]
    downloaded_before: Option<String>,

    /// Filter components downloaded after this date (ISO-8601 or 'Nd' for N days ago)
    #[arg(long, value_name = "DATE")]
    downloaded_after: Option<String>,

    /// Only include components that have never been downloaded
    #[arg(long)]
    never_downloaded: bool,

    /// Filter components by repository name (wildcards *, ?; repeatable, OR logic)
    #[arg(long = "repository", value_name = "PATTERN")]
    repositories: Vec<String>,

    /// Filter components by group (wildcards *, ?; repeatable, OR logic)
    #[arg(long = "group", value_name = "PATTERN")]
    groups: Vec<String>,

    /// Filter components by name (wildcards *, ?; repeatable, OR logic)
    #[arg(long = "name", value_name = "PATTERN")]
    names: Vec<String>,

    /// Write the summary report to this file (.csv or .json)
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Write the filtered component list to this file (.csv or .json)
    #[arg(long, value_name = "PATH")]
    output_components: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged configuration
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    InspectConfig,
    Generate(RunOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    fn into_action(self) -> Result<CliAction, String> {
        if let Some(Commands::Config) = self.command {
            return Ok(CliAction::InspectConfig);
        }

        let options = RunOptions {
            report: self.report,
            connection: ConnectionOptions {
                url: self.url,
                username: self.username,
                password: self.password,
                token: self.token,
                proxy: self.proxy,
                timeout_secs: self.timeout_secs,
            },
            repo_sort: self.repo_sort,
            group_sort: self.group_sort,
            top_groups: self.top_groups,
            age_buckets: self.age_buckets,
            filter: FilterOptions {
                created_before: self.created_before,
                created_after: self.created_after,
                updated_before: self.updated_before,
                updated_after: self.updated_after,
                downloaded_before: self.downloaded_before,
                downloaded_after: self.downloaded_after,
                never_downloaded: self.never_downloaded,
                repositories: self.repositories,
                groups: self.groups,
                names: self.names,
            },
            output: self.output,
            output_components: self.output_components,
        };

        validate(&options)?;
        Ok(CliAction::Generate(options))
    }
}

/// 날짜/버킷/프록시/출력 형식 오류를 네트워크 작업 전에 사용법 오류로 보고한다.
fn validate(options: &RunOptions) -> Result<(), String> {
    ComponentFilter::from_options(&options.filter, Utc::now())
        .map_err(|err| err.to_string())?;

    if let Some(raw) = &options.connection.proxy
        && parse_proxy_url(raw).is_none()
    {
        return Err(format!("invalid proxy URL: {raw}"));
    }

    if let Some(spec) = &options.age_buckets {
        AgeSummary::from_spec(spec).map_err(|err| err.to_string())?;
    }

    for path in [&options.output, &options.output_components]
        .into_iter()
        .flatten()
    {
        OutputTarget::from_path(path).map_err(|err| err.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_from(args: &[&str]) -> Result<CliAction, String> {
        Cli::try_parse_from(args)
            .map_err(|err| err.to_string())?
            .into_action()
    }

    fn options_from(args: &[&str]) -> RunOptions {
        match action_from(args).unwrap() {
            CliAction::Generate(options) => options,
            CliAction::InspectConfig => panic!("expected a report action"),
        }
    }

    #[test]
    fn defaults_to_the_all_report() {
        let options = options_from(&["nxrm-report"]);
        assert_eq!(options.report, ReportKind::All);
        assert_eq!(options.repo_sort, SortBy::Components);
        assert_eq!(options.group_sort, SortBy::Components);
        assert_eq!(options.top_groups, None);
    }

    #[test]
    fn parses_report_selector_and_flags() {
        let options = options_from(&[
            "nxrm-report",
            "top-groups",
            "--url",
            "http://nexus.local:8081",
            "--group-sort",
            "size",
            "--top-groups",
            "5",
            "--repository",
            "maven-*",
            "--repository",
            "npm-*",
        ]);

        assert_eq!(options.report, ReportKind::TopGroups);
        assert_eq!(options.connection.url.as_deref(), Some("http://nexus.local:8081"));
        assert_eq!(options.group_sort, SortBy::Size);
        assert_eq!(options.top_groups, Some(5));
        assert_eq!(options.filter.repositories, vec!["maven-*", "npm-*"]);
    }

    #[test]
    fn config_subcommand_maps_to_inspection() {
        assert!(matches!(
            action_from(&["nxrm-report", "config"]).unwrap(),
            CliAction::InspectConfig
        ));
    }

    #[test]
    fn unknown_report_kind_is_rejected_at_parse_time() {
        let err = action_from(&["nxrm-report", "everything"]).unwrap_err();
        assert!(err.contains("unknown report type"), "error: {err}");
    }

    #[test]
    fn invalid_date_filter_is_a_usage_error() {
        let err = action_from(&["nxrm-report", "--created-before", "yesterday"]).unwrap_err();
        assert!(err.contains("invalid date format"), "error: {err}");
    }

    #[test]
    fn conflicting_download_filters_are_a_usage_error() {
        let err = action_from(&[
            "nxrm-report",
            "--never-downloaded",
            "--downloaded-after",
            "30d",
        ])
        .unwrap_err();
        assert!(err.contains("cannot combine --never-downloaded"), "error: {err}");
    }

    #[test]
    fn malformed_age_buckets_are_a_usage_error() {
        let err = action_from(&["nxrm-report", "--age-buckets", "7-0"]).unwrap_err();
        assert!(err.contains("invalid age bucket range"), "error: {err}");
    }

    #[test]
    fn unparsable_proxy_is_a_usage_error() {
        let err = action_from(&["nxrm-report", "--proxy", "proxyhost"]).unwrap_err();
        assert!(err.contains("invalid proxy URL"), "error: {err}");
    }

    #[test]
    fn unsupported_output_extension_is_a_usage_error() {
        let err = action_from(&["nxrm-report", "--output", "report.xml"]).unwrap_err();
        assert!(err.contains("unsupported file format"), "error: {err}");
    }
}
