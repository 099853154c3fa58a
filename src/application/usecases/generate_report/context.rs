//! 실행 컨텍스트(접속/필터/섹션) 구성 단계.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::age::{AgeSummary, DEFAULT_AGE_BUCKETS};
use crate::domain::filter::ComponentFilter;
use crate::domain::report::{ReportKind, RunOptions};
use crate::domain::sort::SortBy;
use crate::infrastructure::config::Config;
use crate::infrastructure::nexus::{Auth, ServerSettings};
use crate::infrastructure::proxy::select_proxy;
use crate::infrastructure::writers::OutputTarget;

use super::GenerateReportUseCase;

pub(super) const DEFAULT_TOP_GROUPS: usize = 10;
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 한 번의 실행에 필요한 해석 완료 상태.
pub(super) struct ExecutionContext {
    pub settings: ServerSettings,
    pub kind: ReportKind,
    pub filter: ComponentFilter,
    /// 버킷 명세가 해석된 빈 연령 집계. 리포지토리 단위 집계의 원본이 된다.
    pub age_template: AgeSummary,
    pub repo_sort: SortBy,
    pub group_sort: SortBy,
    pub top_groups: usize,
    pub output: Option<String>,
    pub output_components: Option<String>,
    pub collect_components: bool,
    pub now: DateTime<Utc>,
}

pub(super) fn load_execution_context(
    use_case: &GenerateReportUseCase<'_>,
    options: &RunOptions,
) -> Result<ExecutionContext> {
    let config = use_case.config_repo.load()?;
    let now = Utc::now();

    let settings = resolve_server_settings(&config, options)?;
    info!(url = %settings.base_url, report = options.report.code(), "initializing report generation");

    let filter = ComponentFilter::from_options(&options.filter, now)?;

    let bucket_spec = options
        .age_buckets
        .clone()
        .or_else(|| config.defaults.age_buckets.clone())
        .unwrap_or_else(|| DEFAULT_AGE_BUCKETS.to_string());
    let age_template = AgeSummary::from_spec(&bucket_spec)?;

    let top_groups = options
        .top_groups
        .or(config.defaults.top_groups)
        .unwrap_or(DEFAULT_TOP_GROUPS);

    // 출력 경로 형식은 네트워크 작업 전에 검증한다.
    if let Some(path) = &options.output {
        OutputTarget::from_path(path)?;
    }
    if let Some(path) = &options.output_components {
        OutputTarget::from_path(path)?;
    }

    Ok(ExecutionContext {
        settings,
        kind: options.report,
        filter,
        age_template,
        repo_sort: options.repo_sort,
        group_sort: options.group_sort,
        top_groups,
        output: options.output.clone(),
        output_components: options.output_components.clone(),
        collect_components: options.output_components.is_some(),
        now,
    })
}

/// CLI 입력과 설정 파일을 합쳐 접속 설정을 확정한다.
/// 우선순위: CLI 플래그/기본 환경 변수 → 설정 파일.
fn resolve_server_settings(config: &Config, options: &RunOptions) -> Result<ServerSettings> {
    let connection = &options.connection;

    let Some(base_url) = connection.url.clone().or_else(|| config.defaults.url.clone()) else {
        bail!("Nexus server URL is required (--url, NEXUS_URL, or defaults.url in a config file)");
    };
    let base_url = base_url.trim_end_matches('/').to_string();

    let token = connection
        .token
        .clone()
        .or_else(|| config.server.token())
        .filter(|token| !token.is_empty());
    let username = connection.username.clone().or_else(|| config.server.username());
    let password = connection.password.clone().or_else(|| config.server.password());

    let auth = if let Some(token) = token {
        Auth::Token(token)
    } else if let (Some(username), Some(password)) = (username, password) {
        Auth::Basic { username, password }
    } else {
        Auth::Anonymous
    };

    let proxy_argument = connection.proxy.as_deref().or(config.proxy.url.as_deref());
    let proxy = select_proxy(&base_url, proxy_argument)?;

    let timeout_secs = connection
        .timeout_secs
        .or(config.defaults.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(ServerSettings {
        base_url,
        auth,
        proxy,
        timeout_secs,
    })
}
