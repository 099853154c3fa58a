//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::age::AgeSummary;
use crate::domain::component::{Component, ComponentPage, Repository};
use crate::domain::sort::SortBy;
use crate::domain::summary::{GroupsSummary, RepositorySummary};
use crate::infrastructure::config::Config;
use crate::infrastructure::nexus::ServerSettings;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// Nexus REST API 연동 추상화 포트.
#[async_trait]
pub trait NexusGateway: Send + Sync {
    async fn list_repositories(&self) -> Result<Vec<Repository>>;
    async fn fetch_component_page(
        &self,
        repository: &str,
        continuation_token: Option<&str>,
    ) -> Result<ComponentPage>;
}

/// 접속 설정에 맞는 게이트웨이를 생성하는 팩토리 포트.
pub trait GatewayFactory: Send + Sync {
    fn build(&self, settings: &ServerSettings) -> Result<Box<dyn NexusGateway>>;
}

/// 리포트 섹션 출력 포트.
pub trait ReportWriter {
    fn write_repository_summary(&mut self, summary: &RepositorySummary, sort: SortBy)
    -> Result<()>;
    fn write_groups_summary(
        &mut self,
        summary: &GroupsSummary,
        sort: SortBy,
        top_groups: usize,
    ) -> Result<()>;
    fn write_age_summary(&mut self, summary: &AgeSummary) -> Result<()>;
    fn write_components(&mut self, components: &[Component]) -> Result<()>;
    /// 버퍼를 비우고 출력 대상을 마무리한다.
    fn finish(&mut self) -> Result<()>;
}

/// 출력 경로/콘솔에 맞는 writer를 생성하는 팩토리 포트.
pub trait WriterFactory: Send + Sync {
    fn for_path(&self, path: &str) -> Result<Box<dyn ReportWriter>>;
    fn console(&self) -> Box<dyn ReportWriter>;
}
