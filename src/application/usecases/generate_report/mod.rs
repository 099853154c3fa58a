//! 리포트 생성 전체 오케스트레이션 유스케이스.

mod collect;
mod context;
mod output;

use anyhow::Result;

use crate::application::ports::{ConfigRepository, GatewayFactory, WriterFactory};
use crate::domain::report::RunOptions;

use collect::collect_summaries;
use context::load_execution_context;
use output::write_reports;

/// 접속 설정 해석부터 API 순회, 리포트 출력까지 전체 흐름을 조율한다.
pub struct GenerateReportUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub gateway_factory: &'a dyn GatewayFactory,
    pub writer_factory: &'a dyn WriterFactory,
}

impl<'a> GenerateReportUseCase<'a> {
    pub async fn execute(&self, options: RunOptions) -> Result<()> {
        let ctx = load_execution_context(self, &options)?;
        let gateway = self.gateway_factory.build(&ctx.settings)?;
        let outcome = collect_summaries(gateway.as_ref(), &ctx).await?;
        write_reports(self, &ctx, outcome)
    }
}
