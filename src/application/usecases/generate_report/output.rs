//! 집계 결과를 writer로 내보내는 단계.

use anyhow::Result;

use crate::application::ports::ReportWriter;

use super::GenerateReportUseCase;
use super::collect::CollectOutcome;
use super::context::ExecutionContext;

pub(super) fn write_reports(
    use_case: &GenerateReportUseCase<'_>,
    ctx: &ExecutionContext,
    outcome: CollectOutcome,
) -> Result<()> {
    let mut writer: Box<dyn ReportWriter> = match &ctx.output {
        Some(path) => use_case.writer_factory.for_path(path)?,
        None => use_case.writer_factory.console(),
    };

    if ctx.kind.includes_repositories() {
        writer.write_repository_summary(&outcome.repositories, ctx.repo_sort)?;
    }
    if ctx.kind.includes_groups() {
        writer.write_groups_summary(&outcome.groups, ctx.group_sort, ctx.top_groups)?;
    }
    if ctx.kind.includes_age() {
        writer.write_age_summary(&outcome.ages)?;
    }
    writer.finish()?;

    if let Some(path) = &ctx.output_components {
        let mut component_writer = use_case.writer_factory.for_path(path)?;
        component_writer.write_components(&outcome.components)?;
        component_writer.finish()?;
    }

    Ok(())
}
