//! 리포지토리 순회/페이지네이션/집계 단계.

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{debug, trace};

use crate::application::ports::NexusGateway;
use crate::domain::age::AgeSummary;
use crate::domain::component::{Component, Repository};
use crate::domain::summary::{GroupsSummary, RepositorySummary};

use super::context::ExecutionContext;

/// 동시에 순회하는 리포지토리 수 상한.
const REPOSITORY_CONCURRENCY: usize = 4;

/// 전체 순회가 끝난 뒤의 집계 묶음.
pub(super) struct CollectOutcome {
    pub repositories: RepositorySummary,
    pub groups: GroupsSummary,
    pub ages: AgeSummary,
    pub components: Vec<Component>,
}

/// 리포지토리 하나를 끝까지 순회한 부분 집계.
struct RepoAggregate {
    name: String,
    format: String,
    component_count: u64,
    size_bytes: u64,
    groups: GroupsSummary,
    ages: AgeSummary,
    components: Vec<Component>,
}

pub(super) async fn collect_summaries(
    gateway: &dyn NexusGateway,
    ctx: &ExecutionContext,
) -> Result<CollectOutcome> {
    let repositories = gateway.list_repositories().await?;
    debug!(count = repositories.len(), "fetched repository list");

    let selected: Vec<Repository> = repositories
        .into_iter()
        .filter(|repo| {
            if repo.is_group() {
                trace!(repository = %repo.name, "skipping group repository");
                return false;
            }
            if !ctx.filter.matches_repository(&repo.name) {
                trace!(repository = %repo.name, "repository excluded by pattern");
                return false;
            }
            true
        })
        .collect();

    let aggregates = stream::iter(selected)
        .map(|repo| async move { collect_repository(gateway, repo, ctx).await })
        .buffer_unordered(REPOSITORY_CONCURRENCY)
        .collect::<Vec<_>>()
        .await;

    let mut outcome = CollectOutcome {
        repositories: RepositorySummary::default(),
        groups: GroupsSummary::default(),
        ages: ctx.age_template.clone(),
        components: Vec::new(),
    };

    for aggregate in aggregates {
        let aggregate = aggregate?;
        if aggregate.component_count > 0 {
            outcome.repositories.add(
                &aggregate.name,
                &aggregate.format,
                aggregate.component_count,
                aggregate.size_bytes,
            );
        }
        outcome.groups.merge(&aggregate.groups);
        outcome.ages.merge(&aggregate.ages);
        outcome.components.extend(aggregate.components);
    }

    // 완료 순서와 무관하게 컴포넌트 출력 순서를 고정한다.
    outcome.components.sort_by(|a, b| {
        (&a.repository, &a.group, &a.name, &a.version).cmp(&(
            &b.repository,
            &b.group,
            &b.name,
            &b.version,
        ))
    });

    Ok(outcome)
}

async fn collect_repository(
    gateway: &dyn NexusGateway,
    repo: Repository,
    ctx: &ExecutionContext,
) -> Result<RepoAggregate> {
    let mut aggregate = RepoAggregate {
        name: repo.name.clone(),
        format: repo.format.clone(),
        component_count: 0,
        size_bytes: 0,
        groups: GroupsSummary::default(),
        ages: ctx.age_template.clone(),
        components: Vec::new(),
    };

    let mut continuation: Option<String> = None;
    loop {
        trace!(
            repository = %repo.name,
            token = continuation.as_deref().unwrap_or("-"),
            "fetching component page"
        );
        let page = gateway
            .fetch_component_page(&repo.name, continuation.as_deref())
            .await?;
        let fetched = page.items.len();

        for component in page.items {
            if !ctx.filter.matches(&component) {
                continue;
            }

            let size = component.size_bytes();
            aggregate.component_count += 1;
            aggregate.size_bytes += size;

            if ctx.kind.includes_groups()
                && let Some(group) = component.group.as_deref()
            {
                aggregate.groups.add(group, 1, size);
            }
            if ctx.kind.includes_age() {
                aggregate.ages.add_component(&component, size, ctx.now);
            }
            if ctx.collect_components {
                aggregate.components.push(component);
            }
        }

        debug!(
            repository = %repo.name,
            fetched,
            matched = aggregate.component_count,
            "processed component page"
        );

        match page.continuation_token.filter(|token| !token.is_empty()) {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    Ok(aggregate)
}
