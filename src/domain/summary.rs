//! 리포지토리/그룹 단위 집계 모델.

use std::collections::BTreeMap;

use crate::domain::sort::SortBy;

/// 리포지토리 하나의 누적치.
#[derive(Debug, Clone)]
pub struct RepositoryStats {
    pub format: String,
    pub component_count: u64,
    pub size_bytes: u64,
}

/// 리포지토리별 컴포넌트 수/용량 집계.
#[derive(Debug, Clone, Default)]
pub struct RepositorySummary {
    stats: BTreeMap<String, RepositoryStats>,
    total_components: u64,
    total_size_bytes: u64,
}

impl RepositorySummary {
    pub fn add(&mut self, repository: &str, format: &str, component_count: u64, size_bytes: u64) {
        let entry = self
            .stats
            .entry(repository.to_string())
            .or_insert_with(|| RepositoryStats {
                format: format.to_string(),
                component_count: 0,
                size_bytes: 0,
            });
        entry.component_count += component_count;
        entry.size_bytes += size_bytes;

        self.total_components += component_count;
        self.total_size_bytes += size_bytes;
    }

    pub fn stats(&self) -> &BTreeMap<String, RepositoryStats> {
        &self.stats
    }

    pub fn total_components(&self) -> u64 {
        self.total_components
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total_size_bytes
    }

    /// 정렬 키에 따른 행 순서. name은 오름차순, components/size는 내림차순.
    pub fn entries_sorted(&self, sort: SortBy) -> Vec<(&str, &RepositoryStats)> {
        let mut rows: Vec<_> = self.stats.iter().map(|(name, s)| (name.as_str(), s)).collect();
        match sort {
            SortBy::Name => rows.sort_by_key(|(name, _)| name.to_lowercase()),
            SortBy::Components => rows.sort_by(|a, b| {
                b.1.component_count
                    .cmp(&a.1.component_count)
                    .then_with(|| a.0.cmp(b.0))
            }),
            SortBy::Size => rows.sort_by(|a, b| {
                b.1.size_bytes.cmp(&a.1.size_bytes).then_with(|| a.0.cmp(b.0))
            }),
        }
        rows
    }
}

/// 그룹(Maven groupId, npm scope 등) 하나의 누적치.
#[derive(Debug, Clone, Default)]
pub struct GroupStats {
    pub component_count: u64,
    pub size_bytes: u64,
}

/// 그룹별 컴포넌트 수/용량 집계.
#[derive(Debug, Clone, Default)]
pub struct GroupsSummary {
    stats: BTreeMap<String, GroupStats>,
    total_components: u64,
    total_size_bytes: u64,
}

impl GroupsSummary {
    pub fn add(&mut self, group: &str, component_count: u64, size_bytes: u64) {
        let entry = self.stats.entry(group.to_string()).or_default();
        entry.component_count += component_count;
        entry.size_bytes += size_bytes;

        self.total_components += component_count;
        self.total_size_bytes += size_bytes;
    }

    /// 부분 집계를 전체 집계에 합친다.
    pub fn merge(&mut self, other: &GroupsSummary) {
        for (group, stats) in &other.stats {
            self.add(group, stats.component_count, stats.size_bytes);
        }
    }

    pub fn stats(&self) -> &BTreeMap<String, GroupStats> {
        &self.stats
    }

    pub fn total_components(&self) -> u64 {
        self.total_components
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total_size_bytes
    }

    pub fn entries_sorted(&self, sort: SortBy) -> Vec<(&str, &GroupStats)> {
        let mut rows: Vec<_> = self.stats.iter().map(|(name, s)| (name.as_str(), s)).collect();
        match sort {
            SortBy::Name => rows.sort_by_key(|(name, _)| name.to_lowercase()),
            SortBy::Components => rows.sort_by(|a, b| {
                b.1.component_count
                    .cmp(&a.1.component_count)
                    .then_with(|| a.0.cmp(b.0))
            }),
            SortBy::Size => rows.sort_by(|a, b| {
                b.1.size_bytes.cmp(&a.1.size_bytes).then_with(|| a.0.cmp(b.0))
            }),
        }
        rows
    }
}
