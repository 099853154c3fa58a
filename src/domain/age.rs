//! 연령 버킷 해석과 연령별 집계.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};

use crate::domain::component::Component;

/// 연령 리포트 기본 버킷 명세.
pub const DEFAULT_AGE_BUCKETS: &str = "0-7,8-30,31-90,91-365,>365";

/// 일 단위 연령 구간 하나와 그 구간의 누적치.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBucket {
    range: String,
    min_days: i64,
    max_days: Option<i64>,
    component_count: u64,
    size_bytes: u64,
}

impl AgeBucket {
    /// `min-max`(양끝 포함) 또는 `>n`(n+1일 이상) 형식을 해석한다.
    pub fn parse(raw: &str) -> Result<Self> {
        let range = raw.trim().to_string();

        if let Some(rest) = range.strip_prefix('>') {
            let Some(min) = parse_days(rest) else {
                bail!(
                    "invalid age bucket format: {range}. Expected formats: '0-7', '8-30', or '>365'"
                );
            };
            return Ok(Self {
                range,
                min_days: min + 1,
                max_days: None,
                component_count: 0,
                size_bytes: 0,
            });
        }

        if let Some((low, high)) = range.split_once('-')
            && let (Some(min), Some(max)) = (parse_days(low), parse_days(high))
        {
            if min > max {
                bail!(
                    "invalid age bucket range: {range} (min days cannot be greater than max days)"
                );
            }
            return Ok(Self {
                range,
                min_days: min,
                max_days: Some(max),
                component_count: 0,
                size_bytes: 0,
            });
        }

        bail!("invalid age bucket format: {range}. Expected formats: '0-7', '8-30', or '>365'")
    }

    pub fn contains(&self, days: i64) -> bool {
        days >= self.min_days && self.max_days.map_or(true, |max| days <= max)
    }

    /// 원본 구간 문자열(`0-7`, `>365`).
    pub fn range(&self) -> &str {
        &self.range
    }

    /// 출력용 라벨(`0-7 days`).
    pub fn label(&self) -> String {
        format!("{} days", self.range)
    }

    pub fn min_days(&self) -> i64 {
        self.min_days
    }

    pub fn max_days(&self) -> Option<i64> {
        self.max_days
    }

    pub fn component_count(&self) -> u64 {
        self.component_count
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    fn add(&mut self, component_count: u64, size_bytes: u64) {
        self.component_count += component_count;
        self.size_bytes += size_bytes;
    }
}

fn parse_days(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// 구성된 버킷 순서대로 컴포넌트를 분류하는 연령 집계.
#[derive(Debug, Clone)]
pub struct AgeSummary {
    buckets: Vec<AgeBucket>,
    total_components: u64,
    total_size_bytes: u64,
}

impl AgeSummary {
    /// 쉼표로 구분된 버킷 명세를 해석한다.
    pub fn from_spec(spec: &str) -> Result<Self> {
        let mut buckets = Vec::new();
        for part in spec.split(',') {
            buckets.push(AgeBucket::parse(part)?);
        }
        if buckets.is_empty() {
            bail!("age bucket ranges cannot be empty");
        }
        Ok(Self {
            buckets,
            total_components: 0,
            total_size_bytes: 0,
        })
    }

    /// 가장 이른 blobCreated 기준 연령으로 첫 번째 일치 버킷에 가산한다.
    /// 생성일이 전혀 없는 컴포넌트와 모든 버킷을 벗어난 연령은 집계하지 않는다.
    pub fn add_component(&mut self, component: &Component, size_bytes: u64, now: DateTime<Utc>) {
        let Some(created) = component.earliest_created() else {
            return;
        };
        let age_days = (now - created).num_days();

        for bucket in &mut self.buckets {
            if bucket.contains(age_days) {
                bucket.add(1, size_bytes);
                self.total_components += 1;
                self.total_size_bytes += size_bytes;
                return;
            }
        }
    }

    /// 같은 명세로 만들어진 다른 집계를 버킷 단위로 합친다.
    pub fn merge(&mut self, other: &AgeSummary) {
        for (bucket, source) in self.buckets.iter_mut().zip(&other.buckets) {
            bucket.add(source.component_count, source.size_bytes);
        }
        self.total_components += other.total_components;
        self.total_size_bytes += other.total_size_bytes;
    }

    pub fn buckets(&self) -> &[AgeBucket] {
        &self.buckets
    }

    pub fn total_components(&self) -> u64 {
        self.total_components
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.total_size_bytes
    }
}
