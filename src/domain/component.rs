//! 컴포넌트/에셋/리포지토리 엔티티.

use chrono::{DateTime, Utc};

/// Nexus 리포지토리 메타데이터.
#[derive(Debug, Clone)]
pub struct Repository {
    pub name: String,
    pub format: String,
    /// hosted / proxy / group.
    pub kind: String,
    pub url: Option<String>,
}

impl Repository {
    /// group 타입은 멤버 리포지토리 내용을 다시 노출하므로 집계 대상이 아니다.
    pub fn is_group(&self) -> bool {
        self.kind.eq_ignore_ascii_case("group")
    }
}

/// 버전 단위 아티팩트. 하나 이상의 에셋(파일)을 가진다.
#[derive(Debug, Clone, Default)]
pub struct Component {
    pub id: Option<String>,
    pub repository: Option<String>,
    pub format: Option<String>,
    pub group: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub assets: Vec<Asset>,
}

impl Component {
    /// 에셋 fileSize 합계. 크기를 알 수 없는 에셋은 0으로 센다.
    pub fn size_bytes(&self) -> u64 {
        self.assets.iter().filter_map(|asset| asset.file_size).sum()
    }

    /// 전체 에셋 중 가장 이른 blobCreated. 날짜가 전혀 없으면 None.
    pub fn earliest_created(&self) -> Option<DateTime<Utc>> {
        self.assets.iter().filter_map(|asset| asset.blob_created).min()
    }
}

/// 저장된 파일 하나와 그 blob 메타데이터.
#[derive(Debug, Clone, Default)]
pub struct Asset {
    pub id: Option<String>,
    pub path: Option<String>,
    pub content_type: Option<String>,
    pub file_size: Option<u64>,
    pub blob_created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_downloaded: Option<DateTime<Utc>>,
    pub download_count: Option<u64>,
}

/// 컴포넌트 목록 한 페이지. 토큰이 없으면 마지막 페이지다.
#[derive(Debug, Clone)]
pub struct ComponentPage {
    pub items: Vec<Component>,
    pub continuation_token: Option<String>,
}
