//! Nexus REST 응답 DTO. 클라이언트 경계에서 도메인 타입으로 변환한다.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::component::{Asset, Component, ComponentPage, Repository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RepositoryXo {
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub url: Option<String>,
}

impl RepositoryXo {
    pub(super) fn into_domain(self) -> Repository {
        Repository {
            name: self.name,
            format: self.format,
            kind: self.kind,
            url: self.url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComponentPageXo {
    #[serde(default)]
    pub items: Vec<ComponentXo>,
    pub continuation_token: Option<String>,
}

impl ComponentPageXo {
    pub(super) fn into_domain(self) -> ComponentPage {
        ComponentPage {
            items: self.items.into_iter().map(ComponentXo::into_domain).collect(),
            continuation_token: self.continuation_token,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComponentXo {
    pub id: Option<String>,
    pub repository: Option<String>,
    pub format: Option<String>,
    pub group: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub assets: Vec<AssetXo>,
}

impl ComponentXo {
    fn into_domain(self) -> Component {
        Component {
            id: self.id,
            repository: self.repository,
            format: self.format,
            group: self.group,
            name: self.name,
            version: self.version,
            assets: self.assets.into_iter().map(AssetXo::into_domain).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AssetXo {
    pub id: Option<String>,
    pub path: Option<String>,
    pub content_type: Option<String>,
    pub file_size: Option<u64>,
    pub blob_created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_downloaded: Option<DateTime<Utc>>,
    pub download_count: Option<u64>,
}

impl AssetXo {
    fn into_domain(self) -> Asset {
        Asset {
            id: self.id,
            path: self.path,
            content_type: self.content_type,
            file_size: self.file_size,
            blob_created: self.blob_created,
            last_modified: self.last_modified,
            last_downloaded: self.last_downloaded,
            download_count: self.download_count,
        }
    }
}
