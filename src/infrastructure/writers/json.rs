//! JSON 리포트 writer.
//! 섹션을 모아 하나의 문서로 만들고 finish에서 직렬화한다.

use std::io::Write;

use anyhow::Result;
use serde_json::{Map, Value, json};

use crate::application::ports::ReportWriter;
use crate::domain::age::AgeSummary;
use crate::domain::component::{Asset, Component};
use crate::domain::sort::SortBy;
use crate::domain::summary::{GroupsSummary, RepositorySummary};

pub struct JsonReportWriter<W: Write> {
    out: W,
    document: Map<String, Value>,
    components: Option<Value>,
}

impl<W: Write> JsonReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            document: Map::new(),
            components: None,
        }
    }
}

impl<W: Write> ReportWriter for JsonReportWriter<W> {
    fn write_repository_summary(
        &mut self,
        summary: &RepositorySummary,
        sort: SortBy,
    ) -> Result<()> {
        let mut stats = Map::new();
        for (name, entry) in summary.entries_sorted(sort) {
            stats.insert(
                name.to_string(),
                json!({
                    "format": entry.format,
                    "componentCount": entry.component_count,
                    "sizeBytes": entry.size_bytes,
                }),
            );
        }

        self.document.insert(
            "repositories".to_string(),
            json!({
                "repositoryStats": stats,
                "totalComponents": summary.total_components(),
                "totalSizeBytes": summary.total_size_bytes(),
            }),
        );
        Ok(())
    }

    fn write_groups_summary(
        &mut self,
        summary: &GroupsSummary,
        sort: SortBy,
        top_groups: usize,
    ) -> Result<()> {
        let mut stats = Map::new();
        for (name, entry) in summary.entries_sorted(sort).into_iter().take(top_groups) {
            stats.insert(
                name.to_string(),
                json!({
                    "componentCount": entry.component_count,
                    "sizeBytes": entry.size_bytes,
                }),
            );
        }

        self.document.insert(
            "groups".to_string(),
            json!({
                "groupStats": stats,
                "totalComponents": summary.total_components(),
                "totalSizeBytes": summary.total_size_bytes(),
            }),
        );
        Ok(())
    }

    fn write_age_summary(&mut self, summary: &AgeSummary) -> Result<()> {
        let buckets: Vec<Value> = summary
            .buckets()
            .iter()
            .map(|bucket| {
                json!({
                    "range": bucket.range(),
                    "minDays": bucket.min_days(),
                    "maxDays": bucket.max_days(),
                    "componentCount": bucket.component_count(),
                    "sizeBytes": bucket.size_bytes(),
                })
            })
            .collect();

        self.document.insert(
            "ages".to_string(),
            json!({
                "buckets": buckets,
                "totalComponents": summary.total_components(),
                "totalSizeBytes": summary.total_size_bytes(),
            }),
        );
        Ok(())
    }

    fn write_components(&mut self, components: &[Component]) -> Result<()> {
        let values: Vec<Value> = components.iter().map(component_value).collect();
        self.components = Some(Value::Array(values));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // 컴포넌트 전용 출력은 배열 문서, 그 외에는 섹션 객체 문서가 된다.
        let value = match self.components.take() {
            Some(components) if self.document.is_empty() => components,
            Some(components) => {
                self.document.insert("components".to_string(), components);
                Value::Object(std::mem::take(&mut self.document))
            }
            None => Value::Object(std::mem::take(&mut self.document)),
        };

        serde_json::to_writer_pretty(&mut self.out, &value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

fn component_value(component: &Component) -> Value {
    json!({
        "id": component.id,
        "repository": component.repository,
        "format": component.format,
        "group": component.group,
        "name": component.name,
        "version": component.version,
        "sizeBytes": component.size_bytes(),
        "assets": component.assets.iter().map(asset_value).collect::<Vec<_>>(),
    })
}

fn asset_value(asset: &Asset) -> Value {
    json!({
        "id": asset.id,
        "path": asset.path,
        "contentType": asset.content_type,
        "fileSize": asset.file_size,
        "blobCreated": asset.blob_created.map(|date| date.to_rfc3339()),
        "lastModified": asset.last_modified.map(|date| date.to_rfc3339()),
        "lastDownloaded": asset.last_downloaded.map(|date| date.to_rfc3339()),
        "downloadCount": asset.download_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn rendered(write: impl FnOnce(&mut JsonReportWriter<&mut Vec<u8>>)) -> Value {
        let mut buffer = Vec::new();
        let mut writer = JsonReportWriter::new(&mut buffer);
        write(&mut writer);
        writer.finish().unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn summary_sections_land_in_one_document() {
        let mut repositories = RepositorySummary::default();
        repositories.add("test-repo", "maven2", 10, 1024);
        let mut groups = GroupsSummary::default();
        groups.add("org.example", 4, 256);
        let ages = AgeSummary::from_spec("0-7,>7").unwrap();

        let value = rendered(|writer| {
            writer
                .write_repository_summary(&repositories, SortBy::Components)
                .unwrap();
            writer.write_groups_summary(&groups, SortBy::Components, 10).unwrap();
            writer.write_age_summary(&ages).unwrap();
        });

        assert_eq!(
            value["repositories"]["repositoryStats"]["test-repo"]["componentCount"],
            10
        );
        assert_eq!(value["repositories"]["totalSizeBytes"], 1024);
        assert_eq!(value["groups"]["groupStats"]["org.example"]["sizeBytes"], 256);
        assert_eq!(value["ages"]["buckets"][0]["range"], "0-7");
        assert_eq!(value["ages"]["buckets"][1]["maxDays"], Value::Null);
    }

    #[test]
    fn group_document_respects_top_limit() {
        let mut groups = GroupsSummary::default();
        groups.add("org.major", 100, 1);
        groups.add("org.minor", 1, 1);

        let value = rendered(|writer| {
            writer.write_groups_summary(&groups, SortBy::Components, 1).unwrap();
        });

        let stats = value["groups"]["groupStats"].as_object().unwrap();
        assert_eq!(stats.len(), 1);
        assert!(stats.contains_key("org.major"));
        // 합계는 잘려나간 그룹까지 포함한다.
        assert_eq!(value["groups"]["totalComponents"], 101);
    }

    #[test]
    fn component_only_output_is_a_bare_array() {
        let component = Component {
            repository: Some("test-repo".to_string()),
            group: Some("test-group".to_string()),
            name: Some("test-name".to_string()),
            version: Some("1.0".to_string()),
            assets: vec![Asset {
                file_size: Some(100),
                blob_created: Some(Utc.with_ymd_and_hms(2023, 11, 1, 12, 0, 0).unwrap()),
                ..Asset::default()
            }],
            ..Component::default()
        };

        let value = rendered(|writer| {
            writer.write_components(&[component]).unwrap();
        });

        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["repository"], "test-repo");
        assert_eq!(entries[0]["sizeBytes"], 100);
        assert_eq!(entries[0]["assets"][0]["fileSize"], 100);
        assert!(
            entries[0]["assets"][0]["blobCreated"]
                .as_str()
                .unwrap()
                .starts_with("2023-11-01T12:00:00")
        );
        assert_eq!(entries[0]["assets"][0]["lastDownloaded"], Value::Null);
    }

    #[test]
    fn empty_run_produces_empty_object() {
        let value = rendered(|_| {});
        assert_eq!(value, json!({}));
    }
}
