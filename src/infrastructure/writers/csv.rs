//! CSV 리포트 writer.

use std::io::Write;

use anyhow::Result;

use crate::application::ports::ReportWriter;
use crate::domain::age::AgeSummary;
use crate::domain::component::Component;
use crate::domain::sort::SortBy;
use crate::domain::summary::{GroupsSummary, RepositorySummary};

pub struct CsvReportWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        let mut line = String::new();
        for (idx, field) in fields.iter().enumerate() {
            if idx > 0 {
                line.push(',');
            }
            line.push_str(&escape_field(field));
        }
        line.push('\n');
        self.out.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// 구분자/따옴표/줄바꿈을 포함한 필드만 따옴표로 감싼다.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl<W: Write> ReportWriter for CsvReportWriter<W> {
    fn write_repository_summary(
        &mut self,
        summary: &RepositorySummary,
        sort: SortBy,
    ) -> Result<()> {
        self.write_row(&["Repository", "Format", "Components", "Total Size"])?;
        for (name, stats) in summary.entries_sorted(sort) {
            self.write_row(&[
                name,
                &stats.format,
                &stats.component_count.to_string(),
                &stats.size_bytes.to_string(),
            ])?;
        }
        self.write_row(&[
            "TOTAL",
            "-",
            &summary.total_components().to_string(),
            &summary.total_size_bytes().to_string(),
        ])
    }

    fn write_groups_summary(
        &mut self,
        summary: &GroupsSummary,
        sort: SortBy,
        top_groups: usize,
    ) -> Result<()> {
        self.write_row(&["Group", "Components", "Total Size"])?;
        for (name, stats) in summary.entries_sorted(sort).into_iter().take(top_groups) {
            self.write_row(&[
                name,
                &stats.component_count.to_string(),
                &stats.size_bytes.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_age_summary(&mut self, summary: &AgeSummary) -> Result<()> {
        self.write_row(&["Age Range", "Components", "Total Size"])?;
        for bucket in summary.buckets() {
            self.write_row(&[
                bucket.range(),
                &bucket.component_count().to_string(),
                &bucket.size_bytes().to_string(),
            ])?;
        }
        self.write_row(&[
            "TOTAL",
            &summary.total_components().to_string(),
            &summary.total_size_bytes().to_string(),
        ])
    }

    fn write_components(&mut self, components: &[Component]) -> Result<()> {
        self.write_row(&["Repository", "Group", "Name", "Version", "Size"])?;
        for component in components {
            self.write_row(&[
                component.repository.as_deref().unwrap_or(""),
                component.group.as_deref().unwrap_or(""),
                component.name.as_deref().unwrap_or(""),
                component.version.as_deref().unwrap_or(""),
                &component.size_bytes().to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::Asset;

    fn rendered(write: impl FnOnce(&mut CsvReportWriter<&mut Vec<u8>>)) -> String {
        let mut buffer = Vec::new();
        let mut writer = CsvReportWriter::new(&mut buffer);
        write(&mut writer);
        writer.finish().unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn repository_summary_has_header_rows_and_total() {
        let mut summary = RepositorySummary::default();
        summary.add("test-repo", "maven2", 10, 1024);

        let output = rendered(|writer| {
            writer.write_repository_summary(&summary, SortBy::Name).unwrap();
        });

        assert_eq!(
            output,
            "Repository,Format,Components,Total Size\n\
             test-repo,maven2,10,1024\n\
             TOTAL,-,10,1024\n"
        );
    }

    #[test]
    fn repository_rows_follow_sort_key() {
        let mut summary = RepositorySummary::default();
        summary.add("small", "maven2", 1, 10);
        summary.add("big", "npm", 50, 999);

        let output = rendered(|writer| {
            writer
                .write_repository_summary(&summary, SortBy::Components)
                .unwrap();
        });

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[1].starts_with("big,"));
        assert!(lines[2].starts_with("small,"));
    }

    #[test]
    fn groups_are_truncated_after_sorting() {
        let mut summary = GroupsSummary::default();
        summary.add("org.minor", 1, 10);
        summary.add("org.major", 90, 10);
        summary.add("org.middle", 10, 10);

        let output = rendered(|writer| {
            writer
                .write_groups_summary(&summary, SortBy::Components, 2)
                .unwrap();
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("org.major,90"));
        assert!(lines[2].starts_with("org.middle,10"));
    }

    #[test]
    fn age_summary_lists_buckets_in_configured_order() {
        let summary = AgeSummary::from_spec("0-7,>7").unwrap();

        let output = rendered(|writer| {
            writer.write_age_summary(&summary).unwrap();
        });

        assert_eq!(
            output,
            "Age Range,Components,Total Size\n0-7,0,0\n>7,0,0\nTOTAL,0,0\n"
        );
    }

    #[test]
    fn component_rows_use_raw_byte_sizes_and_empty_for_missing_fields() {
        let component = Component {
            repository: Some("test-repo".to_string()),
            group: Some("test-group".to_string()),
            name: Some("test-name".to_string()),
            version: Some("1.0".to_string()),
            assets: vec![Asset {
                file_size: Some(2048),
                ..Asset::default()
            }],
            ..Component::default()
        };
        let bare = Component::default();

        let output = rendered(|writer| {
            writer.write_components(&[component, bare]).unwrap();
        });

        assert_eq!(
            output,
            "Repository,Group,Name,Version,Size\n\
             test-repo,test-group,test-name,1.0,2048\n\
             ,,,,0\n"
        );
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        let mut summary = GroupsSummary::default();
        summary.add("weird,group \"x\"", 1, 2);

        let output = rendered(|writer| {
            writer.write_groups_summary(&summary, SortBy::Name, 10).unwrap();
        });

        assert!(output.contains("\"weird,group \"\"x\"\"\",1,2"));
    }
}
