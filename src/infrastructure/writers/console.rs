//! 콘솔 리포트 writer. 열 너비를 내용에 맞춰 정렬한다.

use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::application::ports::ReportWriter;
use crate::domain::age::AgeSummary;
use crate::domain::component::Component;
use crate::domain::sort::SortBy;
use crate::domain::summary::{GroupsSummary, RepositorySummary};

use super::format_size;

const SECTION_RULE: &str =
    "======================================================================";

pub struct ConsoleReportWriter<W: Write> {
    out: W,
    has_output: bool,
}

impl<W: Write> ConsoleReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            has_output: false,
        }
    }

    /// 섹션 사이에는 빈 줄 하나를 둔다.
    fn begin_section(&mut self, title: &str) -> Result<()> {
        if self.has_output {
            writeln!(self.out)?;
        }
        self.has_output = true;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{SECTION_RULE}")?;
        Ok(())
    }

    /// 헤더/구분선/행/합계를 공통 너비로 출력한다.
    /// `numeric_from` 이후의 열은 오른쪽 정렬한다.
    fn write_table(
        &mut self,
        headers: &[&str],
        rows: &[Vec<String>],
        total: Option<Vec<String>>,
        numeric_from: usize,
    ) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|header| header.width()).collect();
        for row in rows.iter().chain(total.as_ref().into_iter()) {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.width());
            }
        }

        let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
        writeln!(self.out, "{}", render_cells(&header_cells, &widths, numeric_from))?;

        let rules: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(self.out, "{}", render_cells(&rules, &widths, numeric_from))?;

        for row in rows {
            writeln!(self.out, "{}", render_cells(row, &widths, numeric_from))?;
        }

        if let Some(total) = total {
            writeln!(self.out)?;
            writeln!(self.out, "{}", render_cells(&total, &widths, numeric_from))?;
        }

        Ok(())
    }
}

fn render_cells(cells: &[String], widths: &[usize], numeric_from: usize) -> String {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        let pad = " ".repeat(widths[idx].saturating_sub(cell.width()));
        if idx >= numeric_from {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&pad);
        }
    }
    line.trim_end().to_string()
}

impl<W: Write> ReportWriter for ConsoleReportWriter<W> {
    fn write_repository_summary(
        &mut self,
        summary: &RepositorySummary,
        sort: SortBy,
    ) -> Result<()> {
        self.begin_section("Repository Report Summary:")?;

        let rows: Vec<Vec<String>> = summary
            .entries_sorted(sort)
            .into_iter()
            .map(|(name, stats)| {
                vec![
                    name.to_string(),
                    stats.format.clone(),
                    stats.component_count.to_string(),
                    format_size(stats.size_bytes),
                ]
            })
            .collect();
        let total = vec![
            "TOTAL".to_string(),
            "-".to_string(),
            summary.total_components().to_string(),
            format_size(summary.total_size_bytes()),
        ];

        self.write_table(
            &["Repository", "Format", "Components", "Total Size"],
            &rows,
            Some(total),
            2,
        )
    }

    fn write_groups_summary(
        &mut self,
        summary: &GroupsSummary,
        sort: SortBy,
        top_groups: usize,
    ) -> Result<()> {
        self.begin_section(&format!("Top {top_groups} Groups by {sort}:"))?;

        let rows: Vec<Vec<String>> = summary
            .entries_sorted(sort)
            .into_iter()
            .take(top_groups)
            .map(|(name, stats)| {
                vec![
                    name.to_string(),
                    stats.component_count.to_string(),
                    format_size(stats.size_bytes),
                ]
            })
            .collect();
        // 합계는 상위 N개 밖의 그룹까지 포함한다.
        let total = vec![
            "TOTAL".to_string(),
            summary.total_components().to_string(),
            format_size(summary.total_size_bytes()),
        ];

        self.write_table(&["Group", "Components", "Total Size"], &rows, Some(total), 1)
    }

    fn write_age_summary(&mut self, summary: &AgeSummary) -> Result<()> {
        self.begin_section("Component Age Report:")?;

        let rows: Vec<Vec<String>> = summary
            .buckets()
            .iter()
            .map(|bucket| {
                vec![
                    bucket.label(),
                    bucket.component_count().to_string(),
                    format_size(bucket.size_bytes()),
                ]
            })
            .collect();
        let total = vec![
            "TOTAL".to_string(),
            summary.total_components().to_string(),
            format_size(summary.total_size_bytes()),
        ];

        self.write_table(&["Age Range", "Components", "Total Size"], &rows, Some(total), 1)
    }

    fn write_components(&mut self, components: &[Component]) -> Result<()> {
        self.begin_section("Components:")?;

        let rows: Vec<Vec<String>> = components
            .iter()
            .map(|component| {
                vec![
                    component.repository.clone().unwrap_or_default(),
                    component.group.clone().unwrap_or_default(),
                    component.name.clone().unwrap_or_default(),
                    component.version.clone().unwrap_or_default(),
                    format_size(component.size_bytes()),
                ]
            })
            .collect();

        self.write_table(
            &["Repository", "Group", "Name", "Version", "Size"],
            &rows,
            None,
            4,
        )
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
