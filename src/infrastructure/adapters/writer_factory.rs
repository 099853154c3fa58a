//! 출력 대상에 맞는 writer를 고르는 팩토리 어댑터.

use std::fs::File;
use std::io::{BufWriter, stdout};

use anyhow::{Context, Result};

use crate::application::ports::{ReportWriter, WriterFactory};
use crate::infrastructure::writers::{
    ConsoleReportWriter, CsvReportWriter, JsonReportWriter, OutputTarget,
};

pub struct FileWriterFactory;

impl WriterFactory for FileWriterFactory {
    fn for_path(&self, path: &str) -> Result<Box<dyn ReportWriter>> {
        let target = OutputTarget::from_path(path)?;
        let file = File::create(path)
            .with_context(|| format!("failed to create report file {path}"))?;

        Ok(match target {
            OutputTarget::Csv => Box::new(CsvReportWriter::new(BufWriter::new(file))),
            OutputTarget::Json => Box::new(JsonReportWriter::new(BufWriter::new(file))),
        })
    }

    fn console(&self) -> Box<dyn ReportWriter> {
        Box::new(ConsoleReportWriter::new(stdout()))
    }
}
