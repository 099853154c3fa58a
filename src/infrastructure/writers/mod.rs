//! 리포트 writer 구현(콘솔/CSV/JSON).

mod console;
mod csv;
mod json;

pub use console::ConsoleReportWriter;
pub use csv::CsvReportWriter;
pub use json::JsonReportWriter;

use anyhow::{Result, bail};

/// 출력 파일 형식. 경로 확장자로 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Csv,
    Json,
}

impl OutputTarget {
    pub fn from_path(path: &str) -> Result<Self> {
        if path.ends_with(".csv") {
            return Ok(Self::Csv);
        }
        if path.ends_with(".json") {
            return Ok(Self::Json);
        }
        bail!("unsupported file format: {path} (expected a .csv or .json path)")
    }
}

/// 바이트 수를 사람이 읽기 쉬운 문자열로 바꾼다. 1024 미만은 그대로 표기한다.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_extension_selects_format() {
        assert_eq!(OutputTarget::from_path("report.csv").unwrap(), OutputTarget::Csv);
        assert_eq!(OutputTarget::from_path("report.json").unwrap(), OutputTarget::Json);
        assert!(OutputTarget::from_path("report.txt").is_err());
        assert!(OutputTarget::from_path("report").is_err());
    }

    #[test]
    fn small_sizes_stay_in_raw_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn larger_sizes_scale_with_two_decimals() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(3_221_225_472), "3.00 GB");
    }

    #[test]
    fn sizes_cap_at_terabytes() {
        let two_petabytes = 2_u64 * 1024 * 1024 * 1024 * 1024 * 1024;
        assert_eq!(format_size(two_petabytes), "2048.00 TB");
    }
}
