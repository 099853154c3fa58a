//! 요약 정렬 키.

use std::fmt;
use std::str::FromStr;

/// 리포지토리/그룹 요약 행 정렬 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Components,
    Size,
}

impl SortBy {
    /// 출력/진단용 코드값.
    pub fn code(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Components => "components",
            Self::Size => "size",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SortBy {
    type Err = String;

    /// 대소문자와 앞뒤 공백을 무시하고 정렬 키를 해석한다.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "components" => Ok(Self::Components),
            "size" => Ok(Self::Size),
            other => Err(format!(
                "invalid sort option: {other}. Valid options are: name, components, size"
            )),
        }
    }
}
