//! 날짜 필터 문자열 해석.

use anyhow::{Result, bail};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// ISO-8601(`2024-06-01`, `2024-06-01T00:00:00Z`) 또는 `Nd`(N일 전)를 해석한다.
/// 빈 입력은 필터 미지정으로 본다.
pub fn parse_date_filter(raw: Option<&str>, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some(days) = parse_days_ago(trimmed) {
        return Ok(Some(now - Duration::days(days)));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    // 날짜만 주어지면 UTC 자정으로 맞춘다.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        && let Some(start_of_day) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(Some(start_of_day.and_utc()));
    }

    bail!(
        "invalid date format: '{trimmed}'. Expected ISO-8601 format \
         (e.g. '2024-06-01' or '2024-06-01T00:00:00Z') or 'Nd' format (e.g. '30d')"
    )
}

fn parse_days_ago(raw: &str) -> Option<i64> {
    let digits = raw.strip_suffix('d')?;
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// before가 after보다 이르면 매칭 가능한 구간이 없으므로 오류로 처리한다.
pub fn validate_date_range(
    before: Option<DateTime<Utc>>,
    after: Option<DateTime<Utc>>,
    filter_kind: &str,
) -> Result<()> {
    if let (Some(before), Some(after)) = (before, after)
        && before < after
    {
        bail!(
            "invalid {filter_kind} filter: 'before' date ({before}) cannot be earlier than 'after' date ({after})"
        );
    }
    Ok(())
}
