use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse an optional `--date` flag; `today` is accepted as a shortcut.
pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match input {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("today") => Ok(Some(today())),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}

/// Like `parse_optional_date` but falls back to today.
pub fn date_or_today(input: Option<&String>) -> AppResult<NaiveDate> {
    Ok(parse_optional_date(input)?.unwrap_or_else(today))
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Short weekday label used in headers, e.g. `2024-11-21 (Thu)`.
pub fn with_weekday(d: &NaiveDate) -> String {
    format!("{} ({})", format_date(d), d.format("%a"))
}
