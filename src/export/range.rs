// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn bad(r: &str) -> AppError {
    AppError::InvalidRange(r.to_string())
}

/// First and last day covered by one endpoint: `YYYY`, `YYYY-MM` or
/// `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| bad(p))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad(p))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad(p))?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d").map_err(|_| bad(p))?;
            let (ny, nm) = if d1.month() == 12 {
                (d1.year() + 1, 1)
            } else {
                (d1.year(), d1.month() + 1)
            };
            let d2 = NaiveDate::from_ymd_opt(ny, nm, 1)
                .and_then(|d| d.pred_opt())
                .ok_or_else(|| bad(p))?;
            Ok((d1, d2))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| bad(p))?;
            Ok((d, d))
        }
        _ => Err(bad(p)),
    }
}

/// Parse `--range`.
///
/// Supports `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and `a:b` pairs of the same
/// shape. `all` (or nothing) means no bound.
pub fn parse_range(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();
    if r.is_empty() || r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let (from, to) = match r.split_once(':') {
        Some((start, end)) => {
            let (start, end) = (start.trim(), end.trim());
            if start.len() != end.len() {
                return Err(AppError::InvalidRange(format!(
                    "{r}: start and end must have the same format"
                )));
            }
            (period_bounds(start)?.0, period_bounds(end)?.1)
        }
        None => period_bounds(r)?,
    };

    if from > to {
        return Err(AppError::InvalidRange(format!("{r}: start after end")));
    }
    Ok(Some((from, to)))
}
