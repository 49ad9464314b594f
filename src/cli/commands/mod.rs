//! One handler per top-level command. Each takes the parsed command and
//! the loaded configuration.

pub mod backup;
pub mod bridge;
pub mod config;
pub mod db;
pub mod event;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod map;
pub mod mv;
pub mod timeline;
pub mod visit;

use crate::cli::parser::FilterArgs;
use crate::config::Config;
use crate::core::filter::FilterState;
use crate::core::timeline::zoom::ZoomLevel;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_optional_date;
use std::time::Duration;

pub(crate) fn filter_state(args: &FilterArgs) -> AppResult<FilterState> {
    FilterState::from_args(
        parse_optional_date(args.date.as_ref())?,
        args.category.as_deref(),
        args.district.as_deref(),
        args.unscheduled,
    )
}

/// `--zoom` when given, else the configured default.
pub(crate) fn resolve_zoom(raw: Option<&str>, cfg: &Config) -> AppResult<ZoomLevel> {
    match raw {
        Some(r) => ZoomLevel::parse(r),
        None => ZoomLevel::from_minutes(cfg.default_zoom)
            .ok_or_else(|| AppError::InvalidZoom(cfg.default_zoom.to_string())),
    }
}

pub(crate) fn expand_delay(cfg: &Config) -> Duration {
    Duration::from_millis(cfg.expand_delay_ms)
}

/// Empty input clears an optional text field.
pub(crate) fn set_text(field: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *field = v.clone();
    }
}
