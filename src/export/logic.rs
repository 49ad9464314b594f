// src/export/logic.rs

use crate::core::filter::ViewKind;
use crate::db::events::{load_events, load_events_between};
use crate::db::log::write_log_quiet;
use crate::db::pool::DbPool;
use crate::db::visits::{load_visits, load_visits_between};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EventExport, VisitExport};
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use serde::Serialize;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export events (those overlapping the range) or visits (visit day in
    /// the range) to `file`, which must be an absolute path.
    ///
    /// Returns the number of exported rows.
    pub fn export(
        pool: &mut DbPool,
        view: ViewKind,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            Some(r) => parse_range(r)?,
            None => None,
        };

        ensure_writable(path, force)?;

        let written = match view {
            ViewKind::Events => {
                let events = match bounds {
                    Some((from, to)) => load_events_between(&pool.conn, &from, &to)?,
                    None => load_events(&pool.conn)?,
                };
                let rows: Vec<EventExport> = events.iter().map(EventExport::from).collect();
                write_rows(&rows, format, path)?
            }
            ViewKind::Visits => {
                let visits = match bounds {
                    Some((from, to)) => load_visits_between(&pool.conn, &from, &to)?,
                    None => load_visits(&pool.conn, None)?,
                };
                let rows: Vec<VisitExport> = visits.iter().map(VisitExport::from).collect();
                write_rows(&rows, format, path)?
            }
        };

        if written > 0 {
            write_log_quiet(
                &pool.conn,
                "export",
                &path.to_string_lossy(),
                &format!("{} rows as {}", written, format.as_str()),
            );
        }

        Ok(written)
    }
}

fn write_rows<T: Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No rows found for the selected range.");
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }
    Ok(rows.len())
}
