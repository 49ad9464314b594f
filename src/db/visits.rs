use crate::db::events::{conversion_err, load_event, map_event_prefixed};
use crate::errors::{AppError, AppResult};
use crate::models::visit::{Visit, VisitRecord};
use crate::utils::time::{format_db_ts, parse_timestamp};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Visits with the joined event columns aliased as `e_*`.
const VISIT_SELECT: &str = r#"
    SELECT v.id, v.event_id, v.visit_time, v.visit_order, v.is_reserved,
           v.reservation_time, v.is_important, v.reservation_url, v.reference_url,
           v.notes, v.created_at, v.version,
           e.id AS e_id, e.name AS e_name, e.description AS e_description,
           e.start_date AS e_start_date, e.end_date AS e_end_date,
           e.open_time AS e_open_time, e.close_time AS e_close_time,
           e.address AS e_address, e.road_address AS e_road_address,
           e.jibun_address AS e_jibun_address, e.lat AS e_lat, e.lng AS e_lng,
           e.need_reservation AS e_need_reservation, e.category AS e_category,
           e.district AS e_district, e.url AS e_url, e.content AS e_content,
           e.created_at AS e_created_at
    FROM visits v
    LEFT JOIN events e ON e.id = v.event_id
"#;

pub(crate) fn parse_ts_col(raw: Option<String>) -> Result<Option<NaiveDateTime>> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| conversion_err(0, AppError::InvalidTime(s))),
    }
}

pub fn map_row(row: &Row) -> Result<Visit> {
    // LEFT JOIN: a deleted event leaves e_id NULL
    let joined_id: Option<i64> = row.get("e_id")?;
    let event = match joined_id {
        Some(_) => Some(map_event_prefixed(row, "e_")?),
        None => None,
    };

    Ok(Visit {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        visit_time: parse_ts_col(row.get("visit_time")?)?,
        visit_order: row.get("visit_order")?,
        is_reserved: row.get::<_, i32>("is_reserved")? == 1,
        reservation_time: parse_ts_col(row.get("reservation_time")?)?,
        is_important: row.get::<_, i32>("is_important")? == 1,
        reservation_url: row.get("reservation_url")?,
        reference_url: row.get("reference_url")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        version: row.get("version")?,
        event,
    })
}

fn collect(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<Visit>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All visits ordered by `visit_order`, optionally restricted to one event.
pub fn load_visits(conn: &Connection, event_id: Option<i64>) -> AppResult<Vec<Visit>> {
    match event_id {
        Some(id) => collect(
            conn,
            &format!("{VISIT_SELECT} WHERE v.event_id = ?1 ORDER BY v.visit_order ASC, v.id ASC"),
            &[&id],
        ),
        None => collect(
            conn,
            &format!("{VISIT_SELECT} ORDER BY v.visit_order ASC, v.id ASC"),
            &[],
        ),
    }
}

/// Visits scheduled on `date` (local day, half-open), ordered by time.
pub fn load_visits_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Visit>> {
    let (from, to) = day_bounds(date);
    collect(
        conn,
        &format!(
            "{VISIT_SELECT} WHERE v.visit_time >= ?1 AND v.visit_time < ?2
             ORDER BY v.visit_time ASC, v.id ASC"
        ),
        &[&from, &to],
    )
}

/// Visits whose visit day falls in `[from, to]`.
pub fn load_visits_between(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Visit>> {
    let (lo, _) = day_bounds(from);
    let (_, hi) = day_bounds(to);
    collect(
        conn,
        &format!(
            "{VISIT_SELECT} WHERE v.visit_time >= ?1 AND v.visit_time < ?2
             ORDER BY v.visit_time ASC, v.id ASC"
        ),
        &[&lo, &hi],
    )
}

pub(crate) fn day_bounds(date: &NaiveDate) -> (String, String) {
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = start + Duration::days(1);
    (format_db_ts(&start), format_db_ts(&end))
}

pub fn load_visit(conn: &Connection, id: i64) -> AppResult<Option<Visit>> {
    let mut stmt = conn.prepare(&format!("{VISIT_SELECT} WHERE v.id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

fn ensure_event_exists(conn: &Connection, event_id: i64) -> AppResult<()> {
    if load_event(conn, event_id)?.is_none() {
        return Err(AppError::NotFound(format!("Event #{event_id}")));
    }
    Ok(())
}

pub fn insert_visit(conn: &Connection, rec: &VisitRecord) -> AppResult<Visit> {
    ensure_event_exists(conn, rec.event_id)?;

    conn.execute(
        "INSERT INTO visits (event_id, visit_time, visit_order, is_reserved, reservation_time,
                             is_important, reservation_url, reference_url, notes, created_at, version)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1)",
        params![
            rec.event_id,
            rec.visit_time.as_ref().map(format_db_ts),
            rec.visit_order,
            if rec.is_reserved { 1 } else { 0 },
            rec.reservation_time.as_ref().map(format_db_ts),
            if rec.is_important { 1 } else { 0 },
            rec.reservation_url,
            rec.reference_url,
            rec.notes,
            chrono::Local::now().to_rfc3339(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    load_visit(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Visit #{id}")))
}

/// Full update. Bumps the row version.
pub fn update_visit(conn: &Connection, id: i64, rec: &VisitRecord) -> AppResult<Visit> {
    ensure_event_exists(conn, rec.event_id)?;

    let changed = conn.execute(
        "UPDATE visits
         SET event_id = ?1, visit_time = ?2, visit_order = ?3, is_reserved = ?4,
             reservation_time = ?5, is_important = ?6, reservation_url = ?7,
             reference_url = ?8, notes = ?9, version = version + 1
         WHERE id = ?10",
        params![
            rec.event_id,
            rec.visit_time.as_ref().map(format_db_ts),
            rec.visit_order,
            if rec.is_reserved { 1 } else { 0 },
            rec.reservation_time.as_ref().map(format_db_ts),
            if rec.is_important { 1 } else { 0 },
            rec.reservation_url,
            rec.reference_url,
            rec.notes,
            id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Visit #{id}")));
    }

    load_visit(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Visit #{id}")))
}

/// Compare-and-swap on the visit time: the update only lands when the row
/// still carries `expected_version`.
pub fn update_visit_time(
    conn: &Connection,
    id: i64,
    time: &NaiveDateTime,
    expected_version: i64,
) -> AppResult<Visit> {
    let changed = conn.execute(
        "UPDATE visits SET visit_time = ?1, version = version + 1
         WHERE id = ?2 AND version = ?3",
        params![format_db_ts(time), id, expected_version],
    )?;

    if changed == 0 {
        return match load_visit(conn, id)? {
            None => Err(AppError::NotFound(format!("Visit #{id}"))),
            Some(current) => Err(AppError::Conflict(format!(
                "Visit #{id} changed meanwhile (version {} ≠ {})",
                current.version, expected_version
            ))),
        };
    }

    load_visit(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Visit #{id}")))
}

/// Batch update of `visit_order`. Runs inside the caller's transaction.
pub fn set_visit_orders(conn: &Connection, updates: &[(i64, i32)]) -> AppResult<()> {
    for (id, order) in updates {
        let changed = conn.execute(
            "UPDATE visits SET visit_order = ?1, version = version + 1 WHERE id = ?2",
            params![order, id],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("Visit #{id}")));
        }
    }
    Ok(())
}

pub fn delete_visit(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM visits WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Visit #{id}")));
    }
    Ok(())
}
