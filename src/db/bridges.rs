use crate::db::events::conversion_err;
use crate::db::visits::{day_bounds, parse_ts_col};
use crate::errors::{AppError, AppResult};
use crate::models::bridge::{Bridge, BridgeRecord, BridgeType};
use crate::utils::time::format_db_ts;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const BRIDGE_COLUMNS: &str = "id, event_id, bridge_type, duration, location, visit_time, visit_order, \
     is_reserved, reservation_time, reservation_url, reference_url, notes, created_at";

pub fn map_row(row: &Row) -> Result<Bridge> {
    let kind_raw: String = row.get("bridge_type")?;
    let bridge_type = BridgeType::from_db_str(&kind_raw)
        .ok_or_else(|| conversion_err(0, AppError::InvalidBridgeType(kind_raw.clone())))?;

    Ok(Bridge {
        id: row.get("id")?,
        event_id: row.get("event_id")?,
        bridge_type,
        duration: row.get("duration")?,
        location: row.get("location")?,
        visit_time: parse_ts_col(row.get("visit_time")?)?,
        visit_order: row.get("visit_order")?,
        is_reserved: row.get::<_, i32>("is_reserved")? == 1,
        reservation_time: parse_ts_col(row.get("reservation_time")?)?,
        reservation_url: row.get("reservation_url")?,
        reference_url: row.get("reference_url")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

pub fn load_bridges(conn: &Connection) -> AppResult<Vec<Bridge>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BRIDGE_COLUMNS} FROM bridges ORDER BY visit_order ASC, id ASC"
    ))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_bridges_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<Bridge>> {
    let (from, to) = day_bounds(date);
    let mut stmt = conn.prepare(&format!(
        "SELECT {BRIDGE_COLUMNS} FROM bridges
         WHERE visit_time >= ?1 AND visit_time < ?2
         ORDER BY visit_order ASC, id ASC"
    ))?;
    let rows = stmt.query_map([from, to], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Bridges attached to `event_id`, in day order.
pub fn load_bridges_by_event(conn: &Connection, event_id: i64) -> AppResult<Vec<Bridge>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BRIDGE_COLUMNS} FROM bridges
         WHERE event_id = ?1
         ORDER BY visit_time IS NULL, visit_time ASC, visit_order ASC, id ASC"
    ))?;
    let rows = stmt.query_map([event_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_bridge(conn: &Connection, id: i64) -> AppResult<Option<Bridge>> {
    let mut stmt = conn.prepare(&format!("SELECT {BRIDGE_COLUMNS} FROM bridges WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert_bridge(conn: &Connection, rec: &BridgeRecord) -> AppResult<Bridge> {
    conn.execute(
        "INSERT INTO bridges (event_id, bridge_type, duration, location, visit_time, visit_order,
                              is_reserved, reservation_time, reservation_url, reference_url,
                              notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            rec.event_id,
            rec.bridge_type.to_db_str(),
            rec.duration,
            rec.location,
            rec.visit_time.as_ref().map(format_db_ts),
            rec.visit_order,
            if rec.is_reserved { 1 } else { 0 },
            rec.reservation_time.as_ref().map(format_db_ts),
            rec.reservation_url,
            rec.reference_url,
            rec.notes,
            chrono::Local::now().to_rfc3339(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    load_bridge(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Bridge #{id}")))
}

pub fn update_bridge(conn: &Connection, id: i64, rec: &BridgeRecord) -> AppResult<Bridge> {
    let changed = conn.execute(
        "UPDATE bridges
         SET event_id = ?1, bridge_type = ?2, duration = ?3, location = ?4, visit_time = ?5,
             visit_order = ?6, is_reserved = ?7, reservation_time = ?8,
             reservation_url = ?9, reference_url = ?10, notes = ?11
         WHERE id = ?12",
        params![
            rec.event_id,
            rec.bridge_type.to_db_str(),
            rec.duration,
            rec.location,
            rec.visit_time.as_ref().map(format_db_ts),
            rec.visit_order,
            if rec.is_reserved { 1 } else { 0 },
            rec.reservation_time.as_ref().map(format_db_ts),
            rec.reservation_url,
            rec.reference_url,
            rec.notes,
            id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Bridge #{id}")));
    }

    load_bridge(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Bridge #{id}")))
}

/// Batch update of `visit_order`. Runs inside the caller's transaction.
pub fn set_bridge_orders(conn: &Connection, updates: &[(i64, i32)]) -> AppResult<()> {
    for (id, order) in updates {
        let changed = conn.execute(
            "UPDATE bridges SET visit_order = ?1 WHERE id = ?2",
            params![order, id],
        )?;
        if changed == 0 {
            return Err(AppError::NotFound(format!("Bridge #{id}")));
        }
    }
    Ok(())
}

pub fn delete_bridge(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM bridges WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Bridge #{id}")));
    }
    Ok(())
}
