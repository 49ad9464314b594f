use crate::errors::{AppError, AppResult};
use crate::models::category::{Category, District};
use crate::models::event::{Coords, Event, EventRecord};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub(crate) const EVENT_COLUMNS: &str = "id, name, description, start_date, end_date, open_time, close_time, \
     address, road_address, jibun_address, lat, lng, need_reservation, category, district, \
     url, content, created_at";

/// Wrap a domain parse error into the rusqlite error space.
pub(crate) fn conversion_err(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_col(idx: usize, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| conversion_err(idx, AppError::InvalidDate(raw.to_string())))
}

fn parse_time_col(idx: usize, raw: Option<String>) -> Result<Option<NaiveTime>> {
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_err(idx, AppError::InvalidTime(s))),
    }
}

/// Map an event row. `prefix` selects aliased columns (e.g. `e_` in joins).
pub(crate) fn map_event_prefixed(row: &Row, prefix: &str) -> Result<Event> {
    let col = |name: &str| format!("{prefix}{name}");

    let start_raw: String = row.get(col("start_date").as_str())?;
    let end_raw: String = row.get(col("end_date").as_str())?;

    let cat_raw: String = row.get(col("category").as_str())?;
    let category = Category::from_db_str(&cat_raw)
        .ok_or_else(|| conversion_err(0, AppError::InvalidCategory(cat_raw.clone())))?;

    let district = match row.get::<_, Option<String>>(col("district").as_str())? {
        None => None,
        Some(s) if s.is_empty() => None,
        Some(s) => Some(
            District::from_db_str(&s)
                .ok_or_else(|| conversion_err(0, AppError::InvalidDistrict(s.clone())))?,
        ),
    };

    let lat: Option<f64> = row.get(col("lat").as_str())?;
    let lng: Option<f64> = row.get(col("lng").as_str())?;
    let coords = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Coords::new(lat, lng)),
        _ => None,
    };

    Ok(Event {
        id: row.get(col("id").as_str())?,
        name: row.get(col("name").as_str())?,
        description: row.get(col("description").as_str())?,
        start_date: parse_date_col(0, &start_raw)?,
        end_date: parse_date_col(0, &end_raw)?,
        open_time: parse_time_col(0, row.get(col("open_time").as_str())?)?,
        close_time: parse_time_col(0, row.get(col("close_time").as_str())?)?,
        address: row.get(col("address").as_str())?,
        road_address: row.get(col("road_address").as_str())?,
        jibun_address: row.get(col("jibun_address").as_str())?,
        coords,
        need_reservation: row.get::<_, i32>(col("need_reservation").as_str())? == 1,
        category,
        district,
        url: row.get(col("url").as_str())?,
        content: row.get(col("content").as_str())?,
        created_at: row.get(col("created_at").as_str())?,
    })
}

pub fn map_row(row: &Row) -> Result<Event> {
    map_event_prefixed(row, "")
}

pub fn load_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_date ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<Event>> {
    let mut stmt = conn.prepare(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Events whose date span overlaps `[from, to]`.
pub fn load_events_between(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE start_date <= ?2 AND end_date >= ?1
         ORDER BY start_date ASC, id ASC"
    ))?;

    let rows = stmt.query_map(
        params![
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn fmt_time(t: &Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M").to_string())
}

pub fn insert_event(conn: &Connection, rec: &EventRecord) -> AppResult<Event> {
    let ev = rec.clone().into_event(0);

    conn.execute(
        "INSERT INTO events (name, description, start_date, end_date, open_time, close_time,
                             address, road_address, jibun_address, lat, lng, need_reservation,
                             category, district, url, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            ev.name,
            ev.description,
            ev.start_date.format("%Y-%m-%d").to_string(),
            ev.end_date.format("%Y-%m-%d").to_string(),
            fmt_time(&ev.open_time),
            fmt_time(&ev.close_time),
            ev.address,
            ev.road_address,
            ev.jibun_address,
            ev.coords.map(|c| c.lat),
            ev.coords.map(|c| c.lng),
            if ev.need_reservation { 1 } else { 0 },
            ev.category.to_db_str(),
            ev.district.map(|d| d.to_db_str()),
            ev.url,
            ev.content,
            ev.created_at,
        ],
    )?;

    let id = conn.last_insert_rowid();
    load_event(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Event #{id}")))
}

/// Update an event (all fields except id and created_at)
pub fn update_event(conn: &Connection, id: i64, rec: &EventRecord) -> AppResult<Event> {
    let changed = conn.execute(
        "UPDATE events
         SET name = ?1, description = ?2, start_date = ?3, end_date = ?4,
             open_time = ?5, close_time = ?6, address = ?7, road_address = ?8,
             jibun_address = ?9, lat = ?10, lng = ?11, need_reservation = ?12,
             category = ?13, district = ?14, url = ?15, content = ?16
         WHERE id = ?17",
        params![
            rec.name,
            rec.description,
            rec.start_date.format("%Y-%m-%d").to_string(),
            rec.end_date.format("%Y-%m-%d").to_string(),
            fmt_time(&rec.open_time),
            fmt_time(&rec.close_time),
            rec.address,
            rec.road_address,
            rec.jibun_address,
            rec.coords.map(|c| c.lat),
            rec.coords.map(|c| c.lng),
            if rec.need_reservation { 1 } else { 0 },
            rec.category.to_db_str(),
            rec.district.map(|d| d.to_db_str()),
            rec.url,
            rec.content,
            id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Event #{id}")));
    }

    load_event(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Event #{id}")))
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("Event #{id}")));
    }
    Ok(())
}
