use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

const CREATE_PLAN_TABLES: &str = "20241120_0001_create_plan_tables";
const ADD_VISIT_VERSION: &str = "20241205_0002_add_visit_version";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration version has already been recorded in `log`.
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Check if `table` has a column named `column`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `events`, `visits` and `bridges` tables.
/// Visits reference events by id only: deleting an event never cascades.
fn create_plan_tables(conn: &Connection) -> Result<()> {
    if is_applied(conn, CREATE_PLAN_TABLES)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        BEGIN;

        CREATE TABLE IF NOT EXISTS events (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            description      TEXT,
            start_date       TEXT NOT NULL,
            end_date         TEXT NOT NULL,
            open_time        TEXT,
            close_time       TEXT,
            address          TEXT,
            road_address     TEXT,
            jibun_address    TEXT,
            lat              REAL,
            lng              REAL,
            need_reservation INTEGER NOT NULL DEFAULT 0,
            category         TEXT NOT NULL
                CHECK(category IN ('cosmetics','game','celebrity','character')),
            district         TEXT,
            url              TEXT,
            content          TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS visits (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id         INTEGER NOT NULL,
            visit_time       TEXT,
            visit_order      INTEGER NOT NULL DEFAULT 1,
            is_reserved      INTEGER NOT NULL DEFAULT 0,
            reservation_time TEXT,
            is_important     INTEGER NOT NULL DEFAULT 0,
            reservation_url  TEXT,
            reference_url    TEXT,
            notes            TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS bridges (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id         INTEGER,
            bridge_type      TEXT NOT NULL DEFAULT 'generic'
                CHECK(bridge_type IN ('transport','rest','generic')),
            duration         INTEGER NOT NULL DEFAULT 0,
            location         TEXT,
            visit_time       TEXT,
            visit_order      INTEGER NOT NULL DEFAULT 1,
            is_reserved      INTEGER NOT NULL DEFAULT 0,
            reservation_time TEXT,
            reservation_url  TEXT,
            reference_url    TEXT,
            notes            TEXT,
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_dates ON events(start_date, end_date);
        CREATE INDEX IF NOT EXISTS idx_visits_time ON visits(visit_time);
        CREATE INDEX IF NOT EXISTS idx_visits_event ON visits(event_id);
        CREATE INDEX IF NOT EXISTS idx_bridges_time ON bridges(visit_time);

        COMMIT;
        "#,
    )?;

    mark_applied(conn, CREATE_PLAN_TABLES, "Created events, visits and bridges tables")?;
    success(format!("Migration applied: {}", CREATE_PLAN_TABLES));
    Ok(())
}

/// Add the row version used by compare-and-swap updates on visits.
fn migrate_add_visit_version(conn: &Connection) -> Result<(), Error> {
    if is_applied(conn, ADD_VISIT_VERSION)? {
        return Ok(());
    }

    if !has_column(conn, "visits", "version")? {
        conn.execute(
            "ALTER TABLE visits ADD COLUMN version INTEGER NOT NULL DEFAULT 1;",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'version' column: {}", e)),
            )
        })?;
    }

    mark_applied(conn, ADD_VISIT_VERSION, "Added version column to visits")?;

    success(format!(
        "Migration applied: {} → added 'version' to visits table",
        ADD_VISIT_VERSION
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_plan_tables(conn)?;
    migrate_add_visit_version(conn)?;
    Ok(())
}

/// List every migration version recorded in the log table.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
