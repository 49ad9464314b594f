use crate::db::migrate::applied_versions;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

fn count(conn: &Connection, sql: &str) -> rusqlite::Result<i64> {
    conn.query_row(sql, [], |row| row.get(0))
}

fn span(
    conn: &Connection,
    sql_min: &str,
    sql_max: &str,
) -> rusqlite::Result<(Option<String>, Option<String>)> {
    let first: Option<String> = conn
        .query_row(sql_min, [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = conn
        .query_row(sql_max, [], |row| row.get(0))
        .optional()?
        .flatten();
    Ok((first, last))
}

fn or_dash(v: Option<String>) -> String {
    v.unwrap_or_else(|| format!("{GREY}--{RESET}"))
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let conn = &pool.conn;
    let events = count(conn, "SELECT COUNT(*) FROM events")?;
    let visits = count(conn, "SELECT COUNT(*) FROM visits")?;
    let unscheduled = count(conn, "SELECT COUNT(*) FROM visits WHERE visit_time IS NULL")?;
    let orphans = count(
        conn,
        "SELECT COUNT(*) FROM visits v LEFT JOIN events e ON e.id = v.event_id WHERE e.id IS NULL",
    )?;
    let bridges = count(conn, "SELECT COUNT(*) FROM bridges")?;

    println!("{}• Events:{} {}{}{}", CYAN, RESET, GREEN, events, RESET);
    println!(
        "{}• Visits:{} {}{}{} ({} unscheduled, {} without event)",
        CYAN, RESET, GREEN, visits, RESET, unscheduled, orphans
    );
    println!("{}• Bridges:{} {}{}{}", CYAN, RESET, GREEN, bridges, RESET);

    //
    // 3) DATE RANGES
    //
    let (ev_first, ev_last) = span(
        conn,
        "SELECT MIN(start_date) FROM events",
        "SELECT MAX(end_date) FROM events",
    )?;
    let (vi_first, vi_last) = span(
        conn,
        "SELECT MIN(substr(visit_time, 1, 10)) FROM visits",
        "SELECT MAX(substr(visit_time, 1, 10)) FROM visits",
    )?;

    println!("{}• Event span:{}", CYAN, RESET);
    println!("    from: {}", or_dash(ev_first));
    println!("    to:   {}", or_dash(ev_last));
    println!("{}• Visit span:{}", CYAN, RESET);
    println!("    from: {}", or_dash(vi_first));
    println!("    to:   {}", or_dash(vi_last));

    //
    // 4) MIGRATIONS
    //
    let versions = applied_versions(conn)?;
    println!("{}• Migrations:{} {}", CYAN, RESET, versions.len());
    for v in versions {
        println!("    {}", v);
    }

    println!();
    Ok(())
}
