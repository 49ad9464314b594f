#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;
use tripplanner::models::bridge::{Bridge, BridgeType};
use tripplanner::models::category::{Category, District};
use tripplanner::models::event::{Coords, Event};
use tripplanner::models::visit::Visit;

pub fn tp() -> Command {
    cargo_bin_cmd!("tripplanner")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tripplanner.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    tp().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Init plus one event (#1, with coordinates) and one visit (#1) on
/// 2025-03-10 at 10:30.
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    tp().args([
        "--db",
        db_path,
        "event",
        "add",
        "--name",
        "Olive Young Seongsu",
        "--category",
        "cosmetics",
        "--district",
        "seongsu",
        "--start",
        "2025-03-01",
        "--end",
        "2025-03-31",
        "--address",
        "Seoul Seongdong-gu Yeonmujang-gil 13",
        "--lat",
        "37.5446",
        "--lng",
        "127.0557",
    ])
    .assert()
    .success();

    tp().args([
        "--db",
        db_path,
        "visit",
        "add",
        "--event",
        "1",
        "--time",
        "2025-03-10 10:30",
    ])
    .assert()
    .success();
}

// ---------------------------
// Model builders for library tests
// ---------------------------

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn at(date: &str, hm: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {hm}"), "%Y-%m-%d %H:%M").unwrap()
}

pub fn event(id: i64, name: &str, category: Category, coords: Option<(f64, f64)>) -> Event {
    Event {
        id,
        name: name.to_string(),
        description: None,
        start_date: day("2025-03-01"),
        end_date: day("2025-03-31"),
        open_time: None,
        close_time: None,
        address: None,
        road_address: None,
        jibun_address: None,
        coords: coords.map(|(lat, lng)| Coords::new(lat, lng)),
        need_reservation: false,
        category,
        district: None,
        url: None,
        content: None,
        created_at: String::new(),
    }
}

pub fn event_in(id: i64, name: &str, category: Category, district: District) -> Event {
    Event {
        district: Some(district),
        ..event(id, name, category, None)
    }
}

pub fn visit(id: i64, event_id: i64, time: Option<NaiveDateTime>) -> Visit {
    Visit {
        id,
        event_id,
        visit_time: time,
        visit_order: 1,
        is_reserved: false,
        reservation_time: None,
        is_important: false,
        reservation_url: None,
        reference_url: None,
        notes: None,
        created_at: String::new(),
        version: 1,
        event: None,
    }
}

pub fn bridge(id: i64, time: Option<NaiveDateTime>, minutes: i32) -> Bridge {
    Bridge {
        id,
        event_id: None,
        bridge_type: BridgeType::Transport,
        duration: minutes,
        location: None,
        visit_time: time,
        visit_order: 1,
        is_reserved: false,
        reservation_time: None,
        reservation_url: None,
        reference_url: None,
        notes: None,
        created_at: String::new(),
    }
}
