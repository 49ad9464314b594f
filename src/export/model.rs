// src/export/model.rs

use crate::models::event::Event;
use crate::models::visit::Visit;
use crate::utils::time::format_db_ts;
use serde::Serialize;

/// Flat event row for CSV / JSON.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EventExport {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub district: String,
    pub start_date: String,
    pub end_date: String,
    pub open_time: String,
    pub close_time: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub need_reservation: bool,
    pub url: String,
}

impl From<&Event> for EventExport {
    fn from(e: &Event) -> Self {
        let hm = |t: Option<chrono::NaiveTime>| {
            t.map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default()
        };
        Self {
            id: e.id,
            name: e.name.clone(),
            category: e.category.to_db_str().to_string(),
            district: e.district.map(|d| d.to_db_str().to_string()).unwrap_or_default(),
            start_date: e.start_date.format("%Y-%m-%d").to_string(),
            end_date: e.end_date.format("%Y-%m-%d").to_string(),
            open_time: hm(e.open_time),
            close_time: hm(e.close_time),
            address: e
                .road_address
                .clone()
                .or_else(|| e.address.clone())
                .unwrap_or_default(),
            lat: e.coords.map(|c| c.lat),
            lng: e.coords.map(|c| c.lng),
            need_reservation: e.need_reservation,
            url: e.url.clone().unwrap_or_default(),
        }
    }
}

/// Flat visit row; the event name is denormalised for readability.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct VisitExport {
    pub id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub visit_time: String,
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: String,
    pub is_important: bool,
    pub notes: String,
}

impl From<&Visit> for VisitExport {
    fn from(v: &Visit) -> Self {
        Self {
            id: v.id,
            event_id: v.event_id,
            event_name: v.event.as_ref().map(|e| e.name.clone()).unwrap_or_default(),
            visit_time: v.visit_time.as_ref().map(format_db_ts).unwrap_or_default(),
            visit_order: v.visit_order,
            is_reserved: v.is_reserved,
            reservation_time: v.reservation_time.as_ref().map(format_db_ts).unwrap_or_default(),
            is_important: v.is_important,
            notes: v.notes.clone().unwrap_or_default(),
        }
    }
}
