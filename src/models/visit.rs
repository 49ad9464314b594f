use super::event::{Coords, Event};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub id: i64,
    pub event_id: i64,
    pub visit_time: Option<NaiveDateTime>, // None → unscheduled
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: Option<NaiveDateTime>,
    pub is_important: bool,
    pub reservation_url: Option<String>,
    pub reference_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub version: i64, // ⇔ visits.version, bumped on every update

    /// Joined event row (read-only, absent when the event was deleted).
    pub event: Option<Event>,
}

impl Visit {
    pub fn visit_date(&self) -> Option<NaiveDate> {
        self.visit_time.map(|t| t.date())
    }

    pub fn coords(&self) -> Option<Coords> {
        self.event.as_ref().and_then(|e| e.coords)
    }

    pub fn title(&self) -> String {
        self.event
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| format!("(event #{})", self.event_id))
    }
}

/// Plain record used to insert or update a visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitRecord {
    pub event_id: i64,
    pub visit_time: Option<NaiveDateTime>,
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: Option<NaiveDateTime>,
    pub is_important: bool,
    pub reservation_url: Option<String>,
    pub reference_url: Option<String>,
    pub notes: Option<String>,
}

impl From<&Visit> for VisitRecord {
    fn from(v: &Visit) -> Self {
        Self {
            event_id: v.event_id,
            visit_time: v.visit_time,
            visit_order: v.visit_order,
            is_reserved: v.is_reserved,
            reservation_time: v.reservation_time,
            is_important: v.is_important,
            reservation_url: v.reservation_url.clone(),
            reference_url: v.reference_url.clone(),
            notes: v.notes.clone(),
        }
    }
}
