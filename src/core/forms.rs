//! Edit drafts for events, visits and bridges.
//!
//! A draft holds what the user typed plus a few display-only fields. On
//! submit the draft is validated and turned into a plain record for the
//! store; the display-only fields never leave the form.

use crate::core::geocode::{GeocodeMatch, Geocoder};
use crate::errors::{AppError, AppResult};
use crate::models::bridge::{Bridge, BridgeRecord, BridgeType};
use crate::models::category::{Category, District};
use crate::models::event::{Coords, Event, EventRecord};
use crate::models::item::Placed;
use crate::models::visit::{Visit, VisitRecord};
use crate::ui::messages::Notify;
use crate::utils::date::today;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Trimmed value, `None` when blank.
pub fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

fn opt_text(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

/// Draft → record conversion with validation.
pub trait Draft {
    type Record;

    /// Noun used in notifications ("Event", "Visit", ...).
    const NOUN: &'static str;

    fn to_record(&self) -> AppResult<Self::Record>;
}

/// Display-only data carried while a record is being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayTag {
    pub marker: Option<String>,
    pub pin_idx: Option<usize>,
}

impl From<&Placed> for DisplayTag {
    fn from(p: &Placed) -> Self {
        Self {
            marker: Some(p.marker.clone()),
            pin_idx: Some(p.pin_idx),
        }
    }
}

// ---------------------------
// Event
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub address: String,
    pub road_address: String,
    pub jibun_address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub need_reservation: bool,
    pub category: Option<Category>,
    pub district: Option<District>,
    pub url: String,
    pub content: String,
    pub display: DisplayTag,
}

impl Default for EventDraft {
    fn default() -> Self {
        let d = today();
        Self {
            name: String::new(),
            description: String::new(),
            start_date: d,
            end_date: d,
            open_time: NaiveTime::from_hms_opt(10, 0, 0),
            close_time: NaiveTime::from_hms_opt(20, 0, 0),
            address: String::new(),
            road_address: String::new(),
            jibun_address: String::new(),
            lat: None,
            lng: None,
            need_reservation: false,
            category: None,
            district: None,
            url: String::new(),
            content: String::new(),
            display: DisplayTag::default(),
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(ev: &Event) -> Self {
        Self {
            name: ev.name.clone(),
            description: opt_text(&ev.description),
            start_date: ev.start_date,
            end_date: ev.end_date,
            open_time: ev.open_time,
            close_time: ev.close_time,
            address: opt_text(&ev.address),
            road_address: opt_text(&ev.road_address),
            jibun_address: opt_text(&ev.jibun_address),
            lat: ev.coords.map(|c| c.lat),
            lng: ev.coords.map(|c| c.lng),
            need_reservation: ev.need_reservation,
            category: Some(ev.category),
            district: ev.district,
            url: opt_text(&ev.url),
            content: opt_text(&ev.content),
            display: DisplayTag::default(),
        }
    }
}

impl EventDraft {
    fn apply_geocode(&mut self, m: &GeocodeMatch, overwrite_address: bool) {
        self.lat = Some(m.coords.lat);
        self.lng = Some(m.coords.lng);
        self.road_address = opt_text(&m.road_address);
        self.jibun_address = opt_text(&m.jibun_address);
        if overwrite_address {
            self.address = m.display_address().unwrap_or_default();
        }
    }
}

impl Draft for EventDraft {
    type Record = EventRecord;
    const NOUN: &'static str = "Event";

    fn to_record(&self) -> AppResult<EventRecord> {
        let name = non_empty(&self.name)
            .ok_or_else(|| AppError::Validation("event name is required".into()))?;
        let category = self
            .category
            .ok_or_else(|| AppError::Validation("event category is required".into()))?;
        if self.start_date > self.end_date {
            return Err(AppError::Validation(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }

        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coords::new(lat, lng))
            }
            _ => None,
        };

        Ok(EventRecord {
            name,
            description: non_empty(&self.description),
            start_date: self.start_date,
            end_date: self.end_date,
            open_time: self.open_time,
            close_time: self.close_time,
            address: non_empty(&self.address),
            road_address: non_empty(&self.road_address),
            jibun_address: non_empty(&self.jibun_address),
            coords,
            need_reservation: self.need_reservation,
            category,
            district: self.district,
            url: non_empty(&self.url),
            content: non_empty(&self.content),
        })
    }
}

// ---------------------------
// Visit
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct VisitDraft {
    pub event_id: Option<i64>,
    pub visit_time: Option<NaiveDateTime>,
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: Option<NaiveDateTime>,
    pub is_important: bool,
    pub reservation_url: String,
    pub reference_url: String,
    pub notes: String,
    /// Joined event shown next to the form.
    pub event: Option<Event>,
    pub display: DisplayTag,
}

impl Default for VisitDraft {
    fn default() -> Self {
        Self {
            event_id: None,
            visit_time: None,
            visit_order: 1,
            is_reserved: false,
            reservation_time: None,
            is_important: false,
            reservation_url: String::new(),
            reference_url: String::new(),
            notes: String::new(),
            event: None,
            display: DisplayTag::default(),
        }
    }
}

impl VisitDraft {
    pub fn for_event(event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..Default::default()
        }
    }
}

impl From<&Visit> for VisitDraft {
    fn from(v: &Visit) -> Self {
        Self {
            event_id: Some(v.event_id),
            visit_time: v.visit_time,
            visit_order: v.visit_order,
            is_reserved: v.is_reserved,
            reservation_time: v.reservation_time,
            is_important: v.is_important,
            reservation_url: opt_text(&v.reservation_url),
            reference_url: opt_text(&v.reference_url),
            notes: opt_text(&v.notes),
            event: v.event.clone(),
            display: DisplayTag::default(),
        }
    }
}

impl Draft for VisitDraft {
    type Record = VisitRecord;
    const NOUN: &'static str = "Visit";

    fn to_record(&self) -> AppResult<VisitRecord> {
        let event_id = self
            .event_id
            .ok_or_else(|| AppError::Validation("visit needs an event".into()))?;
        if self.visit_order < 1 {
            return Err(AppError::Validation(format!(
                "visit order must be at least 1 (got {})",
                self.visit_order
            )));
        }

        Ok(VisitRecord {
            event_id,
            visit_time: self.visit_time,
            visit_order: self.visit_order,
            is_reserved: self.is_reserved,
            // only meaningful once reserved
            reservation_time: self.reservation_time.filter(|_| self.is_reserved),
            is_important: self.is_important,
            reservation_url: non_empty(&self.reservation_url),
            reference_url: non_empty(&self.reference_url),
            notes: non_empty(&self.notes),
        })
    }
}

// ---------------------------
// Bridge
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeDraft {
    pub event_id: Option<i64>,
    pub bridge_type: BridgeType,
    pub duration: i32,
    pub location: String,
    pub visit_time: Option<NaiveDateTime>,
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: Option<NaiveDateTime>,
    pub reservation_url: String,
    pub reference_url: String,
    pub notes: String,
    pub display: DisplayTag,
}

impl Default for BridgeDraft {
    fn default() -> Self {
        Self {
            event_id: None,
            bridge_type: BridgeType::Generic,
            duration: 30,
            location: String::new(),
            visit_time: None,
            visit_order: 1,
            is_reserved: false,
            reservation_time: None,
            reservation_url: String::new(),
            reference_url: String::new(),
            notes: String::new(),
            display: DisplayTag::default(),
        }
    }
}

impl From<&Bridge> for BridgeDraft {
    fn from(b: &Bridge) -> Self {
        Self {
            event_id: b.event_id,
            bridge_type: b.bridge_type,
            duration: b.duration,
            location: opt_text(&b.location),
            visit_time: b.visit_time,
            visit_order: b.visit_order,
            is_reserved: b.is_reserved,
            reservation_time: b.reservation_time,
            reservation_url: opt_text(&b.reservation_url),
            reference_url: opt_text(&b.reference_url),
            notes: opt_text(&b.notes),
            display: DisplayTag::default(),
        }
    }
}

impl Draft for BridgeDraft {
    type Record = BridgeRecord;
    const NOUN: &'static str = "Bridge";

    fn to_record(&self) -> AppResult<BridgeRecord> {
        if self.duration <= 0 {
            return Err(AppError::Validation(format!(
                "bridge duration must be positive (got {})",
                self.duration
            )));
        }

        Ok(BridgeRecord {
            event_id: self.event_id,
            bridge_type: self.bridge_type,
            duration: self.duration,
            location: non_empty(&self.location),
            visit_time: self.visit_time,
            visit_order: self.visit_order.max(1),
            is_reserved: self.is_reserved,
            reservation_time: self.reservation_time.filter(|_| self.is_reserved),
            reservation_url: non_empty(&self.reservation_url),
            reference_url: non_empty(&self.reference_url),
            notes: non_empty(&self.notes),
        })
    }
}

// ---------------------------
// Form
// ---------------------------

/// A draft being edited, open until a submit succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Form<D: Draft> {
    pub draft: D,
    editing: Option<i64>,
    open: bool,
}

pub type EventForm = Form<EventDraft>;
pub type VisitForm = Form<VisitDraft>;
pub type BridgeForm = Form<BridgeDraft>;

impl<D: Draft> Form<D> {
    pub fn create(draft: D) -> Self {
        Self {
            draft,
            editing: None,
            open: true,
        }
    }

    pub fn edit(id: i64, draft: D) -> Self {
        Self {
            draft,
            editing: Some(id),
            open: true,
        }
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Validate, hand the record to `on_submit` and report the outcome.
    /// Closes the form on success; on failure it stays open and the error
    /// is returned to the caller.
    pub fn submit<T, F, N>(&mut self, notify: &mut N, on_submit: F) -> AppResult<T>
    where
        F: FnOnce(&D::Record) -> AppResult<T>,
        N: Notify + ?Sized,
    {
        let verb = if self.editing.is_some() { "updated" } else { "added" };

        let result = self.draft.to_record().and_then(|rec| on_submit(&rec));
        match result {
            Ok(v) => {
                notify.success(&format!("{} {}.", D::NOUN, verb));
                self.open = false;
                Ok(v)
            }
            Err(e) => {
                notify.error(&format!("{} could not be saved: {}", D::NOUN, e));
                Err(e)
            }
        }
    }
}

impl Form<EventDraft> {
    /// Forward-geocode the typed address. Returns true when the draft was
    /// filled; any non-OK answer leaves it untouched.
    pub fn search_address<G: Geocoder + ?Sized>(&mut self, geocoder: &G) -> bool {
        if self.draft.address.trim().is_empty() {
            return false;
        }
        let resp = geocoder.forward(&self.draft.address);
        match resp.first_ok() {
            Some(m) => {
                self.draft.apply_geocode(m, false);
                true
            }
            None => false,
        }
    }

    /// Map picker: reverse-geocode the clicked point into the draft.
    pub fn pick_location<G: Geocoder + ?Sized>(&mut self, geocoder: &G, at: Coords) -> bool {
        let resp = geocoder.reverse(at);
        match resp.first_ok() {
            Some(m) => {
                let mut m = m.clone();
                m.coords = at;
                self.draft.apply_geocode(&m, true);
                true
            }
            None => false,
        }
    }
}
