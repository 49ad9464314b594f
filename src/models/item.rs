use super::bridge::Bridge;
use super::event::{Coords, Event};
use super::visit::Visit;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Anything that can be shown in a list, on the map or on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanItem {
    Event(Event),
    Visit(Visit),
    Bridge(Bridge),
}

impl PlanItem {
    pub fn id(&self) -> i64 {
        match self {
            PlanItem::Event(e) => e.id,
            PlanItem::Visit(v) => v.id,
            PlanItem::Bridge(b) => b.id,
        }
    }

    pub fn title(&self) -> String {
        match self {
            PlanItem::Event(e) => e.name.clone(),
            PlanItem::Visit(v) => v.title(),
            PlanItem::Bridge(b) => match &b.location {
                Some(loc) => format!("{} {}", b.bridge_type.to_db_str(), loc),
                None => b.bridge_type.to_db_str().to_string(),
            },
        }
    }

    /// Scheduled time, if the item sits on a timeline.
    pub fn visit_time(&self) -> Option<NaiveDateTime> {
        match self {
            PlanItem::Event(_) => None,
            PlanItem::Visit(v) => v.visit_time,
            PlanItem::Bridge(b) => b.visit_time,
        }
    }

    /// Events carry their own coordinates, visits borrow the joined event's.
    pub fn coords(&self) -> Option<Coords> {
        match self {
            PlanItem::Event(e) => e.coords,
            PlanItem::Visit(v) => v.coords(),
            PlanItem::Bridge(_) => None,
        }
    }
}

/// A filtered item with its display marker. Markers are recomputed on every
/// filter pass and are never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed {
    pub item: PlanItem,
    pub pin_idx: usize,
    pub marker: String,
}

impl Placed {
    pub fn coords(&self) -> Option<Coords> {
        self.item.coords()
    }
}
