//! Fixed-size slots over one local day and bucketing of timed items.

use super::zoom::ZoomLevel;
use crate::models::item::Placed;
use crate::utils::time::to_epoch_millis;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

const GAP_SEARCH_MINUTES: i64 = 180;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn hour(&self) -> u32 {
        self.start.hour()
    }

    /// Half-open: `[start, end)`.
    pub fn contains(&self, t: &NaiveDateTime) -> bool {
        self.start <= *t && *t < self.end
    }

    pub fn epoch_millis(&self) -> i64 {
        if let Some(ms) = to_epoch_millis(&self.start) {
            return ms;
        }
        // skipped by a DST gap: last real minute before it, plus one
        // millisecond per skipped minute, never on a minute boundary
        let mut valid = self.start;
        for _ in 0..GAP_SEARCH_MINUTES {
            valid -= Duration::minutes(1);
            if let Some(ms) = to_epoch_millis(&valid) {
                return ms + (self.start - valid).num_minutes();
            }
        }
        self.start.and_utc().timestamp_millis()
    }

    pub fn drop_id(&self) -> String {
        format!("timeslot-{}", self.epoch_millis())
    }

    pub fn label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }
}

pub fn day_start(date: &NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default()
}

/// `24 * 60 / interval` consecutive slots starting at local midnight.
pub fn generate_slots(date: &NaiveDate, zoom: ZoomLevel) -> Vec<Slot> {
    let step = Duration::minutes(zoom.interval_minutes());
    let midnight = day_start(date);

    (0..zoom.slots_per_day() as i32)
        .map(|i| {
            let start = midnight + step * i;
            Slot {
                start,
                end: start + step,
            }
        })
        .collect()
}

/// Index of the slot holding `t`, if `t` falls on `date`.
pub fn slot_index(date: &NaiveDate, zoom: ZoomLevel, t: &NaiveDateTime) -> Option<usize> {
    if t.date() != *date {
        return None;
    }
    let minutes = (*t - day_start(date)).num_minutes();
    Some((minutes / zoom.interval_minutes()) as usize)
}

/// Items grouped per slot, preserving input order inside a slot.
/// Unscheduled items and items of other days are left out.
pub fn bucket<'a>(slots: &[Slot], items: &'a [Placed]) -> Vec<Vec<&'a Placed>> {
    let mut buckets: Vec<Vec<&Placed>> = vec![Vec::new(); slots.len()];

    for p in items {
        let Some(t) = p.item.visit_time() else {
            continue;
        };
        if let Some(idx) = slots.iter().position(|s| s.contains(&t)) {
            buckets[idx].push(p);
        }
    }

    buckets
}

/// Which of the 24 hours hold at least one timed item on `date`.
pub fn hour_occupancy(date: &NaiveDate, items: &[Placed]) -> [bool; 24] {
    let mut occupied = [false; 24];
    for t in items.iter().filter_map(|p| p.item.visit_time()) {
        if t.date() == *date {
            occupied[t.hour() as usize] = true;
        }
    }
    occupied
}
