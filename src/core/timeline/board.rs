//! One day of the timeline: visits and bridges laid out on slots, the
//! collapsed ranges, hover timers and optimistic moves.

use super::collapse::{CollapseState, HourRange, ToggleOutcome};
use super::dnd::{DragSource, DropTarget};
use super::overlap::overlap_offset;
use super::slots::{Slot, bucket, generate_slots, hour_occupancy, slot_index};
use super::timer::ExpandTimer;
use super::zoom::ZoomLevel;
use crate::core::filter::{FilterState, filter_timeline_items};
use crate::db::store::{BridgeStore, VisitStore};
use crate::errors::{AppError, AppResult};
use crate::models::bridge::Bridge;
use crate::models::item::{Placed, PlanItem};
use crate::models::visit::Visit;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// A card inside a slot row.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPlacement {
    pub placed: Placed,
    pub offset_px: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineRow {
    Collapsed(HourRange),
    Slot {
        slot: Slot,
        height_px: u32,
        cards: Vec<CardPlacement>,
    },
    /// Bridge shown between slots, with its marker.
    Gap { placed: Placed, bridge: Bridge },
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Moved(Visit),
    /// Dropped on a collapsed range or on the slot the visit already sits in.
    Ignored,
}

/// Optimistic move waiting for the store's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub visit_id: i64,
    pub time: NaiveDateTime,
    pub expected_version: i64,
}

#[derive(Debug)]
pub struct TimelineBoard {
    date: NaiveDate,
    zoom: ZoomLevel,
    /// What the store has confirmed.
    confirmed: Vec<Visit>,
    /// `confirmed` with the moves still in flight applied on top.
    visits: Vec<Visit>,
    bridges: Vec<Bridge>,
    collapse: CollapseState,
    timers: HashMap<HourRange, ExpandTimer>,
    expand_delay: Duration,
    in_flight: HashMap<i64, NaiveDateTime>,
}

impl TimelineBoard {
    pub fn new(
        date: NaiveDate,
        zoom: ZoomLevel,
        visits: Vec<Visit>,
        bridges: Vec<Bridge>,
        expand_delay: Duration,
    ) -> Self {
        let mut board = Self {
            date,
            zoom,
            confirmed: visits.clone(),
            visits,
            bridges,
            collapse: CollapseState::default(),
            timers: HashMap::new(),
            expand_delay,
            in_flight: HashMap::new(),
        };
        board.refresh();
        board
    }

    /// Load the visits and bridges of `date` from the store.
    pub fn load<S>(
        store: &S,
        date: NaiveDate,
        zoom: ZoomLevel,
        expand_delay: Duration,
    ) -> AppResult<Self>
    where
        S: VisitStore + BridgeStore + ?Sized,
    {
        let visits = store.visits_by_date(&date)?;
        let bridges = store.bridges_by_date(&date)?;
        Ok(Self::new(date, zoom, visits, bridges, expand_delay))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn bridges(&self) -> &[Bridge] {
        &self.bridges
    }

    pub fn collapsed_ranges(&self) -> &[HourRange] {
        self.collapse.ranges()
    }

    pub fn is_in_flight(&self, visit_id: i64) -> bool {
        self.in_flight.contains_key(&visit_id)
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.zoom = zoom;
    }

    /// Items in display order with their markers.
    pub fn placed(&self) -> Vec<Placed> {
        filter_timeline_items(&self.visits, &self.bridges, &FilterState::on(self.date))
    }

    pub fn occupancy(&self) -> [bool; 24] {
        hour_occupancy(&self.date, &self.placed())
    }

    pub fn slots(&self) -> Vec<Slot> {
        generate_slots(&self.date, self.zoom)
    }

    /// The slot `t` falls into, if it is on this board's day.
    pub fn slot_at(&self, t: &NaiveDateTime) -> Option<Slot> {
        let idx = slot_index(&self.date, self.zoom, t)?;
        self.slots().into_iter().nth(idx)
    }

    /// Recompute collapsed ranges and drop timers of ranges that vanished.
    fn refresh(&mut self) {
        self.visits
            .sort_by_key(|v| (v.visit_time.is_none(), v.visit_time, v.visit_order, v.id));
        let occupied = self.occupancy();
        self.collapse.recompute(&occupied);

        let collapse = &self.collapse;
        self.timers.retain(|r, _| collapse.contains_range(r));
    }

    // ---------------------------
    // Expand / collapse
    // ---------------------------

    pub fn expand(&mut self, range: HourRange) -> bool {
        self.timers.remove(&range);
        self.collapse.expand(range)
    }

    pub fn expand_all(&mut self) {
        self.timers.clear();
        self.collapse.expand_all();
    }

    pub fn toggle_hour(&mut self, hour: u32) -> ToggleOutcome {
        let occupied = self.occupancy();
        let outcome = self.collapse.toggle_hour(hour, &occupied);

        let collapse = &self.collapse;
        self.timers.retain(|r, _| collapse.contains_range(r));
        outcome
    }

    // ---------------------------
    // Drag hover
    // ---------------------------

    /// A dragged card entered a collapsed range. Arms its timer if idle.
    pub fn hover_enter(&mut self, range: HourRange, now: Instant) -> bool {
        if !self.collapse.contains_range(&range) {
            return false;
        }
        let delay = self.expand_delay;
        self.timers
            .entry(range)
            .or_insert_with(|| ExpandTimer::new(delay))
            .arm(now)
    }

    pub fn hover_leave(&mut self, range: HourRange) {
        if let Some(t) = self.timers.get_mut(&range) {
            t.disarm();
        }
    }

    pub fn is_timer_armed(&self, range: &HourRange) -> bool {
        self.timers.get(range).is_some_and(|t| t.is_armed())
    }

    /// Expand every range whose hover timer expired. Returns them.
    pub fn tick(&mut self, now: Instant) -> Vec<HourRange> {
        let mut fired: Vec<HourRange> = self
            .timers
            .iter_mut()
            .filter_map(|(r, t)| t.poll(now).then_some(*r))
            .collect();
        fired.sort();

        for r in &fired {
            self.expand(*r);
        }
        fired
    }

    // ---------------------------
    // Moves
    // ---------------------------

    /// Apply the move locally and register it as in flight.
    pub fn begin_move(&mut self, visit_id: i64, time: NaiveDateTime) -> AppResult<PendingMove> {
        if self.in_flight.contains_key(&visit_id) {
            return Err(AppError::MoveInFlight(visit_id));
        }

        let expected_version = self
            .confirmed
            .iter()
            .find(|v| v.id == visit_id)
            .map(|v| v.version)
            .ok_or_else(|| AppError::NotFound(format!("Visit #{visit_id}")))?;

        self.in_flight.insert(visit_id, time);
        self.rebuild();

        Ok(PendingMove {
            visit_id,
            time,
            expected_version,
        })
    }

    /// Settle a pending move. A saved row joins the confirmed state; a
    /// failure drops the move, leaving the other in-flight moves applied.
    pub fn finish_move(
        &mut self,
        pending: PendingMove,
        result: AppResult<Visit>,
    ) -> AppResult<Visit> {
        self.in_flight.remove(&pending.visit_id);

        if let Ok(saved) = &result
            && let Some(v) = self.confirmed.iter_mut().find(|v| v.id == saved.id)
        {
            *v = saved.clone();
        }
        self.rebuild();
        result
    }

    /// Displayed visits = confirmed rows + in-flight times.
    fn rebuild(&mut self) {
        self.visits = self
            .confirmed
            .iter()
            .cloned()
            .map(|mut v| {
                if let Some(t) = self.in_flight.get(&v.id) {
                    v.visit_time = Some(*t);
                }
                v
            })
            .collect();
        self.refresh();
    }

    /// Optimistic move persisted through `store`, rolled back on failure.
    pub fn move_visit<S>(
        &mut self,
        store: &mut S,
        visit_id: i64,
        time: NaiveDateTime,
    ) -> AppResult<Visit>
    where
        S: VisitStore + ?Sized,
    {
        let pending = self.begin_move(visit_id, time)?;
        let result =
            store.update_visit_time(pending.visit_id, &pending.time, pending.expected_version);
        self.finish_move(pending, result)
    }

    /// Drag end: `source` dropped over `target`.
    pub fn apply_drop<S>(
        &mut self,
        store: &mut S,
        source: DragSource,
        target: DropTarget,
    ) -> AppResult<DropOutcome>
    where
        S: VisitStore + ?Sized,
    {
        let ms = match target {
            DropTarget::Collapsed(_) => return Ok(DropOutcome::Ignored),
            DropTarget::Slot(ms) => ms,
        };

        let slot = self
            .slots()
            .into_iter()
            .find(|s| s.epoch_millis() == ms)
            .ok_or_else(|| AppError::InvalidDropId(target.to_string()))?;

        let visit_id = source.visit_id();
        let current = self
            .visits
            .iter()
            .find(|v| v.id == visit_id)
            .ok_or_else(|| AppError::NotFound(format!("Visit #{visit_id}")))?;

        if current.visit_time == Some(slot.start) {
            return Ok(DropOutcome::Ignored);
        }

        self.move_visit(store, visit_id, slot.start)
            .map(DropOutcome::Moved)
    }

    // ---------------------------
    // Layout
    // ---------------------------

    /// Rows top to bottom: collapsed summaries, slots with their cards and
    /// bridges as gap rows after the slot they start in.
    pub fn rows(&self) -> Vec<TimelineRow> {
        let placed = self.placed();
        let occupied = hour_occupancy(&self.date, &placed);
        let slots = self.slots();
        let buckets = bucket(&slots, &placed);

        let mut rows = Vec::new();
        let mut emitted: HashSet<HourRange> = HashSet::new();

        for (slot, items) in slots.iter().zip(buckets) {
            if let Some(range) = self.collapse.range_at(slot.hour()) {
                if emitted.insert(range) {
                    rows.push(TimelineRow::Collapsed(range));
                }
                continue;
            }

            let visits_here: Vec<&Placed> = items
                .iter()
                .copied()
                .filter(|p| matches!(p.item, PlanItem::Visit(_)))
                .collect();

            let cards = visits_here
                .iter()
                .enumerate()
                .map(|(i, p)| CardPlacement {
                    placed: (*p).clone(),
                    offset_px: overlap_offset(slot, visits_here.len(), i, &occupied),
                })
                .collect();

            rows.push(TimelineRow::Slot {
                slot: slot.clone(),
                height_px: self.zoom.height_px(),
                cards,
            });

            for p in items {
                if let PlanItem::Bridge(b) = &p.item {
                    rows.push(TimelineRow::Gap {
                        placed: p.clone(),
                        bridge: b.clone(),
                    });
                }
            }
        }

        rows
    }
}
