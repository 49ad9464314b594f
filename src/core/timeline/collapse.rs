//! Collapsing runs of empty hours into single summary rows.

use crate::errors::{AppError, AppResult};
use std::fmt;

/// First and last hour that may sit inside a collapsed range.
pub const FIRST_COLLAPSIBLE_HOUR: u32 = 1;
pub const LAST_COLLAPSIBLE_HOUR: u32 = 22;

/// Shortest run of empty hours worth collapsing.
pub const MIN_RUN: u32 = 2;

/// Inclusive hour range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
}

impl HourRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour <= self.end
    }

    pub fn drop_id(&self) -> String {
        format!("collapsed-{}-{}", self.start, self.end)
    }

    /// Parse `S-E` as typed on the command line.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let err = || AppError::InvalidRange(raw.to_string());
        let (a, b) = raw.trim().split_once('-').ok_or_else(err)?;
        let start: u32 = a.trim().parse().map_err(|_| err())?;
        let end: u32 = b.trim().parse().map_err(|_| err())?;
        if start > end || end > 23 {
            return Err(err());
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}

/// Maximal runs of at least `MIN_RUN` empty hours within hours 1..=22.
///
/// Runs touching hour 0 or 23 are clipped to that window first, so hours 0
/// and 23 are never part of a range. Pure: same occupancy, same ranges.
pub fn compute_collapsed_ranges(occupied: &[bool; 24]) -> Vec<HourRange> {
    let mut ranges = Vec::new();
    let mut run_start: Option<u32> = None;

    for h in FIRST_COLLAPSIBLE_HOUR..=LAST_COLLAPSIBLE_HOUR + 1 {
        let empty = h <= LAST_COLLAPSIBLE_HOUR && !occupied[h as usize];

        match (empty, run_start) {
            (true, None) => run_start = Some(h),
            (false, Some(s)) => {
                let range = HourRange::new(s, h - 1);
                if range.len() >= MIN_RUN {
                    ranges.push(range);
                }
                run_start = None;
            }
            _ => {}
        }
    }

    ranges
}

/// What a click on an hour header did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Unchanged,
    Expanded(HourRange),
    /// An empty hour joined one or two neighbouring ranges.
    Extended(HourRange),
    /// A range the user had opened was folded again.
    Recollapsed(HourRange),
}

/// Collapsed ranges of one day plus the ranges the user opened by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseState {
    ranges: Vec<HourRange>,
    user_expanded: Vec<HourRange>,
}

impl CollapseState {
    pub fn from_occupancy(occupied: &[bool; 24]) -> Self {
        let mut state = Self::default();
        state.recompute(occupied);
        state
    }

    pub fn ranges(&self) -> &[HourRange] {
        &self.ranges
    }

    pub fn user_expanded(&self) -> &[HourRange] {
        &self.user_expanded
    }

    pub fn range_at(&self, hour: u32) -> Option<HourRange> {
        self.ranges.iter().copied().find(|r| r.contains(hour))
    }

    pub fn is_collapsed(&self, hour: u32) -> bool {
        self.range_at(hour).is_some()
    }

    /// Re-derive ranges after the item set changed. A computed run identical
    /// to one the user expanded stays open; stale memories are dropped.
    pub fn recompute(&mut self, occupied: &[bool; 24]) {
        let computed = compute_collapsed_ranges(occupied);
        self.user_expanded.retain(|r| computed.contains(r));
        self.ranges = computed
            .into_iter()
            .filter(|r| !self.user_expanded.contains(r))
            .collect();
    }

    /// Open a collapsed range. Returns false if no such range is collapsed.
    pub fn expand(&mut self, range: HourRange) -> bool {
        let before = self.ranges.len();
        self.ranges.retain(|r| *r != range);
        if self.ranges.len() == before {
            return false;
        }
        if !self.user_expanded.contains(&range) {
            self.user_expanded.push(range);
        }
        true
    }

    pub fn expand_all(&mut self) {
        for r in std::mem::take(&mut self.ranges) {
            if !self.user_expanded.contains(&r) {
                self.user_expanded.push(r);
            }
        }
    }

    /// Click on the header of `hour`.
    pub fn toggle_hour(&mut self, hour: u32, occupied: &[bool; 24]) -> ToggleOutcome {
        if hour > 23 || occupied[hour as usize] {
            return ToggleOutcome::Unchanged;
        }

        if let Some(range) = self.range_at(hour) {
            self.expand(range);
            return ToggleOutcome::Expanded(range);
        }

        if !(FIRST_COLLAPSIBLE_HOUR..=LAST_COLLAPSIBLE_HOUR).contains(&hour) {
            return ToggleOutcome::Unchanged;
        }

        let before = self.ranges.iter().copied().find(|r| r.end + 1 == hour);
        let after = self.ranges.iter().copied().find(|r| r.start == hour + 1);

        let merged = match (before, after) {
            (Some(b), Some(a)) => Some(HourRange::new(b.start, a.end)),
            (Some(b), None) => Some(HourRange::new(b.start, hour)),
            (None, Some(a)) => Some(HourRange::new(hour, a.end)),
            (None, None) => None,
        };

        if let Some(range) = merged {
            self.ranges
                .retain(|r| Some(*r) != before && Some(*r) != after);
            self.ranges.push(range);
            self.ranges.sort();
            self.user_expanded.retain(|r| !r.contains(hour));
            return ToggleOutcome::Extended(range);
        }

        if let Some(range) = self.user_expanded.iter().copied().find(|r| r.contains(hour)) {
            self.user_expanded.retain(|r| *r != range);
            self.ranges.push(range);
            self.ranges.sort();
            return ToggleOutcome::Recollapsed(range);
        }

        ToggleOutcome::Unchanged
    }

    pub fn contains_range(&self, range: &HourRange) -> bool {
        self.ranges.contains(range)
    }
}
