//! Drag source / drop target ids.
//!
//! `visit-<id>` names a draggable card, `timeslot-<epochMillis>` a slot and
//! `collapsed-<start>-<end>` a folded hour range.

use super::collapse::HourRange;
use crate::errors::{AppError, AppResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Visit(i64),
}

impl DragSource {
    /// `visit-12`, or a bare `12`.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let s = raw.trim();
        let id_part = s.strip_prefix("visit-").unwrap_or(s);
        id_part
            .parse::<i64>()
            .map(DragSource::Visit)
            .map_err(|_| AppError::InvalidDropId(raw.to_string()))
    }

    pub fn visit_id(&self) -> i64 {
        match self {
            DragSource::Visit(id) => *id,
        }
    }
}

impl fmt::Display for DragSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragSource::Visit(id) => write!(f, "visit-{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Slot(i64),
    Collapsed(HourRange),
}

impl DropTarget {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let s = raw.trim();
        let err = || AppError::InvalidDropId(raw.to_string());

        if let Some(ms) = s.strip_prefix("timeslot-") {
            return ms.parse::<i64>().map(DropTarget::Slot).map_err(|_| err());
        }

        if let Some(rest) = s.strip_prefix("collapsed-") {
            return HourRange::parse(rest)
                .map(DropTarget::Collapsed)
                .map_err(|_| err());
        }

        Err(err())
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Slot(ms) => write!(f, "timeslot-{ms}"),
            DropTarget::Collapsed(r) => write!(f, "{}", r.drop_id()),
        }
    }
}
