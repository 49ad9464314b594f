//! Derives the displayed item set from raw rows plus the active filters.
//!
//! Pure functions: recomputed on every change of rows or filters, nothing
//! here is persisted.

use crate::errors::{AppError, AppResult};
use crate::models::bridge::Bridge;
use crate::models::category::{Category, District, Selection};
use crate::models::event::Event;
use crate::models::item::{Placed, PlanItem};
use crate::models::visit::Visit;
use chrono::NaiveDate;

/// Which collection the page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewKind {
    #[default]
    Events,
    Visits,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub date: Option<NaiveDate>,
    pub category: Selection<Category>,
    pub district: Selection<District>,
    /// Visits view only: keep just the visits without a visit time.
    pub unscheduled_only: bool,
}

impl FilterState {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    /// Build from raw CLI strings (`all` or a code/label).
    pub fn from_args(
        date: Option<NaiveDate>,
        category: Option<&str>,
        district: Option<&str>,
        unscheduled_only: bool,
    ) -> AppResult<Self> {
        let category = match category {
            None => Selection::All,
            Some(raw) => Selection::parse_with(raw, Category::from_code)
                .ok_or_else(|| AppError::InvalidCategory(raw.to_string()))?,
        };
        let district = match district {
            None => Selection::All,
            Some(raw) => Selection::parse_with(raw, District::from_code)
                .ok_or_else(|| AppError::InvalidDistrict(raw.to_string()))?,
        };

        Ok(Self {
            date,
            category,
            district,
            unscheduled_only,
        })
    }
}

/// Marker text: letters for events, 1-based numbers for timeline items.
pub fn marker_text(index: usize, view: ViewKind) -> String {
    match view {
        ViewKind::Events => match u8::try_from(index).ok().and_then(|i| 65u8.checked_add(i)) {
            Some(b) if b.is_ascii_uppercase() => (b as char).to_string(),
            // past `Z` keep going the way char codes do: A+26 = '[' ...
            _ => char::from_u32(65 + index as u32)
                .map(|c| c.to_string())
                .unwrap_or_else(|| format!("#{}", index + 1)),
        },
        ViewKind::Visits => (index + 1).to_string(),
    }
}

pub fn filter_events_by_date(events: &[Event], date: NaiveDate) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.is_open_on(date))
        .cloned()
        .collect()
}

fn filter_event_items(events: Vec<Event>, filters: &FilterState) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| filters.category.matches(Some(&e.category)))
        .filter(|e| filters.district.matches(e.district.as_ref()))
        .collect()
}

/// Events view: date span, then category and district.
pub fn filter_events(events: &[Event], filters: &FilterState) -> Vec<Placed> {
    let by_date = match filters.date {
        Some(d) => filter_events_by_date(events, d),
        None => events.to_vec(),
    };

    place(
        filter_event_items(by_date, filters)
            .into_iter()
            .map(PlanItem::Event)
            .collect(),
        ViewKind::Events,
    )
}

/// Visits view: visits and bridges on the selected local day, by time.
pub fn filter_timeline_items(
    visits: &[Visit],
    bridges: &[Bridge],
    filters: &FilterState,
) -> Vec<Placed> {
    let mut items: Vec<PlanItem> = visits
        .iter()
        .cloned()
        .map(PlanItem::Visit)
        .chain(bridges.iter().cloned().map(PlanItem::Bridge))
        .collect();

    if filters.unscheduled_only {
        items.retain(|it| it.visit_time().is_none());
    } else if let Some(d) = filters.date {
        items.retain(|it| it.visit_time().map(|t| t.date()) == Some(d));
    }

    sort_by_visit_time(&mut items);
    place(items, ViewKind::Visits)
}

/// Ascending by visit time; unscheduled items last; stable otherwise.
pub fn sort_by_visit_time(items: &mut [PlanItem]) {
    items.sort_by_key(|it| (it.visit_time().is_none(), it.visit_time()));
}

/// Assign `pin_idx` and marker text in output order.
pub fn place(items: Vec<PlanItem>, view: ViewKind) -> Vec<Placed> {
    items
        .into_iter()
        .enumerate()
        .map(|(pin_idx, item)| Placed {
            item,
            pin_idx,
            marker: marker_text(pin_idx, view),
        })
        .collect()
}

/// Single entry point used by the list, map and export commands.
pub fn apply_filters(
    view: ViewKind,
    events: &[Event],
    visits: &[Visit],
    bridges: &[Bridge],
    filters: &FilterState,
) -> Vec<Placed> {
    match view {
        ViewKind::Events => filter_events(events, filters),
        ViewKind::Visits => filter_timeline_items(visits, bridges, filters),
    }
}
