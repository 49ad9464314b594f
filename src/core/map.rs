//! Markers, bounds and selection for the map screen.

use crate::models::event::Coords;
use crate::models::item::{Placed, PlanItem};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: String,
    pub pin_idx: usize,
    pub coords: Coords,
    pub title: String,
    /// Events get a square badge, visits a round one.
    pub is_event: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Bounds {
    pub fn center(&self) -> Coords {
        Coords::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn contains(&self, c: &Coords) -> bool {
        (self.min_lat..=self.max_lat).contains(&c.lat)
            && (self.min_lng..=self.max_lng).contains(&c.lng)
    }
}

/// One marker per item with coordinates; the rest are skipped.
pub fn build_markers(items: &[Placed]) -> Vec<Marker> {
    items
        .iter()
        .filter_map(|p| {
            let coords = p.coords()?;
            Some(Marker {
                label: p.marker.clone(),
                pin_idx: p.pin_idx,
                coords,
                title: p.item.title(),
                is_event: matches!(p.item, PlanItem::Event(_)),
            })
        })
        .collect()
}

/// Smallest box holding every marker, `None` without markers.
pub fn fit_bounds(markers: &[Marker]) -> Option<Bounds> {
    let first = markers.first()?.coords;
    let init = Bounds {
        min_lat: first.lat,
        min_lng: first.lng,
        max_lat: first.lat,
        max_lng: first.lng,
    };

    Some(markers.iter().fold(init, |b, m| Bounds {
        min_lat: b.min_lat.min(m.coords.lat),
        min_lng: b.min_lng.min(m.coords.lng),
        max_lat: b.max_lat.max(m.coords.lat),
        max_lng: b.max_lng.max(m.coords.lng),
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    items: Vec<Placed>,
    markers: Vec<Marker>,
    bounds: Option<Bounds>,
    selected: Option<usize>,
}

impl MapView {
    pub fn new(items: Vec<Placed>) -> Self {
        let markers = build_markers(&items);
        let bounds = fit_bounds(&markers);
        Self {
            items,
            markers,
            bounds,
            selected: None,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Items that have no marker because their coordinates are missing.
    pub fn unplaced(&self) -> impl Iterator<Item = &Placed> {
        self.items.iter().filter(|p| p.coords().is_none())
    }

    /// Select the item behind a marker label (case-insensitive).
    pub fn select(&mut self, label: &str) -> Option<&Placed> {
        let wanted = label.trim();
        self.selected = self
            .items
            .iter()
            .position(|p| p.marker.eq_ignore_ascii_case(wanted));
        self.selected()
    }

    pub fn selected(&self) -> Option<&Placed> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
