//! Address ⇄ coordinate lookups.
//!
//! The planner only needs the first match and its status; callers ignore
//! anything that is not `Ok`.

use crate::models::event::{Coords, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeStatus {
    Ok,
    ZeroResult,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub coords: Coords,
    pub road_address: Option<String>,
    pub jibun_address: Option<String>,
}

impl GeocodeMatch {
    /// Road address first, lot-number address otherwise.
    pub fn display_address(&self) -> Option<String> {
        self.road_address
            .clone()
            .or_else(|| self.jibun_address.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResponse {
    pub status: GeocodeStatus,
    pub results: Vec<GeocodeMatch>,
}

impl GeocodeResponse {
    pub fn zero() -> Self {
        Self {
            status: GeocodeStatus::ZeroResult,
            results: Vec::new(),
        }
    }

    pub fn found(m: GeocodeMatch) -> Self {
        Self {
            status: GeocodeStatus::Ok,
            results: vec![m],
        }
    }

    /// First match, only when the lookup succeeded.
    pub fn first_ok(&self) -> Option<&GeocodeMatch> {
        match self.status {
            GeocodeStatus::Ok => self.results.first(),
            _ => None,
        }
    }
}

pub trait Geocoder {
    fn forward(&self, address: &str) -> GeocodeResponse;
    fn reverse(&self, coords: Coords) -> GeocodeResponse;
}

/// Radius inside which a stored place answers a reverse lookup.
pub const DEFAULT_REVERSE_RADIUS_M: f64 = 250.0;

/// Resolves against the places already stored as events.
#[derive(Debug, Clone)]
pub struct KnownPlacesGeocoder {
    places: Vec<GeocodeMatch>,
    addresses: Vec<String>,
    radius_m: f64,
}

impl KnownPlacesGeocoder {
    pub fn from_events(events: &[Event]) -> Self {
        let mut places = Vec::new();
        let mut addresses = Vec::new();

        for ev in events {
            let Some(coords) = ev.coords else {
                continue;
            };
            let road = ev.road_address.clone().or_else(|| ev.address.clone());
            places.push(GeocodeMatch {
                coords,
                road_address: road,
                jibun_address: ev.jibun_address.clone(),
            });
            addresses.push(
                [&ev.address, &ev.road_address, &ev.jibun_address]
                    .into_iter()
                    .flatten()
                    .map(|a| a.trim().to_lowercase())
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }

        Self {
            places,
            addresses,
            radius_m: DEFAULT_REVERSE_RADIUS_M,
        }
    }

    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.radius_m = radius_m;
        self
    }
}

impl Geocoder for KnownPlacesGeocoder {
    fn forward(&self, address: &str) -> GeocodeResponse {
        let needle = address.trim().to_lowercase();
        if needle.is_empty() {
            return GeocodeResponse::zero();
        }

        self.addresses
            .iter()
            .position(|hay| hay.lines().any(|a| a == needle))
            .map(|i| GeocodeResponse::found(self.places[i].clone()))
            .unwrap_or_else(GeocodeResponse::zero)
    }

    fn reverse(&self, coords: Coords) -> GeocodeResponse {
        if !coords.lat.is_finite() || !coords.lng.is_finite() {
            return GeocodeResponse {
                status: GeocodeStatus::Error,
                results: Vec::new(),
            };
        }

        self.places
            .iter()
            .map(|p| (p, p.coords.distance_m(&coords)))
            .filter(|(_, d)| *d <= self.radius_m)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| {
                GeocodeResponse::found(GeocodeMatch {
                    coords,
                    ..p.clone()
                })
            })
            .unwrap_or_else(GeocodeResponse::zero)
    }
}
