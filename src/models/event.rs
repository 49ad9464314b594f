use super::category::{Category, District};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// Geographic point (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_m(&self, other: &Coords) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos()
                * other.lat.to_radians().cos()
                * (d_lng / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,       // ⇔ events.start_date (TEXT "YYYY-MM-DD")
    pub end_date: NaiveDate,         // ⇔ events.end_date
    pub open_time: Option<NaiveTime>, // ⇔ events.open_time (TEXT "HH:MM")
    pub close_time: Option<NaiveTime>,
    pub address: Option<String>,
    pub road_address: Option<String>,
    pub jibun_address: Option<String>,
    pub coords: Option<Coords>, // ⇔ events.lat / events.lng (both or none)
    pub need_reservation: bool,
    pub category: Category,
    pub district: Option<District>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub created_at: String, // ISO8601
}

impl Event {
    /// Inclusive on both ends.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn date_range_str(&self) -> String {
        format!(
            "{} ~ {}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }

    pub fn hours_str(&self) -> String {
        let fmt = |t: Option<NaiveTime>| {
            t.map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string())
        };
        format!("{} ~ {}", fmt(self.open_time), fmt(self.close_time))
    }
}

/// Plain record handed to the store when creating or updating an event.
/// It carries no identity and none of the derived display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub address: Option<String>,
    pub road_address: Option<String>,
    pub jibun_address: Option<String>,
    pub coords: Option<Coords>,
    pub need_reservation: bool,
    pub category: Category,
    pub district: Option<District>,
    pub url: Option<String>,
    pub content: Option<String>,
}

impl EventRecord {
    pub fn into_event(self, id: i64) -> Event {
        Event {
            id,
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            open_time: self.open_time,
            close_time: self.close_time,
            address: self.address,
            road_address: self.road_address,
            jibun_address: self.jibun_address,
            coords: self.coords,
            need_reservation: self.need_reservation,
            category: self.category,
            district: self.district,
            url: self.url,
            content: self.content,
            created_at: Local::now().to_rfc3339(),
        }
    }
}

impl From<&Event> for EventRecord {
    fn from(ev: &Event) -> Self {
        Self {
            name: ev.name.clone(),
            description: ev.description.clone(),
            start_date: ev.start_date,
            end_date: ev.end_date,
            open_time: ev.open_time,
            close_time: ev.close_time,
            address: ev.address.clone(),
            road_address: ev.road_address.clone(),
            jibun_address: ev.jibun_address.clone(),
            coords: ev.coords,
            need_reservation: ev.need_reservation,
            category: ev.category,
            district: ev.district,
            url: ev.url.clone(),
            content: ev.content.clone(),
        }
    }
}
