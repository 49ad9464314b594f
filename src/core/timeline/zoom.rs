use crate::errors::{AppError, AppResult};

/// Timeline zoom presets: slot length in minutes and row height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomLevel {
    #[default]
    Hour,
    HalfHour,
    Quarter,
    TenMinutes,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 4] = [
        ZoomLevel::Hour,
        ZoomLevel::HalfHour,
        ZoomLevel::Quarter,
        ZoomLevel::TenMinutes,
    ];

    pub fn interval_minutes(&self) -> i64 {
        match self {
            ZoomLevel::Hour => 60,
            ZoomLevel::HalfHour => 30,
            ZoomLevel::Quarter => 15,
            ZoomLevel::TenMinutes => 10,
        }
    }

    pub fn height_px(&self) -> u32 {
        match self {
            ZoomLevel::Hour => 60,
            ZoomLevel::HalfHour => 80,
            ZoomLevel::Quarter => 100,
            ZoomLevel::TenMinutes => 120,
        }
    }

    pub fn slots_per_day(&self) -> usize {
        (24 * 60 / self.interval_minutes()) as usize
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        ZoomLevel::ALL
            .into_iter()
            .find(|z| z.interval_minutes() == minutes as i64)
    }

    /// Parse `60`, `30`, `15`, `10` (an optional `m`/`min` suffix is allowed).
    pub fn parse(raw: &str) -> AppResult<Self> {
        let digits = raw
            .trim()
            .trim_end_matches("min")
            .trim_end_matches('m')
            .trim();
        digits
            .parse::<u32>()
            .ok()
            .and_then(ZoomLevel::from_minutes)
            .ok_or_else(|| AppError::InvalidZoom(raw.to_string()))
    }
}
