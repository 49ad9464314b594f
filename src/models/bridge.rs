use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeType {
    Transport,
    Rest,
    Generic,
}

impl BridgeType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BridgeType::Transport => "transport",
            BridgeType::Rest => "rest",
            BridgeType::Generic => "generic",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "transport" => Some(BridgeType::Transport),
            "rest" => Some(BridgeType::Rest),
            "generic" => Some(BridgeType::Generic),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        BridgeType::from_db_str(&code.trim().to_lowercase())
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BridgeType::Transport => "🚌",
            BridgeType::Rest => "☕",
            BridgeType::Generic => "⏱",
        }
    }
}

/// A gap activity (transport, rest, ...) placed between visits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bridge {
    pub id: i64,
    pub event_id: Option<i64>,
    pub bridge_type: BridgeType,
    pub duration: i32, // minutes
    pub location: Option<String>,
    pub visit_time: Option<NaiveDateTime>,
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: Option<NaiveDateTime>,
    pub reservation_url: Option<String>,
    pub reference_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl Bridge {
    pub fn visit_date(&self) -> Option<NaiveDate> {
        self.visit_time.map(|t| t.date())
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.visit_time
            .map(|t| t + chrono::Duration::minutes(self.duration as i64))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeRecord {
    pub event_id: Option<i64>,
    pub bridge_type: BridgeType,
    pub duration: i32,
    pub location: Option<String>,
    pub visit_time: Option<NaiveDateTime>,
    pub visit_order: i32,
    pub is_reserved: bool,
    pub reservation_time: Option<NaiveDateTime>,
    pub reservation_url: Option<String>,
    pub reference_url: Option<String>,
    pub notes: Option<String>,
}

impl From<&Bridge> for BridgeRecord {
    fn from(b: &Bridge) -> Self {
        Self {
            event_id: b.event_id,
            bridge_type: b.bridge_type,
            duration: b.duration,
            location: b.location.clone(),
            visit_time: b.visit_time,
            visit_order: b.visit_order,
            is_reserved: b.is_reserved,
            reservation_time: b.reservation_time,
            reservation_url: b.reservation_url.clone(),
            reference_url: b.reference_url.clone(),
            notes: b.notes.clone(),
        }
    }
}
