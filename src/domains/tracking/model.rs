use crate::common::GeoPoint;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Vehicle,
    Vessel,
}

impl EntityKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Vehicle => "Vehicle",
            EntityKind::Vessel => "Vessel",
        }
    }

    /// Matches the backend's `type` discriminator (`"vehicle"`, `"Vessel"`, ...).
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vehicle" => Some(EntityKind::Vehicle),
            "vessel" => Some(EntityKind::Vessel),
            _ => None,
        }
    }
}

/// A moving object with a live position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    pub id: String,
    pub kind: EntityKind,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: f64,
}

impl TrackedEntity {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Congestion,
    AccidentRisk,
    DamagedRoad,
    RoughWeather,
    DistressCall,
    UserReportedHazard,
    Other(String),
}

// Keys are normalized with `normalize_type_key`; both backends' spellings land here.
static EVENT_TYPE_ALIASES: Lazy<HashMap<&'static str, EventType>> = Lazy::new(|| {
    HashMap::from([
        ("congestion", EventType::Congestion),
        ("accident_risk", EventType::AccidentRisk),
        ("damaged_road", EventType::DamagedRoad),
        ("damaged_road_hazard", EventType::DamagedRoad),
        ("rough_weather", EventType::RoughWeather),
        ("distress_call", EventType::DistressCall),
        ("user_reported_hazard", EventType::UserReportedHazard),
    ])
});

fn normalize_type_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if !key.ends_with('_') {
            key.push('_');
        }
    }
    key.trim_matches('_').to_string()
}

impl EventType {
    pub fn parse(raw: &str) -> Self {
        EVENT_TYPE_ALIASES
            .get(normalize_type_key(raw).as_str())
            .cloned()
            .unwrap_or_else(|| EventType::Other(raw.trim().to_string()))
    }

    pub fn category(&self) -> EventCategory {
        match self {
            EventType::Congestion => EventCategory::Congestion,
            EventType::AccidentRisk => EventCategory::Accident,
            EventType::DamagedRoad | EventType::UserReportedHazard => EventCategory::Hazard,
            EventType::RoughWeather | EventType::DistressCall => EventCategory::Maritime,
            EventType::Other(name) => {
                let lower = name.to_ascii_lowercase();
                if lower.contains("hazard") {
                    EventCategory::Hazard
                } else if lower.contains("weather") || lower.contains("distress") {
                    EventCategory::Maritime
                } else {
                    EventCategory::Uncategorized
                }
            }
        }
    }
}

/// Visual grouping shared by alert items and event markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Congestion,
    Accident,
    Hazard,
    Maritime,
    Uncategorized,
}

impl EventCategory {
    pub fn css_class(&self) -> &'static str {
        match self {
            EventCategory::Congestion => "congestion",
            EventCategory::Accident => "accident",
            EventCategory::Hazard => "hazard",
            EventCategory::Maritime => "maritime",
            EventCategory::Uncategorized => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub event_type: EventType,
    /// The type string exactly as the backend sent it.
    pub type_label: String,
    pub description: String,
    pub location: Option<GeoPoint>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardZone {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

impl HazardZone {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// One bar/slice of a summary chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub count: u64,
}

/// Normalized content of one poll response, whatever the payload layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub vehicles: Vec<TrackedEntity>,
    pub vessels: Vec<TrackedEntity>,
    pub events: Vec<Event>,
    pub hazard_zones: Vec<HazardZone>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vehicles, {} vessels, {} events, {} zones",
            self.vehicles.len(),
            self.vessels.len(),
            self.events.len(),
            self.hazard_zones.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_wire_spellings() {
        assert_eq!(EventType::parse("accident_risk"), EventType::AccidentRisk);
        assert_eq!(EventType::parse("Accident Risk"), EventType::AccidentRisk);
        assert_eq!(EventType::parse("Damaged Road/Hazard"), EventType::DamagedRoad);
        assert_eq!(EventType::parse("damaged_road"), EventType::DamagedRoad);
        assert_eq!(EventType::parse("User Reported Hazard"), EventType::UserReportedHazard);
        assert_eq!(
            EventType::parse("Fog Bank"),
            EventType::Other("Fog Bank".to_string())
        );
    }

    #[test]
    fn categories_follow_type() {
        assert_eq!(EventType::Congestion.category(), EventCategory::Congestion);
        assert_eq!(EventType::DistressCall.category(), EventCategory::Maritime);
        assert_eq!(
            EventType::Other("Debris Hazard".into()).category(),
            EventCategory::Hazard
        );
        assert_eq!(
            EventType::Other("Parade".into()).category(),
            EventCategory::Uncategorized
        );
        assert_eq!(EventCategory::Uncategorized.css_class(), "");
    }

    #[test]
    fn entity_kind_is_case_insensitive() {
        assert_eq!(EntityKind::from_wire("Vessel"), Some(EntityKind::Vessel));
        assert_eq!(EntityKind::from_wire("vehicle"), Some(EntityKind::Vehicle));
        assert_eq!(EntityKind::from_wire("drone"), None);
    }
}
