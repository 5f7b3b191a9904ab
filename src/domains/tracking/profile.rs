//! Feed profiles describe one backend flavour: where the snapshot lives, what
//! its fields are called and how the dashboard reacts to it. The two presets
//! correspond to the two backend APIs in circulation; every field can be
//! overridden from configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileName {
    /// `GET /api/simulation_data` with a combined entity list.
    SimulationData,
    /// `GET /api/update_simulation` with split vehicle/vessel lists.
    UpdateSimulation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum EntityLayout {
    /// One list, each item carrying a kind discriminator.
    Combined { list: String, kind_field: String },
    /// One list per kind.
    Split { vehicles: String, vessels: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampUnit {
    Seconds,
    Milliseconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    KilometresPerHour,
    Knots,
}

impl SpeedUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            SpeedUnit::KilometresPerHour => "km/h",
            SpeedUnit::Knots => "knots",
        }
    }
}

/// Names of the JSON fields the decoder reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub entity_layout: EntityLayout,
    pub id: String,
    pub latitude: String,
    pub longitude: String,
    pub speed: String,
    pub heading: String,
    pub events_list: String,
    pub event_type: String,
    pub event_description: String,
    pub event_timestamp: String,
    pub timestamp_unit: TimestampUnit,
    pub zones_list: String,
    pub zone_name: String,
    pub zone_radius: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChartFeed {
    /// Charts poll their own endpoints on a slower loop.
    Separate {
        counts_endpoint: String,
        recent_endpoint: String,
        /// Field holding the type of each item returned by `recent_endpoint`.
        recent_type_field: String,
        refresh_multiplier: u32,
    },
    /// The summary is fetched alongside every snapshot; both must succeed.
    Inline { summary_endpoint: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventMarkerPolicy {
    /// Clear every event marker and redraw from the snapshot.
    Replace,
    /// Reconcile event markers by id, like entities.
    TrackById,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonePolicy {
    /// A zone id once drawn is never updated or removed.
    AppendOnly,
    /// Clear every zone and redraw from the snapshot.
    Replace,
}

/// How alert titles show the event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTitleStyle {
    /// The type string exactly as sent.
    Raw,
    /// Underscores to spaces, upper-cased.
    Humanized,
}

/// Where a failed map cycle is reported besides the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureSurface {
    Notice,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedProfile {
    pub name: ProfileName,
    pub snapshot_endpoint: String,
    pub report_endpoint: String,
    pub fields: FieldMapping,
    pub vehicle_speed_unit: SpeedUnit,
    pub vessel_speed_unit: SpeedUnit,
    pub charts: ChartFeed,
    pub event_markers: EventMarkerPolicy,
    pub zones: ZonePolicy,
    pub alert_titles: AlertTitleStyle,
    pub failure_surface: FailureSurface,
}

impl FeedProfile {
    pub fn preset(name: ProfileName) -> Self {
        match name {
            ProfileName::SimulationData => Self::simulation_data(),
            ProfileName::UpdateSimulation => Self::update_simulation(),
        }
    }

    pub fn simulation_data() -> Self {
        Self {
            name: ProfileName::SimulationData,
            snapshot_endpoint: "/api/simulation_data".to_string(),
            report_endpoint: "/report_hazard".to_string(),
            fields: FieldMapping {
                entity_layout: EntityLayout::Combined {
                    list: "entities".to_string(),
                    kind_field: "type".to_string(),
                },
                id: "id".to_string(),
                latitude: "latitude".to_string(),
                longitude: "longitude".to_string(),
                speed: "speed_kmh".to_string(),
                heading: "heading_deg".to_string(),
                events_list: "events".to_string(),
                event_type: "type".to_string(),
                event_description: "description".to_string(),
                event_timestamp: "timestamp".to_string(),
                timestamp_unit: TimestampUnit::Seconds,
                zones_list: "hazard_zones".to_string(),
                zone_name: "name".to_string(),
                zone_radius: "radius_m".to_string(),
            },
            vehicle_speed_unit: SpeedUnit::KilometresPerHour,
            vessel_speed_unit: SpeedUnit::KilometresPerHour,
            charts: ChartFeed::Separate {
                counts_endpoint: "/api/event_counts".to_string(),
                recent_endpoint: "/api/events".to_string(),
                recent_type_field: "event_type".to_string(),
                refresh_multiplier: 2,
            },
            event_markers: EventMarkerPolicy::Replace,
            zones: ZonePolicy::Replace,
            alert_titles: AlertTitleStyle::Raw,
            failure_surface: FailureSurface::Notice,
        }
    }

    pub fn update_simulation() -> Self {
        Self {
            name: ProfileName::UpdateSimulation,
            snapshot_endpoint: "/api/update_simulation".to_string(),
            report_endpoint: "/report_hazard".to_string(),
            fields: FieldMapping {
                entity_layout: EntityLayout::Split {
                    vehicles: "vehicles".to_string(),
                    vessels: "vessels".to_string(),
                },
                id: "id".to_string(),
                latitude: "latitude".to_string(),
                longitude: "longitude".to_string(),
                speed: "speed".to_string(),
                heading: "heading".to_string(),
                events_list: "events".to_string(),
                event_type: "type".to_string(),
                event_description: "description".to_string(),
                event_timestamp: "timestamp".to_string(),
                timestamp_unit: TimestampUnit::Milliseconds,
                zones_list: "hazard_zones".to_string(),
                zone_name: "name".to_string(),
                zone_radius: "radius".to_string(),
            },
            vehicle_speed_unit: SpeedUnit::KilometresPerHour,
            vessel_speed_unit: SpeedUnit::Knots,
            charts: ChartFeed::Inline {
                summary_endpoint: "/api/events_summary".to_string(),
            },
            event_markers: EventMarkerPolicy::TrackById,
            zones: ZonePolicy::AppendOnly,
            alert_titles: AlertTitleStyle::Humanized,
            failure_surface: FailureSurface::Silent,
        }
    }

    /// Multiplier of the map interval used by a separate chart loop, if any.
    pub fn chart_refresh_multiplier(&self) -> Option<u32> {
        match &self.charts {
            ChartFeed::Separate { refresh_multiplier, .. } => Some((*refresh_multiplier).max(1)),
            ChartFeed::Inline { .. } => None,
        }
    }
}
