use super::ports::MarkerStyle;
use super::reconciler::MarkerSpec;
use crate::domains::charts::humanize_label;
use crate::domains::tracking::{EntityKind, Event, HazardZone, SpeedUnit, TrackedEntity};

pub fn entity_label(entity: &TrackedEntity, unit: SpeedUnit) -> String {
    format!(
        "{} ({})\nSpeed: {:.1} {}\nHeading: {:.0}°",
        entity.id,
        entity.kind.display_name(),
        entity.speed,
        unit.suffix(),
        entity.heading
    )
}

pub fn event_label(event: &Event) -> String {
    format!(
        "{}\n{}\nTime: {}",
        humanize_label(&event.type_label),
        event.description,
        event.timestamp.format("%H:%M:%S")
    )
}

pub fn zone_label(zone: &HazardZone) -> String {
    format!("Hazard Zone: {}\nRadius: {}m", zone.name, zone.radius_meters)
}

pub fn entity_marker(entity: &TrackedEntity, unit: SpeedUnit) -> MarkerSpec {
    MarkerSpec {
        id: entity.id.clone(),
        position: entity.position(),
        label: entity_label(entity, unit),
        style: match entity.kind {
            EntityKind::Vehicle => MarkerStyle::Vehicle,
            EntityKind::Vessel => MarkerStyle::Vessel,
        },
    }
}

/// `None` for events without a location.
pub fn event_marker(event: &Event) -> Option<MarkerSpec> {
    let position = event.location?;
    Some(MarkerSpec {
        id: event.id.clone(),
        position,
        label: event_label(event),
        style: MarkerStyle::Event(event.event_type.category()),
    })
}

pub fn zone_marker(zone: &HazardZone) -> MarkerSpec {
    MarkerSpec {
        id: zone.id.clone(),
        position: zone.center(),
        label: zone_label(zone),
        style: MarkerStyle::Zone { radius_meters: zone.radius_meters },
    }
}
