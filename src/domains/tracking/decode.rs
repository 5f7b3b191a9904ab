use super::model::{EntityKind, Event, EventType, HazardZone, Snapshot, SummaryRow, TrackedEntity};
use super::profile::{EntityLayout, FieldMapping, TimestampUnit};
use crate::common::{DomainError, DomainResult, GeoPoint};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

const SQL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn missing(field: &str) -> DomainError {
    DomainError::MissingField { field: field.to_string() }
}

fn as_object<'a>(value: &'a Value, field: &str) -> DomainResult<&'a Object> {
    value.as_object().ok_or_else(|| missing(field))
}

fn list<'a>(root: &'a Object, field: &str) -> DomainResult<&'a [Value]> {
    root.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| missing(field))
}

fn number(obj: &Object, field: &str) -> DomainResult<f64> {
    obj.get(field).and_then(Value::as_f64).ok_or_else(|| missing(field))
}

fn text(obj: &Object, field: &str) -> DomainResult<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| missing(field))
}

/// Ids come as strings from one backend and as SQL integers from the other.
fn identifier(obj: &Object, field: &str) -> Option<String> {
    match obj.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn count(obj: &Object) -> DomainResult<u64> {
    let value = obj.get("count").ok_or_else(|| missing("count"))?;
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
        .ok_or_else(|| missing("count"))
}

pub fn parse_timestamp(value: &Value, unit: TimestampUnit) -> DomainResult<DateTime<Utc>> {
    let invalid = || DomainError::InvalidTimestamp { raw: value.to_string() };
    match value {
        Value::Number(n) => {
            let raw = n.as_f64().ok_or_else(invalid)?;
            let millis = match unit {
                TimestampUnit::Seconds => (raw * 1000.0).round(),
                TimestampUnit::Milliseconds => raw.round(),
            };
            DateTime::<Utc>::from_timestamp_millis(millis as i64).ok_or_else(invalid)
        }
        Value::String(s) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Ok(parsed.with_timezone(&Utc));
            }
            SQL_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

fn decode_entity(value: &Value, kind: EntityKind, fields: &FieldMapping) -> DomainResult<TrackedEntity> {
    let obj = as_object(value, &fields.id)?;
    Ok(TrackedEntity {
        id: identifier(obj, &fields.id).ok_or_else(|| missing(&fields.id))?,
        kind,
        latitude: number(obj, &fields.latitude)?,
        longitude: number(obj, &fields.longitude)?,
        speed: number(obj, &fields.speed)?,
        heading: number(obj, &fields.heading)?,
    })
}

fn decode_event(index: usize, value: &Value, fields: &FieldMapping) -> DomainResult<Event> {
    let obj = as_object(value, &fields.events_list)?;
    let type_label = text(obj, &fields.event_type)?;
    let location = match (
        obj.get(&fields.latitude).and_then(Value::as_f64),
        obj.get(&fields.longitude).and_then(Value::as_f64),
    ) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };
    let timestamp = obj
        .get(&fields.event_timestamp)
        .ok_or_else(|| missing(&fields.event_timestamp))?;

    Ok(Event {
        id: identifier(obj, &fields.id).unwrap_or_else(|| format!("event-{}", index)),
        event_type: EventType::parse(&type_label),
        type_label,
        description: text(obj, &fields.event_description).unwrap_or_default(),
        location,
        timestamp: parse_timestamp(timestamp, fields.timestamp_unit)?,
    })
}

fn decode_zone(value: &Value, fields: &FieldMapping) -> DomainResult<HazardZone> {
    let obj = as_object(value, &fields.zones_list)?;
    let name = text(obj, &fields.zone_name)?;
    Ok(HazardZone {
        id: identifier(obj, &fields.id).unwrap_or_else(|| name.clone()),
        name,
        latitude: number(obj, &fields.latitude)?,
        longitude: number(obj, &fields.longitude)?,
        radius_meters: number(obj, &fields.zone_radius)?,
    })
}

/// Decode a snapshot payload of any layout into the normalized [`Snapshot`].
/// Entities with an unknown kind discriminator are dropped.
pub fn decode_snapshot(payload: &Value, fields: &FieldMapping) -> DomainResult<Snapshot> {
    let root = as_object(payload, "snapshot")?;
    let mut snapshot = Snapshot::default();

    match &fields.entity_layout {
        EntityLayout::Combined { list: key, kind_field } => {
            for item in list(root, key)? {
                let kind = item
                    .get(kind_field)
                    .and_then(Value::as_str)
                    .and_then(EntityKind::from_wire);
                match kind {
                    Some(EntityKind::Vehicle) => {
                        snapshot.vehicles.push(decode_entity(item, EntityKind::Vehicle, fields)?)
                    }
                    Some(EntityKind::Vessel) => {
                        snapshot.vessels.push(decode_entity(item, EntityKind::Vessel, fields)?)
                    }
                    None => {}
                }
            }
        }
        EntityLayout::Split { vehicles, vessels } => {
            snapshot.vehicles = list(root, vehicles)?
                .iter()
                .map(|v| decode_entity(v, EntityKind::Vehicle, fields))
                .collect::<DomainResult<_>>()?;
            snapshot.vessels = list(root, vessels)?
                .iter()
                .map(|v| decode_entity(v, EntityKind::Vessel, fields))
                .collect::<DomainResult<_>>()?;
        }
    }

    snapshot.events = list(root, &fields.events_list)?
        .iter()
        .enumerate()
        .map(|(i, v)| decode_event(i, v, fields))
        .collect::<DomainResult<_>>()?;
    snapshot.hazard_zones = list(root, &fields.zones_list)?
        .iter()
        .map(|v| decode_zone(v, fields))
        .collect::<DomainResult<_>>()?;

    Ok(snapshot)
}

/// `[{type, count}]` or `[{event_type, count}]`, order preserved.
pub fn decode_summary(payload: &Value) -> DomainResult<Vec<SummaryRow>> {
    let rows = payload.as_array().ok_or_else(|| missing("summary"))?;
    rows.iter()
        .map(|row| {
            let obj = as_object(row, "summary")?;
            let label = text(obj, "type").or_else(|_| text(obj, "event_type"))?;
            Ok(SummaryRow { label, count: count(obj)? })
        })
        .collect()
}

/// The type string of every item in an event list, in order.
pub fn decode_type_labels(payload: &Value, type_field: &str) -> DomainResult<Vec<String>> {
    let items = payload.as_array().ok_or_else(|| missing("events"))?;
    items
        .iter()
        .map(|item| text(as_object(item, type_field)?, type_field))
        .collect()
}

/// The confirmation message of a hazard report response.
pub fn decode_report_ack(payload: &Value) -> DomainResult<String> {
    text(as_object(payload, "message")?, "message")
}
