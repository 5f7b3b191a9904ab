use crate::common::{GeoPoint, MapView};
use crate::domains::tracking::EventCategory;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Vehicles,
    Vessels,
    Events,
    HazardZones,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerStyle {
    Vehicle,
    Vessel,
    Event(EventCategory),
    Zone { radius_meters: f64 },
}

/// Port to the map display. The display owns the markers; the dashboard only
/// keeps the opaque handles it gets back.
pub trait MarkerSurface: Send {
    type Handle: Clone + Eq + Hash + Debug + Send + Sync;

    fn set_view(&mut self, view: MapView);

    fn add_marker(&mut self, layer: Layer, style: MarkerStyle, at: GeoPoint, label: &str) -> Self::Handle;

    fn move_marker(&mut self, handle: &Self::Handle, to: GeoPoint);

    fn set_label(&mut self, handle: &Self::Handle, label: &str);

    fn remove_marker(&mut self, handle: &Self::Handle);
}
