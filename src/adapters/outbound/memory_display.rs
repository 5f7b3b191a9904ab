use crate::common::{GeoPoint, MapView};
use crate::domains::charts::{ChartDataset, ChartKind, ChartSurface};
use crate::domains::map::{Layer, MarkerStyle, MarkerSurface};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub Uuid);

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    pub layer: Layer,
    pub style: MarkerStyle,
    pub position: GeoPoint,
    pub label: String,
}

/// Running totals of display operations since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCounters {
    pub created: usize,
    pub moved: usize,
    pub relabelled: usize,
    pub removed: usize,
}

/// Headless map display. Holds markers in memory; used by the binary and
/// by tests to observe what would be on screen.
#[derive(Debug, Default)]
pub struct InMemoryMap {
    view: Option<MapView>,
    markers: HashMap<MarkerHandle, PlacedMarker>,
    counters: DisplayCounters,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<MapView> {
        self.view
    }

    pub fn marker(&self, handle: &MarkerHandle) -> Option<&PlacedMarker> {
        self.markers.get(handle)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn count_on(&self, layer: Layer) -> usize {
        self.markers.values().filter(|m| m.layer == layer).count()
    }

    pub fn counters(&self) -> DisplayCounters {
        self.counters
    }
}

impl MarkerSurface for InMemoryMap {
    type Handle = MarkerHandle;

    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn add_marker(&mut self, layer: Layer, style: MarkerStyle, at: GeoPoint, label: &str) -> MarkerHandle {
        let handle = MarkerHandle(Uuid::new_v4());
        self.markers.insert(
            handle,
            PlacedMarker {
                layer,
                style,
                position: at,
                label: label.to_string(),
            },
        );
        self.counters.created += 1;
        handle
    }

    fn move_marker(&mut self, handle: &MarkerHandle, to: GeoPoint) {
        if let Some(marker) = self.markers.get_mut(handle) {
            marker.position = to;
            self.counters.moved += 1;
        }
    }

    fn set_label(&mut self, handle: &MarkerHandle, label: &str) {
        if let Some(marker) = self.markers.get_mut(handle) {
            marker.label = label.to_string();
            self.counters.relabelled += 1;
        }
    }

    fn remove_marker(&mut self, handle: &MarkerHandle) {
        if self.markers.remove(handle).is_some() {
            self.counters.removed += 1;
        }
    }
}

/// Headless chart display keeping the latest dataset per chart.
#[derive(Debug, Default)]
pub struct InMemoryCharts {
    datasets: HashMap<ChartKind, ChartDataset>,
    updates: usize,
}

impl InMemoryCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self, kind: ChartKind) -> Option<&ChartDataset> {
        self.datasets.get(&kind)
    }

    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl ChartSurface for InMemoryCharts {
    fn update_chart(&mut self, kind: ChartKind, dataset: ChartDataset) {
        self.datasets.insert(kind, dataset);
        self.updates += 1;
    }
}
