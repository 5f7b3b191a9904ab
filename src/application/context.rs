use crate::common::MapView;
use crate::domains::alerts::{AlertFeed, HeaderStats, UserNotice};
use crate::domains::charts::{ChartDataset, ChartKind, ChartSurface};
use crate::domains::map::{
    append_new, entity_marker, event_marker, reconcile, zone_marker, Layer, MarkerRegistry,
    MarkerSpec, MarkerSurface, ReconcileReport, TransientLayer,
};
use crate::domains::tracking::{EventMarkerPolicy, FeedProfile, Snapshot, ZonePolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monotonic request number taken before a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    Map,
    Charts,
}

/// Per-layer outcome of applying one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub vehicles: ReconcileReport,
    pub vessels: ReconcileReport,
    pub events: ReconcileReport,
    pub zones: ReconcileReport,
}

/// Everything the dashboard draws on, plus the state needed to keep it in
/// sync with the backend. One instance lives for the whole session.
pub struct DashboardContext<M: MarkerSurface, C: ChartSurface> {
    markers: M,
    charts: C,
    vehicles: MarkerRegistry<M::Handle>,
    vessels: MarkerRegistry<M::Handle>,
    tracked_events: MarkerRegistry<M::Handle>,
    event_layer: TransientLayer<M::Handle>,
    zones: MarkerRegistry<M::Handle>,
    zone_layer: TransientLayer<M::Handle>,
    alerts: AlertFeed,
    stats: HeaderStats,
    notice: Option<UserNotice>,
    applied_map: Option<Generation>,
    applied_charts: Option<Generation>,
    view: Option<MapView>,
}

impl<M: MarkerSurface, C: ChartSurface> DashboardContext<M, C> {
    pub fn new(markers: M, charts: C) -> Self {
        Self {
            markers,
            charts,
            vehicles: MarkerRegistry::new(),
            vessels: MarkerRegistry::new(),
            tracked_events: MarkerRegistry::new(),
            event_layer: TransientLayer::default(),
            zones: MarkerRegistry::new(),
            zone_layer: TransientLayer::default(),
            alerts: AlertFeed::default(),
            stats: HeaderStats::default(),
            notice: None,
            applied_map: None,
            applied_charts: None,
            view: None,
        }
    }

    pub fn initialize(&mut self, view: MapView) {
        self.markers.set_view(view);
        self.view = Some(view);
    }

    pub fn is_initialized(&self) -> bool {
        self.view.is_some()
    }

    /// Remove every marker this context placed and forget all state.
    pub fn teardown(&mut self) {
        let registries = [
            &mut self.vehicles,
            &mut self.vessels,
            &mut self.tracked_events,
            &mut self.zones,
        ];
        for registry in registries {
            for handle in registry.drain() {
                self.markers.remove_marker(&handle);
            }
        }
        self.event_layer.clear(&mut self.markers);
        self.zone_layer.clear(&mut self.markers);
        self.alerts = AlertFeed::default();
        self.stats = HeaderStats::default();
        self.notice = None;
        self.applied_map = None;
        self.applied_charts = None;
        self.view = None;
    }

    /// Accept `generation` for `stream` unless a newer one was already
    /// applied. Equal generations are accepted so that one cycle can apply
    /// several responses.
    pub fn claim(&mut self, stream: Stream, generation: Generation) -> bool {
        let slot = match stream {
            Stream::Map => &mut self.applied_map,
            Stream::Charts => &mut self.applied_charts,
        };
        if matches!(*slot, Some(applied) if applied > generation) {
            return false;
        }
        *slot = Some(generation);
        true
    }

    pub fn is_stale(&self, stream: Stream, generation: Generation) -> bool {
        let applied = match stream {
            Stream::Map => self.applied_map,
            Stream::Charts => self.applied_charts,
        };
        applied.map_or(false, |applied| applied > generation)
    }

    pub fn apply_snapshot(&mut self, snapshot: &Snapshot, profile: &FeedProfile, at: DateTime<Utc>) -> ApplyReport {
        let vehicles: Vec<MarkerSpec> = snapshot
            .vehicles
            .iter()
            .map(|e| entity_marker(e, profile.vehicle_speed_unit))
            .collect();
        let vessels: Vec<MarkerSpec> = snapshot
            .vessels
            .iter()
            .map(|e| entity_marker(e, profile.vessel_speed_unit))
            .collect();
        let events: Vec<MarkerSpec> = snapshot.events.iter().filter_map(event_marker).collect();
        let zones: Vec<MarkerSpec> = snapshot.hazard_zones.iter().map(zone_marker).collect();

        let report = ApplyReport {
            vehicles: reconcile(&mut self.markers, &mut self.vehicles, Layer::Vehicles, &vehicles),
            vessels: reconcile(&mut self.markers, &mut self.vessels, Layer::Vessels, &vessels),
            events: match profile.event_markers {
                EventMarkerPolicy::Replace => self.event_layer.replace(&mut self.markers, Layer::Events, &events),
                EventMarkerPolicy::TrackById => {
                    reconcile(&mut self.markers, &mut self.tracked_events, Layer::Events, &events)
                }
            },
            zones: match profile.zones {
                ZonePolicy::Replace => self.zone_layer.replace(&mut self.markers, Layer::HazardZones, &zones),
                ZonePolicy::AppendOnly => append_new(&mut self.markers, &mut self.zones, Layer::HazardZones, &zones),
            },
        };

        self.alerts = AlertFeed::from_events(&snapshot.events, profile.alert_titles);
        self.stats = HeaderStats::from_snapshot(snapshot, at);
        if matches!(self.notice, Some(UserNotice::Error(_))) {
            self.notice = None;
        }
        report
    }

    pub fn update_chart(&mut self, kind: ChartKind, dataset: ChartDataset) {
        self.charts.update_chart(kind, dataset);
    }

    pub fn set_notice(&mut self, notice: UserNotice) {
        self.notice = Some(notice);
    }

    pub fn notice(&self) -> Option<&UserNotice> {
        self.notice.as_ref()
    }

    pub fn vehicles(&self) -> &MarkerRegistry<M::Handle> {
        &self.vehicles
    }

    pub fn vessels(&self) -> &MarkerRegistry<M::Handle> {
        &self.vessels
    }

    pub fn tracked_events(&self) -> &MarkerRegistry<M::Handle> {
        &self.tracked_events
    }

    pub fn event_layer(&self) -> &TransientLayer<M::Handle> {
        &self.event_layer
    }

    pub fn zones(&self) -> &MarkerRegistry<M::Handle> {
        &self.zones
    }

    pub fn zone_layer(&self) -> &TransientLayer<M::Handle> {
        &self.zone_layer
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn stats(&self) -> &HeaderStats {
        &self.stats
    }

    pub fn markers(&self) -> &M {
        &self.markers
    }

    pub fn charts(&self) -> &C {
        &self.charts
    }
}
