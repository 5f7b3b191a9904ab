use vanet_dashboard::adapters::outbound::InMemoryMap;
use vanet_dashboard::common::GeoPoint;
use vanet_dashboard::domains::map::{
    append_new, reconcile, Layer, MarkerRegistry, MarkerSpec, MarkerStyle, ReconcileReport,
    TransientLayer,
};

fn spec(id: &str, lat: f64, label: &str) -> MarkerSpec {
    MarkerSpec {
        id: id.to_string(),
        position: GeoPoint::new(lat, 79.59),
        label: label.to_string(),
        style: MarkerStyle::Vehicle,
    }
}

#[test]
fn existing_markers_move_in_place() {
    let mut map = InMemoryMap::new();
    let mut registry = MarkerRegistry::new();

    let first = reconcile(
        &mut map,
        &mut registry,
        Layer::Vehicles,
        &[spec("A", 17.0, "a1"), spec("B", 17.1, "b1")],
    );
    assert_eq!(first, ReconcileReport { created: 2, updated: 0, removed: 0 });
    let handle_a = *registry.get("A").unwrap();

    let second = reconcile(
        &mut map,
        &mut registry,
        Layer::Vehicles,
        &[spec("A", 17.5, "a2"), spec("C", 17.2, "c1")],
    );
    assert_eq!(second, ReconcileReport { created: 1, updated: 1, removed: 1 });

    // A kept its handle and shows the new position and label.
    assert_eq!(registry.get("A"), Some(&handle_a));
    let marker = map.marker(&handle_a).unwrap();
    assert_eq!(marker.position, GeoPoint::new(17.5, 79.59));
    assert_eq!(marker.label, "a2");

    assert!(!registry.contains("B"));
    assert!(registry.contains("C"));
    assert_eq!(map.count_on(Layer::Vehicles), 2);
}

#[test]
fn empty_snapshot_clears_the_layer() {
    let mut map = InMemoryMap::new();
    let mut registry = MarkerRegistry::new();
    reconcile(&mut map, &mut registry, Layer::Vessels, &[spec("S1", 17.0, "s")]);

    let report = reconcile(&mut map, &mut registry, Layer::Vessels, &[]);

    assert_eq!(report.removed, 1);
    assert!(registry.is_empty());
    assert!(map.is_empty());
}

#[test]
fn applying_the_same_snapshot_twice_creates_nothing() {
    let mut map = InMemoryMap::new();
    let mut registry = MarkerRegistry::new();
    let snapshot = [spec("A", 17.0, "a"), spec("B", 17.1, "b")];

    reconcile(&mut map, &mut registry, Layer::Vehicles, &snapshot);
    let again = reconcile(&mut map, &mut registry, Layer::Vehicles, &snapshot);

    assert!(again.is_noop());
    assert_eq!(map.counters().created, 2);
    assert_eq!(map.len(), 2);
}

#[test]
fn duplicate_ids_share_one_marker_and_last_wins() {
    let mut map = InMemoryMap::new();
    let mut registry = MarkerRegistry::new();

    reconcile(
        &mut map,
        &mut registry,
        Layer::Vehicles,
        &[spec("A", 17.0, "first"), spec("A", 17.3, "second")],
    );

    assert_eq!(registry.len(), 1);
    assert_eq!(map.len(), 1);
    let marker = map.marker(registry.get("A").unwrap()).unwrap();
    assert_eq!(marker.label, "second");
    assert_eq!(marker.position.latitude, 17.3);
}

#[test]
fn transient_layer_redraws_everything() {
    let mut map = InMemoryMap::new();
    let mut layer = TransientLayer::default();

    layer.replace(&mut map, Layer::Events, &[spec("E1", 17.0, "e1"), spec("E2", 17.1, "e2")]);
    let report = layer.replace(&mut map, Layer::Events, &[spec("E3", 17.2, "e3")]);

    assert_eq!(report, ReconcileReport { created: 1, updated: 0, removed: 2 });
    assert_eq!(layer.len(), 1);
    assert_eq!(map.count_on(Layer::Events), 1);
}

#[test]
fn append_only_never_touches_drawn_ids() {
    let mut map = InMemoryMap::new();
    let mut registry = MarkerRegistry::new();

    append_new(&mut map, &mut registry, Layer::HazardZones, &[spec("Z1", 17.0, "old")]);
    let report = append_new(
        &mut map,
        &mut registry,
        Layer::HazardZones,
        &[spec("Z1", 18.0, "new"), spec("Z2", 17.1, "z2")],
    );
    append_new(&mut map, &mut registry, Layer::HazardZones, &[]);

    assert_eq!(report.created, 1);
    assert_eq!(registry.len(), 2);
    let z1 = map.marker(registry.get("Z1").unwrap()).unwrap();
    assert_eq!(z1.label, "old");
    assert_eq!(z1.position.latitude, 17.0);
    assert_eq!(map.counters().removed, 0);
}
