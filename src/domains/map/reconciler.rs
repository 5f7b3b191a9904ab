use super::ports::{Layer, MarkerStyle, MarkerSurface};
use super::registry::MarkerRegistry;
use crate::common::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What the display should show for one id.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: GeoPoint,
    pub label: String,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.removed == 0
    }
}

/// Bring `registry` and the markers it points at in line with `snapshot`.
///
/// Existing markers are moved and relabelled in place, never recreated, so a
/// handle stays stable for as long as its id keeps appearing. On return the
/// registry's key set equals the snapshot's id set. A repeated id addresses
/// the same marker; its last occurrence wins.
pub fn reconcile<S: MarkerSurface>(
    surface: &mut S,
    registry: &mut MarkerRegistry<S::Handle>,
    layer: Layer,
    snapshot: &[MarkerSpec],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for spec in snapshot {
        match registry.get(&spec.id) {
            Some(handle) => {
                surface.move_marker(handle, spec.position);
                surface.set_label(handle, &spec.label);
                report.updated += 1;
            }
            None => {
                let handle = surface.add_marker(layer, spec.style.clone(), spec.position, &spec.label);
                registry.insert(spec.id.clone(), handle);
                report.created += 1;
            }
        }
    }

    let live: HashSet<&str> = snapshot.iter().map(|s| s.id.as_str()).collect();
    let stale: Vec<String> = registry
        .ids()
        .into_iter()
        .filter(|id| !live.contains(id))
        .map(str::to_string)
        .collect();
    for id in stale {
        if let Some(handle) = registry.remove(&id) {
            surface.remove_marker(&handle);
            report.removed += 1;
        }
    }

    report
}
