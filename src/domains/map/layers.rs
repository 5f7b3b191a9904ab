use super::ports::{Layer, MarkerSurface};
use super::reconciler::{MarkerSpec, ReconcileReport};
use super::registry::MarkerRegistry;

/// Markers that are thrown away and redrawn on every snapshot.
#[derive(Debug, Clone)]
pub struct TransientLayer<H> {
    handles: Vec<H>,
}

impl<H> Default for TransientLayer<H> {
    fn default() -> Self {
        Self { handles: Vec::new() }
    }
}

impl<H> TransientLayer<H> {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear<S>(&mut self, surface: &mut S) -> usize
    where
        S: MarkerSurface<Handle = H>,
    {
        let removed = self.handles.len();
        for handle in self.handles.drain(..) {
            surface.remove_marker(&handle);
        }
        removed
    }

    pub fn replace<S>(&mut self, surface: &mut S, layer: Layer, specs: &[MarkerSpec]) -> ReconcileReport
    where
        S: MarkerSurface<Handle = H>,
    {
        let removed = self.clear(surface);
        for spec in specs {
            let handle = surface.add_marker(layer, spec.style.clone(), spec.position, &spec.label);
            self.handles.push(handle);
        }
        ReconcileReport {
            created: specs.len(),
            updated: 0,
            removed,
        }
    }
}

/// Draw the specs whose id is not yet in `registry`. Ids already drawn are
/// left exactly as they are, and nothing is ever removed.
pub fn append_new<S: MarkerSurface>(
    surface: &mut S,
    registry: &mut MarkerRegistry<S::Handle>,
    layer: Layer,
    specs: &[MarkerSpec],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    for spec in specs {
        if registry.contains(&spec.id) {
            continue;
        }
        let handle = surface.add_marker(layer, spec.style.clone(), spec.position, &spec.label);
        registry.insert(spec.id.clone(), handle);
        report.created += 1;
    }
    report
}
