//! Host to embedded state bridge
//!
//! On every host update the engine compares each mirrored slice with the one
//! it saw last, by `Arc` identity, and dispatches one sync action per changed
//! slice into the embedded container. Nothing flows the other way here; the
//! embedded container forwards display intents to the host on its own.

use std::sync::Arc;
use tracing::debug;
use view3d_core::{EmbeddedAction, EmbeddedStore, HostState, MirroredSlice, Mirrors};

/// Outcome of one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Slices whose reference changed since the last pass
    pub changed: Vec<MirroredSlice>,
    /// Slices actually dispatched into an embedded container
    pub dispatched: Vec<MirroredSlice>,
}

impl SyncReport {
    /// True if nothing changed
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Tracks the last observed host slices
#[derive(Debug, Default)]
pub struct SyncEngine {
    last: Option<Mirrors>,
}

impl SyncEngine {
    /// Create an engine that has seen nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last observation, so the next pass treats every slice as changed.
    ///
    /// Used right after a fresh embedded container is created.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Record the host slices without dispatching anything
    pub fn observe(&mut self, host: &HostState) {
        self.last = Some(host.mirrors());
    }

    /// Diff the host slices and push changes into `target`.
    ///
    /// Without a target the pass only advances the observation.
    pub fn sync(&mut self, host: &HostState, target: Option<&mut EmbeddedStore>) -> SyncReport {
        let next = host.mirrors();
        let changed = match &self.last {
            Some(last) => changed_slices(last, &next),
            None => MirroredSlice::all().to_vec(),
        };

        let mut report = SyncReport {
            changed,
            dispatched: Vec::new(),
        };

        if let Some(store) = target {
            for slice in &report.changed {
                debug!(container = store.id(), slice = %slice, "syncing from host");
                store.dispatch(sync_action(*slice, &next));
                report.dispatched.push(*slice);
            }
        }

        self.last = Some(next);
        report
    }
}

fn changed_slices(last: &Mirrors, next: &Mirrors) -> Vec<MirroredSlice> {
    MirroredSlice::all()
        .iter()
        .copied()
        .filter(|slice| match slice {
            MirroredSlice::Display => !Arc::ptr_eq(&last.display, &next.display),
            MirroredSlice::Theme => !Arc::ptr_eq(&last.theme, &next.theme),
            MirroredSlice::LocalConfig => !Arc::ptr_eq(&last.local_config, &next.local_config),
            MirroredSlice::Layers => !Arc::ptr_eq(&last.layers, &next.layers),
        })
        .collect()
}

fn sync_action(slice: MirroredSlice, mirrors: &Mirrors) -> EmbeddedAction {
    match slice {
        MirroredSlice::Display => EmbeddedAction::SyncDisplay(Arc::clone(&mirrors.display)),
        MirroredSlice::Theme => EmbeddedAction::SyncTheme(Arc::clone(&mirrors.theme)),
        MirroredSlice::LocalConfig => {
            EmbeddedAction::SyncLocalConfig(Arc::clone(&mirrors.local_config))
        }
        MirroredSlice::Layers => EmbeddedAction::SyncLayers(Arc::clone(&mirrors.layers)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use view3d_core::{
        EmbeddedContainerFactory, HostAction, HostDispatcher, HostStore, LayerCollection,
        MapLayer, PresentationMode, Theme,
    };

    fn setup() -> (HostStore, EmbeddedStore) {
        let (host, _queue) = HostDispatcher::channel();
        let store = EmbeddedContainerFactory::new().create(host);
        (HostStore::default(), store)
    }

    #[test]
    fn test_first_pass_primes_everything() {
        let (host, mut store) = setup();
        let mut engine = SyncEngine::new();
        let report = engine.sync(host.state(), Some(&mut store));
        assert_eq!(report.dispatched, MirroredSlice::all().to_vec());
        assert_eq!(store.revision(), 4);
        assert!(Arc::ptr_eq(&store.state().theme, &host.state().theme));
    }

    #[test]
    fn test_only_changed_slices_dispatch() {
        let (mut host, mut store) = setup();
        let mut engine = SyncEngine::new();
        engine.sync(host.state(), Some(&mut store));

        let layers = Arc::new(LayerCollection::new(vec![MapLayer::new("osm", "OSM")]));
        host.dispatch(HostAction::SetLayers(layers.clone()));
        let report = engine.sync(host.state(), Some(&mut store));

        assert_eq!(report.dispatched, vec![MirroredSlice::Layers]);
        assert!(Arc::ptr_eq(&store.state().layers, &layers));
        assert_eq!(store.revision(), 5);
    }

    #[test]
    fn test_unchanged_host_dispatches_nothing() {
        let (host, mut store) = setup();
        let mut engine = SyncEngine::new();
        engine.sync(host.state(), Some(&mut store));
        let report = engine.sync(host.state(), Some(&mut store));
        assert!(report.is_empty());
        assert_eq!(store.revision(), 4);
    }

    #[test]
    fn test_equal_value_new_reference_still_syncs() {
        let (mut host, mut store) = setup();
        let mut engine = SyncEngine::new();
        engine.sync(host.state(), Some(&mut store));

        host.dispatch(HostAction::SetTheme(Arc::new(Theme::default())));
        let report = engine.sync(host.state(), Some(&mut store));
        assert_eq!(report.changed, vec![MirroredSlice::Theme]);
    }

    #[test]
    fn test_without_target_only_observes() {
        let mut host = HostStore::default();
        let mut engine = SyncEngine::new();
        engine.observe(host.state());

        host.dispatch(HostAction::set_view3d_mode(PresentationMode::Fullscreen));
        let report = engine.sync(host.state(), None);
        assert_eq!(report.changed, vec![MirroredSlice::Display]);
        assert!(report.dispatched.is_empty());

        // The observation advanced, so the same state is not reported twice
        assert!(engine.sync(host.state(), None).is_empty());
    }

    #[test]
    fn test_reset_resends_all() {
        let (host, mut store) = setup();
        let mut engine = SyncEngine::new();
        engine.sync(host.state(), Some(&mut store));
        engine.reset();
        let report = engine.sync(host.state(), Some(&mut store));
        assert_eq!(report.dispatched.len(), 4);
    }
}
