//! Embedded container
//!
//! A narrowly scoped state container created per mount of the 3D view. It runs
//! the shared task and window reducers (same functions as the host, separate
//! state) plus the four mirror reducers. Dropping it discards all of its state.

use crate::actions::EmbeddedAction;
use crate::host::HostDispatcher;
use crate::reducers::{self, mirror, TaskState, WindowRegistry};
use crate::slices::{DisplayState, LayerCollection, LocalConfig, Mirrors, Theme};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Identifier of an embedded container instance
pub type ContainerId = u64;

/// State of the embedded container
#[derive(Debug, Clone, Default)]
pub struct EmbeddedState {
    /// Task selection inside the 3D view
    pub task: TaskState,
    /// Windows inside the 3D view
    pub windows: WindowRegistry,
    /// Mirrored display state
    pub display: Arc<DisplayState>,
    /// Mirrored theme
    pub theme: Arc<Theme>,
    /// Mirrored local configuration
    pub local_config: Arc<LocalConfig>,
    /// Mirrored layers
    pub layers: Arc<LayerCollection>,
}

impl EmbeddedState {
    /// Snapshot of the mirrored slices
    pub fn mirrors(&self) -> Mirrors {
        Mirrors {
            display: Arc::clone(&self.display),
            theme: Arc::clone(&self.theme),
            local_config: Arc::clone(&self.local_config),
            layers: Arc::clone(&self.layers),
        }
    }
}

/// Combined reducer of the embedded container
pub fn reduce(state: &mut EmbeddedState, action: &EmbeddedAction) {
    match action {
        EmbeddedAction::Task(action) => reducers::task::reduce(&mut state.task, action),
        EmbeddedAction::Windows(action) => reducers::windows::reduce(&mut state.windows, action),
        _ => {}
    }
    mirror::display(&mut state.display, action);
    mirror::theme(&mut state.theme, action);
    mirror::local_config(&mut state.local_config, action);
    mirror::layers(&mut state.layers, action);
}

/// Per-mount state container of the 3D view
#[derive(Debug)]
pub struct EmbeddedStore {
    id: ContainerId,
    state: EmbeddedState,
    host: HostDispatcher,
    revision: u64,
    forwarded: u64,
    live: Arc<AtomicUsize>,
}

impl EmbeddedStore {
    /// Instance id, unique per factory
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Current state
    pub fn state(&self) -> &EmbeddedState {
        &self.state
    }

    /// Number of actions reduced locally
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of actions handed to the host
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Dispatch an action.
    ///
    /// Actions in [`FORWARDED_ACTION_KINDS`] go to the host unchanged and leave
    /// local state untouched; the local copy catches up through the next sync.
    ///
    /// [`FORWARDED_ACTION_KINDS`]: crate::actions::FORWARDED_ACTION_KINDS
    pub fn dispatch(&mut self, action: EmbeddedAction) {
        if let Some(host_action) = action.to_host() {
            debug!(container = self.id, "forwarding {:?} to host", host_action);
            self.host.dispatch(host_action);
            self.forwarded += 1;
            return;
        }
        trace!(container = self.id, kind = ?action.kind(), "embedded dispatch");
        reduce(&mut self.state, &action);
        self.revision += 1;
    }
}

impl Drop for EmbeddedStore {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!(container = self.id, "embedded container destroyed");
    }
}

/// Creates embedded containers
#[derive(Debug, Default)]
pub struct EmbeddedContainerFactory {
    next_id: ContainerId,
    live: Arc<AtomicUsize>,
}

impl EmbeddedContainerFactory {
    /// Create a new factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh container wired to the given host queue
    pub fn create(&mut self, host: HostDispatcher) -> EmbeddedStore {
        self.next_id += 1;
        self.live.fetch_add(1, Ordering::SeqCst);
        debug!(container = self.next_id, "embedded container created");
        EmbeddedStore {
            id: self.next_id,
            state: EmbeddedState::default(),
            host,
            revision: 0,
            forwarded: 0,
            live: Arc::clone(&self.live),
        }
    }

    /// Number of containers created by this factory that are still alive
    pub fn live_instances(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{DisplayAction, HostAction, TaskAction, WindowAction};
    use crate::mode::{ModeRequest, PresentationMode};

    #[test]
    fn test_fresh_store_has_defaults() {
        let (host, _queue) = HostDispatcher::channel();
        let mut factory = EmbeddedContainerFactory::new();
        let store = factory.create(host);
        assert_eq!(store.id(), 1);
        assert_eq!(store.state().task, TaskState::default());
        assert_eq!(*store.state().display, DisplayState::default());
        assert!(store.state().layers.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_shared_reducers_run_locally() {
        let (host, queue) = HostDispatcher::channel();
        let mut store = EmbeddedContainerFactory::new().create(host);
        store.dispatch(EmbeddedAction::Task(TaskAction::select("Identify")));
        store.dispatch(EmbeddedAction::Windows(WindowAction::Register {
            id: "Identify".into(),
        }));
        assert!(store.state().task.is_active("Identify"));
        assert!(store.state().windows.contains("Identify"));
        assert_eq!(store.revision(), 2);
        assert!(queue.try_recv().is_err());
    }

    #[test]
    fn test_display_intent_is_forwarded() {
        let (host, queue) = HostDispatcher::channel();
        let mut store = EmbeddedContainerFactory::new().create(host);
        let before = store.state().display.clone();

        store.dispatch(EmbeddedAction::Display(DisplayAction::SetView3dMode(
            ModeRequest::SplitScreen,
        )));

        assert!(Arc::ptr_eq(&before, &store.state().display));
        assert_eq!(store.revision(), 0);
        assert_eq!(store.forwarded(), 1);
        assert_eq!(
            queue.try_recv().unwrap(),
            HostAction::Display(DisplayAction::SetView3dMode(ModeRequest::SplitScreen))
        );
    }

    #[test]
    fn test_sync_display_updates_copy() {
        let (host, _queue) = HostDispatcher::channel();
        let mut store = EmbeddedContainerFactory::new().create(host);
        let display = Arc::new(DisplayState {
            view3d_mode: PresentationMode::Fullscreen,
            fullscreen: true,
        });
        store.dispatch(EmbeddedAction::SyncDisplay(display.clone()));
        assert!(Arc::ptr_eq(&store.state().display, &display));
    }

    #[test]
    fn test_live_instance_count() {
        let (host, _queue) = HostDispatcher::channel();
        let mut factory = EmbeddedContainerFactory::new();
        let first = factory.create(host.clone());
        assert_eq!(factory.live_instances(), 1);
        drop(first);
        assert_eq!(factory.live_instances(), 0);
        let second = factory.create(host);
        assert_eq!(second.id(), 2);
        assert_eq!(factory.live_instances(), 1);
    }
}
