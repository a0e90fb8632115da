//! Host container
//!
//! A reference implementation of the host application's state container,
//! limited to what the 3D view reads. Host-bound actions raised elsewhere
//! (controller, embedded container) travel through a [`HostDispatcher`] queue
//! and are applied by the event loop, so no container dispatches into another
//! while reducing.

use crate::actions::{HostAction, MapAction};
use crate::map::{MapState, SearchProviderRegistry};
use crate::mode::PresentationMode;
use crate::reducers::{self, TaskState, WindowRegistry};
use crate::slices::{DisplayState, LayerCollection, LocalConfig, Mirrors, Theme};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tracing::{trace, warn};

/// Task id that turns the 3D view on
pub const VIEW3D_TASK_ID: &str = "View3D";

/// Host application state
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Active task
    pub task: TaskState,
    /// Window registry
    pub windows: WindowRegistry,
    /// Display state (mirrored)
    pub display: Arc<DisplayState>,
    /// Theme (mirrored)
    pub theme: Arc<Theme>,
    /// Local configuration (mirrored)
    pub local_config: Arc<LocalConfig>,
    /// Layers (mirrored)
    pub layers: Arc<LayerCollection>,
    /// Map extent and projection
    pub map: MapState,
    /// Search providers
    pub search_providers: Arc<SearchProviderRegistry>,
}

impl HostState {
    /// Current presentation mode
    pub fn view3d_mode(&self) -> PresentationMode {
        self.display.view3d_mode
    }

    /// Whether the 3D task is the active task
    pub fn view3d_task_active(&self) -> bool {
        self.task.is_active(VIEW3D_TASK_ID)
    }

    /// Snapshot of the mirrored slices (cheap `Arc` clones)
    pub fn mirrors(&self) -> Mirrors {
        Mirrors {
            display: Arc::clone(&self.display),
            theme: Arc::clone(&self.theme),
            local_config: Arc::clone(&self.local_config),
            layers: Arc::clone(&self.layers),
        }
    }
}

/// Handle to the host's dispatch queue.
///
/// This is the only way anything outside the host reaches host state.
#[derive(Debug, Clone)]
pub struct HostDispatcher {
    sender: Sender<HostAction>,
}

impl HostDispatcher {
    /// Wrap an existing sender
    pub fn new(sender: Sender<HostAction>) -> Self {
        Self { sender }
    }

    /// Create a dispatcher and the receiving end of its queue
    pub fn channel() -> (Self, Receiver<HostAction>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    /// Queue an action for the host. Returns `false` if the host is gone.
    pub fn dispatch(&self, action: HostAction) -> bool {
        match self.sender.send(action) {
            Ok(()) => true,
            Err(e) => {
                warn!("Host dispatch queue closed, dropping {:?}", e.0);
                false
            }
        }
    }
}

/// Host state container
#[derive(Debug, Default)]
pub struct HostStore {
    state: HostState,
    initial_mode: PresentationMode,
    revision: u64,
}

impl HostStore {
    /// Create a store with the given initial state
    pub fn new(state: HostState) -> Self {
        Self {
            initial_mode: state.view3d_mode(),
            state,
            revision: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &HostState {
        &self.state
    }

    /// Number of actions applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply an action
    pub fn dispatch(&mut self, action: HostAction) {
        trace!(revision = self.revision, "host dispatch {:?}", action);
        reduce(&mut self.state, &action, self.initial_mode);
        self.revision += 1;
    }

    /// Apply every action currently waiting in the queue. Returns how many were applied.
    pub fn drain(&mut self, queue: &Receiver<HostAction>) -> usize {
        let mut applied = 0;
        while let Ok(action) = queue.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }
}

/// Host reducer
pub fn reduce(state: &mut HostState, action: &HostAction, initial_mode: PresentationMode) {
    match action {
        HostAction::Task(action) => reducers::task::reduce(&mut state.task, action),
        HostAction::Windows(action) => reducers::windows::reduce(&mut state.windows, action),
        HostAction::Display(action) => {
            reducers::display::reduce(&mut state.display, action, initial_mode)
        }
        HostAction::Map(MapAction::SetBBox(bbox)) => state.map.bbox = *bbox,
        HostAction::Map(MapAction::SetProjection(projection)) => {
            state.map.projection = projection.clone()
        }
        HostAction::SetTheme(theme) => state.theme = Arc::clone(theme),
        HostAction::SetLocalConfig(config) => state.local_config = Arc::clone(config),
        HostAction::SetLayers(layers) => state.layers = Arc::clone(layers),
        HostAction::SetSearchProviders(providers) => {
            state.search_providers = Arc::clone(providers)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{DisplayAction, TaskAction};
    use crate::map::MapBBox;
    use crate::mode::ModeRequest;

    #[test]
    fn test_dispatch_counts_revisions() {
        let mut store = HostStore::default();
        assert_eq!(store.revision(), 0);
        store.dispatch(HostAction::Task(TaskAction::select(VIEW3D_TASK_ID)));
        assert_eq!(store.revision(), 1);
        assert!(store.state().view3d_task_active());
    }

    #[test]
    fn test_initial_request_restores_start_mode() {
        let state = HostState {
            display: Arc::new(DisplayState {
                view3d_mode: PresentationMode::SplitScreen,
                fullscreen: false,
            }),
            ..Default::default()
        };
        let mut store = HostStore::new(state);
        store.dispatch(HostAction::set_view3d_mode(ModeRequest::Disabled));
        assert_eq!(store.state().view3d_mode(), PresentationMode::Disabled);
        store.dispatch(HostAction::Display(DisplayAction::SetView3dMode(
            ModeRequest::Initial,
        )));
        assert_eq!(store.state().view3d_mode(), PresentationMode::SplitScreen);
    }

    #[test]
    fn test_map_actions_leave_mirrors_alone() {
        let mut store = HostStore::default();
        let before = store.state().mirrors();
        store.dispatch(HostAction::Map(MapAction::SetBBox(MapBBox::new([
            0.0, 0.0, 10.0, 10.0,
        ]))));
        store.dispatch(HostAction::Map(MapAction::SetProjection(
            "EPSG:2056".into(),
        )));
        let after = store.state().mirrors();
        assert!(Arc::ptr_eq(&before.display, &after.display));
        assert!(Arc::ptr_eq(&before.layers, &after.layers));
        assert_eq!(store.state().map.projection, "EPSG:2056");
    }

    #[test]
    fn test_drain_queue() {
        let (dispatcher, queue) = HostDispatcher::channel();
        let mut store = HostStore::default();
        assert!(dispatcher.dispatch(HostAction::set_view3d_mode(ModeRequest::Fullscreen)));
        assert!(dispatcher.dispatch(HostAction::Task(TaskAction::clear())));
        assert_eq!(store.drain(&queue), 2);
        assert_eq!(store.drain(&queue), 0);
        assert_eq!(store.state().view3d_mode(), PresentationMode::Fullscreen);
    }

    #[test]
    fn test_dispatch_to_closed_queue() {
        let (dispatcher, queue) = HostDispatcher::channel();
        drop(queue);
        assert!(!dispatcher.dispatch(HostAction::Task(TaskAction::clear())));
    }
}
