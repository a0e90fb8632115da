//! Host event loop glue
//!
//! Ties a [`HostStore`], its dispatch queue, and a [`View3dController`]
//! together. Each tick drains the queue into the store and lets the controller
//! react, repeating until the controller stops producing host actions.

use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::warn;
use view3d_core::{HostAction, HostDispatcher, HostState, HostStore, View3dConfig};

use crate::lifecycle::{LifecyclePhase, View3dController};
use crate::module::ModuleLoader;

/// Upper bound on update cycles per tick
const MAX_CYCLES_PER_TICK: usize = 64;

/// A host store with the 3D view attached
pub struct HostSession {
    store: HostStore,
    queue: Receiver<HostAction>,
    dispatcher: HostDispatcher,
    controller: View3dController,
}

impl HostSession {
    /// Create the session and start the controller against `state`
    pub fn new(
        state: HostState,
        config: View3dConfig,
        loader: Arc<dyn ModuleLoader>,
        runtime: Handle,
    ) -> Self {
        let (dispatcher, queue) = HostDispatcher::channel();
        let store = HostStore::new(state);
        let mut controller = View3dController::new(config, loader, dispatcher.clone(), runtime);
        controller.start(store.state());
        Self {
            store,
            queue,
            dispatcher,
            controller,
        }
    }

    /// Queue an action for the host
    pub fn dispatch(&self, action: HostAction) -> bool {
        self.dispatcher.dispatch(action)
    }

    /// Handle arrived loads and queued host actions. Returns the number of host actions applied.
    pub fn tick(&mut self) -> usize {
        self.controller.poll_loads();
        let mut applied = 0;
        for _ in 0..MAX_CYCLES_PER_TICK {
            let batch = self.store.drain(&self.queue);
            if batch == 0 {
                return applied;
            }
            applied += batch;
            self.controller.on_host_update(self.store.state());
            self.controller.poll_loads();
        }
        warn!(
            "Host actions still queued after {} update cycles",
            MAX_CYCLES_PER_TICK
        );
        applied
    }

    /// Tick until no load is pending or `timeout` passes. Returns whether the session settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.tick();
            if !matches!(self.controller.phase(), LifecyclePhase::Loading { .. }) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.controller.poll_loads_timeout(deadline - now);
        }
    }

    /// Host store
    pub fn store(&self) -> &HostStore {
        &self.store
    }

    /// Current host state
    pub fn state(&self) -> &HostState {
        self.store.state()
    }

    /// Dispatcher feeding the host queue
    pub fn dispatcher(&self) -> &HostDispatcher {
        &self.dispatcher
    }

    /// The controller
    pub fn controller(&self) -> &View3dController {
        &self.controller
    }

    /// Mutable access to the controller, for chrome callbacks
    pub fn controller_mut(&mut self) -> &mut View3dController {
        &mut self.controller
    }
}
