//! Mode-aware lifecycle controller
//!
//! Watches the host presentation mode and decides when the embedded container
//! and the visualization module exist:
//!
//! - **Disabled**: nothing mounted, no container, no module reference.
//! - **Loading**: mode is enabled, the container exists and is kept in sync,
//!   the module load is in flight.
//! - **Ready**: the module is loaded and an instance is mounted.
//! - **LoadFailed**: the load returned an error; the container stays until the
//!   mode goes back to Disabled, and [`View3dController::retry_load`] tries again.
//!
//! Every load carries a generation number. A result whose generation is not
//! the one currently awaited (the view was closed and reopened meanwhile) is
//! dropped on arrival.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, error, info};
use view3d_core::{
    EmbeddedContainerFactory, EmbeddedStore, HostAction, HostDispatcher, HostState, ModeRequest,
    PresentationMode, Result, TaskAction, View3dConfig, WindowAction, MODE_STARTUP_PARAM,
};

use crate::bridge::{SyncEngine, SyncReport};
use crate::chrome::{ChromeAction, ResizeEvent, SwitcherButton, WindowGeometry, WindowSpec};
use crate::imperative::ImperativeHandle;
use crate::module::{ModuleLoader, ModuleRef, MountProps, VisualizationInstance};

/// Name of the host notification raised when the module fails to load
pub const LOAD_ERROR_NOTIFICATION: &str = "view3d-load-error";

/// Lifecycle phase of the 3D view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Nothing mounted
    Disabled,
    /// Waiting for the module load with this generation
    Loading {
        /// Generation of the awaited load
        generation: u64,
    },
    /// Module loaded, instance mounted
    Ready,
    /// The load with this generation failed
    LoadFailed {
        /// Generation of the failed load
        generation: u64,
        /// Error message
        message: String,
    },
}

impl LifecyclePhase {
    /// Anything but `Disabled`
    pub fn is_active(&self) -> bool {
        !matches!(self, LifecyclePhase::Disabled)
    }
}

/// Lifecycle notifications, drained by the host with [`View3dController::take_events`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A module load was started
    LoadRequested {
        /// Load generation
        generation: u64,
    },
    /// The module loaded and an instance was mounted
    Ready {
        /// Load generation
        generation: u64,
        /// Module name
        module: String,
    },
    /// The module failed to load
    LoadFailed {
        /// Load generation
        generation: u64,
        /// Error message
        message: String,
    },
    /// The view was closed and all embedded state discarded
    TornDown,
}

struct LoadOutcome {
    generation: u64,
    result: Result<ModuleRef>,
}

/// Owns the embedded container, the module reference, and the imperative handle
pub struct View3dController {
    config: View3dConfig,
    loader: Arc<dyn ModuleLoader>,
    host: HostDispatcher,
    runtime: Handle,
    factory: EmbeddedContainerFactory,
    sync: SyncEngine,
    phase: LifecyclePhase,
    generation: u64,
    module: Option<ModuleRef>,
    embedded: Option<EmbeddedStore>,
    instance: Option<Arc<dyn VisualizationInstance>>,
    imperative: ImperativeHandle,
    loads_tx: Sender<LoadOutcome>,
    loads_rx: Receiver<LoadOutcome>,
    last: Option<HostState>,
    events: Vec<LifecycleEvent>,
}

impl View3dController {
    /// Create a controller. Loads are spawned on `runtime`.
    pub fn new(
        config: View3dConfig,
        loader: Arc<dyn ModuleLoader>,
        host: HostDispatcher,
        runtime: Handle,
    ) -> Self {
        let (loads_tx, loads_rx) = unbounded();
        Self {
            config,
            loader,
            host,
            runtime,
            factory: EmbeddedContainerFactory::new(),
            sync: SyncEngine::new(),
            phase: LifecyclePhase::Disabled,
            generation: 0,
            module: None,
            embedded: None,
            instance: None,
            imperative: ImperativeHandle::new(),
            loads_tx,
            loads_rx,
            last: None,
            events: Vec::new(),
        }
    }

    /// Evaluate startup parameters and take the first look at host state.
    ///
    /// `v=3d` requests fullscreen, `v=3d2d` split screen. Other values are
    /// ignored and the mode stays where the host put it.
    pub fn start(&mut self, host: &HostState) {
        if let Some(value) = host.local_config.startup_params.get(MODE_STARTUP_PARAM) {
            match PresentationMode::from_startup_value(value) {
                Some(mode) => {
                    info!("Startup parameter {}={} requests {} mode", MODE_STARTUP_PARAM, value, mode);
                    self.request_mode(mode.into());
                }
                None => debug!("Ignoring startup parameter {}={}", MODE_STARTUP_PARAM, value),
            }
        }
        self.on_host_update(host);
    }

    /// React to one host update cycle
    pub fn on_host_update(&mut self, host: &HostState) -> SyncReport {
        let task_was_active = self
            .last
            .as_ref()
            .map(HostState::view3d_task_active)
            .unwrap_or(false);

        if host.view3d_task_active() && !task_was_active {
            info!("3D view enabled through task selection");
            self.request_mode(ModeRequest::Fullscreen);
            self.host.dispatch(HostAction::Task(TaskAction::clear()));
        }

        let mode = host.view3d_mode();
        match (mode.is_enabled(), self.phase.is_active()) {
            (true, false) => self.begin(mode),
            (false, true) => self.teardown(),
            _ => {}
        }

        let report = self.sync.sync(host, self.embedded.as_mut());
        if self.phase == LifecyclePhase::Ready {
            self.refresh_props(host);
        }
        self.last = Some(host.clone());
        report
    }

    fn begin(&mut self, mode: PresentationMode) {
        self.embedded = Some(self.factory.create(self.host.clone()));
        self.sync.reset();
        self.start_load();
        info!(generation = self.generation, "3D view opening in {} mode", mode);
    }

    fn start_load(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        self.phase = LifecyclePhase::Loading { generation };
        self.events.push(LifecycleEvent::LoadRequested { generation });

        let load = self.loader.load();
        let results = self.loads_tx.clone();
        self.runtime.spawn(async move {
            let result = load.await;
            if results.send(LoadOutcome { generation, result }).is_err() {
                debug!(generation, "controller gone, dropping module load result");
            }
        });
    }

    fn teardown(&mut self) {
        if matches!(self.phase, LifecyclePhase::LoadFailed { .. }) {
            self.close_load_error();
        }
        self.module = None;
        self.imperative.clear();
        self.instance = None;
        self.embedded = None;
        self.phase = LifecyclePhase::Disabled;
        self.events.push(LifecycleEvent::TornDown);
        info!("3D view closed");
    }

    /// Handle every finished load that has arrived. Returns how many were handled.
    pub fn poll_loads(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(outcome) = self.loads_rx.try_recv() {
            self.finish_load(outcome);
            handled += 1;
        }
        handled
    }

    /// Like [`poll_loads`](Self::poll_loads), but waits up to `timeout` for the first result
    pub fn poll_loads_timeout(&mut self, timeout: Duration) -> usize {
        match self.loads_rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.finish_load(outcome);
                1 + self.poll_loads()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    fn finish_load(&mut self, outcome: LoadOutcome) {
        let awaited = matches!(
            self.phase,
            LifecyclePhase::Loading { generation } if generation == outcome.generation
        );
        if !awaited {
            debug!(
                generation = outcome.generation,
                current = self.generation,
                "Discarding stale module load"
            );
            return;
        }

        match outcome.result {
            Ok(module) => {
                info!(generation = outcome.generation, "Visualization module '{}' loaded", module.name());
                let name = module.name().to_string();
                self.module = Some(module);
                self.phase = LifecyclePhase::Ready;
                self.mount();
                self.events.push(LifecycleEvent::Ready {
                    generation: outcome.generation,
                    module: name,
                });
            }
            Err(e) => {
                let message = e.to_string();
                error!(generation = outcome.generation, "Failed to load visualization module: {}", message);
                self.phase = LifecyclePhase::LoadFailed {
                    generation: outcome.generation,
                    message: message.clone(),
                };
                self.host.dispatch(HostAction::Windows(WindowAction::ShowNotification {
                    name: LOAD_ERROR_NOTIFICATION.to_string(),
                    text: message.clone(),
                }));
                self.events.push(LifecycleEvent::LoadFailed {
                    generation: outcome.generation,
                    message,
                });
            }
        }
    }

    fn mount_props(&self, host: &HostState) -> MountProps {
        let fullscreen = host.view3d_mode() == PresentationMode::Fullscreen;
        MountProps {
            map_bbox: host.map.bbox,
            options: self.config.options,
            projection: host.map.projection.clone(),
            search_providers: Arc::clone(&host.search_providers),
            theme: Arc::clone(&host.theme),
            plugins: fullscreen.then(|| host.local_config.plugins.map3d.clone()),
        }
    }

    fn mount(&mut self) {
        let (Some(module), Some(host)) = (&self.module, &self.last) else {
            return;
        };
        let instance = module.mount(self.mount_props(host));
        self.imperative.set(&instance);
        self.instance = Some(instance);
    }

    /// Push new props to the mounted instance when anything they derive from changed
    fn refresh_props(&self, host: &HostState) {
        let (Some(instance), Some(last)) = (&self.instance, &self.last) else {
            return;
        };
        if !props_changed(last, host) {
            return;
        }
        debug!(mode = %host.view3d_mode(), "Updating visualization props");
        instance.update_props(&self.mount_props(host));
    }

    /// Start a new load after a failure. Returns `false` outside `LoadFailed`.
    pub fn retry_load(&mut self) -> bool {
        if !matches!(self.phase, LifecyclePhase::LoadFailed { .. }) {
            return false;
        }
        self.close_load_error();
        self.start_load();
        info!(generation = self.generation, "Retrying visualization module load");
        true
    }

    fn close_load_error(&self) {
        self.host.dispatch(HostAction::Windows(WindowAction::CloseWindow {
            name: LOAD_ERROR_NOTIFICATION.to_string(),
        }));
    }

    fn request_mode(&self, request: ModeRequest) {
        self.host.dispatch(HostAction::set_view3d_mode(request));
    }

    // --- Window chrome callbacks ---

    /// The window was closed
    pub fn on_close(&mut self) {
        self.request_mode(ModeRequest::Disabled);
    }

    /// The window manager reported new geometry.
    ///
    /// Maximizing while not fullscreen requests fullscreen. Returns whether a
    /// request was made; un-maximizing never demotes the mode.
    pub fn on_geometry_changed(&mut self, geometry: &WindowGeometry) -> bool {
        if geometry.maximized && self.mode() != PresentationMode::Fullscreen {
            self.request_mode(ModeRequest::Fullscreen);
            return true;
        }
        false
    }

    /// The hosting window was resized outside the state flow
    pub fn on_external_resize(&mut self, event: &ResizeEvent) -> bool {
        self.imperative.redraw(event)
    }

    /// A toolbar button was clicked
    pub fn on_extra_control(&mut self, action: ChromeAction) -> bool {
        match action {
            ChromeAction::SyncViewToExtent => self.sync_view_to_extent(),
            ChromeAction::Maximize => {
                self.request_mode(ModeRequest::Fullscreen);
                true
            }
        }
    }

    /// Move the 3D camera to the current 2D extent. No-op if nothing is mounted.
    pub fn sync_view_to_extent(&mut self) -> bool {
        match &self.last {
            Some(host) => self
                .imperative
                .recenter_view(host.map.bbox.bounds, host.map.bbox.rotation),
            None => false,
        }
    }

    // --- Introspection ---

    /// Window to show, `None` while disabled
    pub fn window(&self) -> Option<WindowSpec> {
        WindowSpec::for_mode(self.mode(), self.config.geometry)
    }

    /// The 2D/3D switch button
    pub fn switcher_button(&self) -> SwitcherButton {
        SwitcherButton {
            position: self.config.button_position,
        }
    }

    /// Last observed presentation mode
    pub fn mode(&self) -> PresentationMode {
        self.last
            .as_ref()
            .map(HostState::view3d_mode)
            .unwrap_or_default()
    }

    /// Current phase
    pub fn phase(&self) -> &LifecyclePhase {
        &self.phase
    }

    /// Generation of the most recent load request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a module reference is held
    pub fn module_loaded(&self) -> bool {
        self.module.is_some()
    }

    /// The embedded container, if one exists
    pub fn embedded(&self) -> Option<&EmbeddedStore> {
        self.embedded.as_ref()
    }

    /// Mutable access for the embedded subtree to dispatch into its container
    pub fn embedded_mut(&mut self) -> Option<&mut EmbeddedStore> {
        self.embedded.as_mut()
    }

    /// Number of embedded containers alive
    pub fn live_containers(&self) -> usize {
        self.factory.live_instances()
    }

    /// The imperative handle
    pub fn imperative(&self) -> &ImperativeHandle {
        &self.imperative
    }

    /// Drain queued lifecycle events
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }
}

fn props_changed(last: &HostState, next: &HostState) -> bool {
    last.view3d_mode() != next.view3d_mode()
        || last.map != next.map
        || !Arc::ptr_eq(&last.theme, &next.theme)
        || !Arc::ptr_eq(&last.search_providers, &next.search_providers)
        || !Arc::ptr_eq(&last.local_config, &next.local_config)
}
