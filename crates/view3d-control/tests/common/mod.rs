//! Shared fixtures for the controller tests

#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use view3d_control::{
    FnLoader, HostSession, LoadFuture, ModuleLoader, ModuleRef, MountProps, ResizeEvent,
    VisualizationInstance, VisualizationModule,
};
use view3d_core::{HostState, LocalConfig, StartupParams, View3dConfig, View3dError};

pub const SETTLE: Duration = Duration::from_secs(5);

/// Instance that records every imperative call
pub struct RecordingInstance {
    pub props: Mutex<MountProps>,
    pub prop_updates: AtomicUsize,
    pub extents: Mutex<Vec<([f64; 4], f64)>>,
    pub redraws: Mutex<Vec<ResizeEvent>>,
}

impl VisualizationInstance for RecordingInstance {
    fn set_view_to_extent(&self, bounds: [f64; 4], rotation: f64) {
        self.extents.lock().push((bounds, rotation));
    }

    fn redraw_scene(&self, event: &ResizeEvent) {
        self.redraws.lock().push(*event);
    }

    fn update_props(&self, props: &MountProps) {
        *self.props.lock() = props.clone();
        self.prop_updates.fetch_add(1, Ordering::SeqCst);
    }
}

/// Module that keeps weak references to what it mounted
#[derive(Default)]
pub struct RecordingModule {
    mounted: Mutex<Vec<Weak<RecordingInstance>>>,
}

impl RecordingModule {
    pub fn mount_count(&self) -> usize {
        self.mounted.lock().len()
    }

    /// Most recent instance, if still alive
    pub fn latest(&self) -> Option<Arc<RecordingInstance>> {
        self.mounted.lock().last().and_then(Weak::upgrade)
    }
}

impl VisualizationModule for RecordingModule {
    fn name(&self) -> &str {
        "recording"
    }

    fn mount(&self, props: MountProps) -> Arc<dyn VisualizationInstance> {
        let instance = Arc::new(RecordingInstance {
            props: Mutex::new(props),
            prop_updates: AtomicUsize::new(0),
            extents: Mutex::new(Vec::new()),
            redraws: Mutex::new(Vec::new()),
        });
        self.mounted.lock().push(Arc::downgrade(&instance));
        instance
    }
}

/// Loader whose loads only finish when the test says so
#[derive(Clone, Default)]
pub struct GatedLoader {
    gates: Arc<Mutex<Vec<Option<oneshot::Sender<view3d_core::Result<ModuleRef>>>>>>,
}

impl GatedLoader {
    /// Number of loads started so far
    pub fn requests(&self) -> usize {
        self.gates.lock().len()
    }

    /// Finish load `index` with `result`
    pub fn complete(&self, index: usize, result: view3d_core::Result<ModuleRef>) {
        let gate = self.gates.lock()[index].take();
        if let Some(gate) = gate {
            let _ = gate.send(result);
        }
    }

    pub fn succeed(&self, index: usize, module: &Arc<RecordingModule>) {
        self.complete(index, Ok(module.clone() as ModuleRef));
    }

    pub fn fail(&self, index: usize, message: &str) {
        self.complete(index, Err(View3dError::ModuleLoad(message.to_string())));
    }
}

impl ModuleLoader for GatedLoader {
    fn load(&self) -> LoadFuture {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push(Some(tx));
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(View3dError::ModuleLoad("gate dropped".into())))
        })
    }
}

/// Loader that hands out `module` right away
pub fn instant_loader(module: Arc<RecordingModule>) -> Arc<dyn ModuleLoader> {
    Arc::new(FnLoader(move || {
        let module = module.clone();
        async move { Ok::<_, View3dError>(module as ModuleRef) }
    }))
}

/// Host state launched with the given `key=value` parameters
pub fn state_with_startup(pairs: &[&str]) -> HostState {
    HostState {
        local_config: Arc::new(LocalConfig {
            startup_params: StartupParams::parse(pairs.iter().copied()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn session(rt: &Runtime, state: HostState, loader: Arc<dyn ModuleLoader>) -> HostSession {
    HostSession::new(state, View3dConfig::default(), loader, rt.handle().clone())
}
