//! Headless visualization
//!
//! Stands in for the real renderer: it keeps the camera extent and viewport
//! size it was told about and logs every call.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use view3d_control::{
    FnLoader, ModuleLoader, ModuleRef, MountProps, ResizeEvent, SharedModuleLoader,
    VisualizationInstance, VisualizationModule,
};
use view3d_core::View3dError;

pub struct HeadlessScene {
    camera: Mutex<([f64; 4], f64)>,
    plugins: Mutex<usize>,
    viewport: Mutex<Option<ResizeEvent>>,
}

impl HeadlessScene {
    fn new(props: &MountProps) -> Self {
        Self {
            camera: Mutex::new((props.map_bbox.bounds, props.map_bbox.rotation)),
            plugins: Mutex::new(plugin_count(props)),
            viewport: Mutex::new(None),
        }
    }
}

impl VisualizationInstance for HeadlessScene {
    fn set_view_to_extent(&self, bounds: [f64; 4], rotation: f64) {
        *self.camera.lock() = (bounds, rotation);
        info!("Camera moved to {:?} (rotation {})", bounds, rotation);
    }

    fn redraw_scene(&self, event: &ResizeEvent) {
        *self.viewport.lock() = Some(*event);
        info!("Scene redrawn at {}x{}", event.width, event.height);
    }

    fn update_props(&self, props: &MountProps) {
        let plugins = plugin_count(props);
        let previous = std::mem::replace(&mut *self.plugins.lock(), plugins);
        if previous != plugins {
            info!("Scene now shows {} plugin(s)", plugins);
        }
        info!(projection = %props.projection, theme = %props.theme.id, "Scene props updated");
    }
}

fn plugin_count(props: &MountProps) -> usize {
    props.plugins.as_ref().map_or(0, Vec::len)
}

pub struct HeadlessModule;

impl VisualizationModule for HeadlessModule {
    fn name(&self) -> &str {
        "headless"
    }

    fn mount(&self, props: MountProps) -> Arc<dyn VisualizationInstance> {
        info!(
            projection = %props.projection,
            theme = %props.theme.id,
            plugins = plugin_count(&props),
            "Mounting headless scene"
        );
        Arc::new(HeadlessScene::new(&props))
    }
}

/// Loader that resolves the headless module after `delay`.
///
/// The first `fail_loads` attempts error out, which exercises the retry path.
pub fn loader(delay: Duration, fail_loads: usize) -> Arc<dyn ModuleLoader> {
    let attempts = Arc::new(AtomicUsize::new(0));
    let inner = FnLoader(move || {
        let attempts = Arc::clone(&attempts);
        async move {
            tokio::time::sleep(delay).await;
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < fail_loads {
                Err(View3dError::ModuleLoad(format!(
                    "headless renderer unavailable (attempt {})",
                    attempt + 1
                )))
            } else {
                Ok(Arc::new(HeadlessModule) as ModuleRef)
            }
        }
    });
    Arc::new(SharedModuleLoader::new(Arc::new(inner)))
}
