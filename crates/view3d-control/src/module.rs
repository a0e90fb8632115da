//! Visualization module loading
//!
//! The 3D renderer is heavyweight and loaded on demand. Loading is an explicit
//! async operation returning a `Result`; the lifecycle controller decides what
//! to do with the outcome.

use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use view3d_core::{
    MapBBox, PluginEntry, Result, SearchProviderRegistry, Theme, View3dOptions,
};

use crate::chrome::ResizeEvent;

/// A mounted visualization.
///
/// Calls are fire and forget; implementations use interior mutability.
pub trait VisualizationInstance: Send + Sync {
    /// Move the camera to the given 2D extent
    fn set_view_to_extent(&self, bounds: [f64; 4], rotation: f64);
    /// Recompute the viewport after an external resize
    fn redraw_scene(&self, event: &ResizeEvent);
    /// Replace the props handed over at mount, e.g. after a mode switch
    fn update_props(&self, props: &MountProps);
}

/// A loaded visualization implementation
pub trait VisualizationModule: Send + Sync {
    /// Module name, for logging
    fn name(&self) -> &str;
    /// Mount a new instance
    fn mount(&self, props: MountProps) -> Arc<dyn VisualizationInstance>;
}

/// Shared reference to a loaded module
pub type ModuleRef = Arc<dyn VisualizationModule>;

/// Future returned by [`ModuleLoader::load`]
pub type LoadFuture = BoxFuture<'static, Result<ModuleRef>>;

/// Resolves the visualization module
pub trait ModuleLoader: Send + Sync + 'static {
    /// Start loading
    fn load(&self) -> LoadFuture;
}

/// Adapts an async closure into a [`ModuleLoader`]
pub struct FnLoader<F>(pub F);

impl<F, Fut> ModuleLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ModuleRef>> + Send + 'static,
{
    fn load(&self) -> LoadFuture {
        Box::pin((self.0)())
    }
}

/// Loads the module once per process and hands out the same reference afterwards.
///
/// Failed loads are not cached, so a retry really loads again.
pub struct SharedModuleLoader {
    inner: Arc<dyn ModuleLoader>,
    cell: Arc<OnceCell<ModuleRef>>,
}

impl SharedModuleLoader {
    /// Wrap a loader
    pub fn new(inner: Arc<dyn ModuleLoader>) -> Self {
        Self {
            inner,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Whether the module has been loaded
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl ModuleLoader for SharedModuleLoader {
    fn load(&self) -> LoadFuture {
        let inner = Arc::clone(&self.inner);
        let cell = Arc::clone(&self.cell);
        Box::pin(async move {
            let module = cell.get_or_try_init(|| inner.load()).await?;
            Ok(Arc::clone(module))
        })
    }
}

/// Read-only properties handed to the visualization at mount and on every change
#[derive(Clone)]
pub struct MountProps {
    /// Current 2D extent
    pub map_bbox: MapBBox,
    /// Visualization options
    pub options: View3dOptions,
    /// Map projection identifier
    pub projection: String,
    /// Search providers
    pub search_providers: Arc<SearchProviderRegistry>,
    /// Theme
    pub theme: Arc<Theme>,
    /// Plugins shown inside the view; only set in fullscreen mode
    pub plugins: Option<Vec<PluginEntry>>,
}
