//! View3D Control - Lifecycle and bridging of the embedded 3D view
//!
//! This crate drives the 3D view from the host's state:
//! - **Bridge**: pushes changed host slices into the embedded container
//! - **Module**: on-demand loading of the visualization implementation
//! - **Lifecycle**: mode-aware creation and teardown of container and module
//! - **Imperative**: guarded calls into the mounted visualization
//! - **Chrome**: what the host window manager should draw
//! - **Session**: host event loop glue
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use view3d_control::{FnLoader, HostSession, ModuleRef};
//! use view3d_core::{HostAction, HostState, PresentationMode, View3dConfig, View3dError};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let loader = Arc::new(FnLoader(|| async {
//!     Err::<ModuleRef, _>(View3dError::ModuleLoad("no renderer in this build".into()))
//! }));
//! let mut session = HostSession::new(
//!     HostState::default(),
//!     View3dConfig::default(),
//!     loader,
//!     runtime.handle().clone(),
//! );
//! session.dispatch(HostAction::set_view3d_mode(PresentationMode::SplitScreen));
//! session.tick();
//! ```

#![warn(missing_docs)]

pub mod bridge;
pub mod chrome;
pub mod imperative;
pub mod lifecycle;
pub mod module;
pub mod session;

pub use bridge::{SyncEngine, SyncReport};
pub use chrome::{
    ChromeAction, ExtraControl, ResizeEvent, SwitcherButton, WindowGeometry, WindowSpec,
};
pub use imperative::ImperativeHandle;
pub use lifecycle::{LifecycleEvent, LifecyclePhase, View3dController, LOAD_ERROR_NOTIFICATION};
pub use module::{
    FnLoader, LoadFuture, ModuleLoader, ModuleRef, MountProps, SharedModuleLoader,
    VisualizationInstance, VisualizationModule,
};
pub use session::HostSession;
