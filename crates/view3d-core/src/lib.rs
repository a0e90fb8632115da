//! View3D Core - State model of the embedded 3D view
//!
//! This crate contains the state side of the 3D map view, including:
//! - Presentation mode and the mirrored host slices
//! - Host and embedded container actions
//! - Shared and mirror reducers
//! - The reference host container and its dispatch queue
//! - The per-mount embedded container factory
//! - Configuration and logging settings

#![warn(missing_docs)]

pub mod actions;
pub mod config;
pub mod embedded;
pub mod error;
pub mod host;
pub mod logging;
pub mod map;
pub mod mode;
pub mod reducers;
pub mod slices;

// --- Re-exports grouped by category ---

// Actions
pub use actions::{
    ActionKind, DisplayAction, EmbeddedAction, HostAction, MapAction, TaskAction, WindowAction,
    DISPLAY_ACTION_KINDS, FORWARDED_ACTION_KINDS,
};

// Containers
pub use embedded::{ContainerId, EmbeddedContainerFactory, EmbeddedState, EmbeddedStore};
pub use host::{HostDispatcher, HostState, HostStore, VIEW3D_TASK_ID};

// Configuration & Errors
pub use config::{View3dConfig, View3dOptions, WindowGeometryDefaults};
pub use error::{Result, View3dError};
pub use logging::LogConfig;

// Model
pub use map::{MapBBox, MapState, SearchProvider, SearchProviderRegistry};
pub use mode::{ModeRequest, PresentationMode, MODE_STARTUP_PARAM};
pub use reducers::{Notification, TaskState, WindowRegistry};
pub use slices::{
    DisplayState, LayerCollection, LocalConfig, MapLayer, MirroredSlice, Mirrors, PluginEntry,
    PluginsConfig, StartupParams, Theme,
};
