//! Mirror reducers
//!
//! Each reducer ignores every action except its own sync action, for which it
//! replaces the whole state with the payload. When to fire is decided by the
//! bridge, not here.

use crate::actions::EmbeddedAction;
use crate::slices::{DisplayState, LayerCollection, LocalConfig, Theme};
use std::sync::Arc;

/// Theme mirror
pub fn theme(state: &mut Arc<Theme>, action: &EmbeddedAction) {
    if let EmbeddedAction::SyncTheme(theme) = action {
        *state = Arc::clone(theme);
    }
}

/// Local configuration mirror
pub fn local_config(state: &mut Arc<LocalConfig>, action: &EmbeddedAction) {
    if let EmbeddedAction::SyncLocalConfig(config) = action {
        *state = Arc::clone(config);
    }
}

/// Layer mirror
pub fn layers(state: &mut Arc<LayerCollection>, action: &EmbeddedAction) {
    if let EmbeddedAction::SyncLayers(layers) = action {
        *state = Arc::clone(layers);
    }
}

/// Display mirror.
///
/// Display change intents never reach this reducer; the embedded container
/// forwards them to the host before reducing.
pub fn display(state: &mut Arc<DisplayState>, action: &EmbeddedAction) {
    if let EmbeddedAction::SyncDisplay(display) = action {
        *state = Arc::clone(display);
    }
}
