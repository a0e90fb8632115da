//! Window registry
//!
//! Tracks which floating windows are open, their stacking order, and
//! transient notifications.

use crate::actions::WindowAction;
use serde::{Deserialize, Serialize};

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification name
    pub name: String,
    /// Message text
    pub text: String,
}

/// Open windows (bottom first) and notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WindowRegistry {
    /// Window ids in stacking order, topmost last
    pub stacking: Vec<String>,
    /// Active notifications
    pub notifications: Vec<Notification>,
}

impl WindowRegistry {
    /// Topmost window
    pub fn top(&self) -> Option<&str> {
        self.stacking.last().map(String::as_str)
    }

    /// Check whether a window is registered
    pub fn contains(&self, id: &str) -> bool {
        self.stacking.iter().any(|w| w == id)
    }

    /// Look up a notification by name
    pub fn notification(&self, name: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.name == name)
    }
}

/// Apply a window action
pub fn reduce(state: &mut WindowRegistry, action: &WindowAction) {
    match action {
        WindowAction::Register { id } => {
            if !state.contains(id) {
                state.stacking.push(id.clone());
            }
        }
        WindowAction::Unregister { id } => {
            state.stacking.retain(|w| w != id);
        }
        WindowAction::Raise { id } => {
            if let Some(pos) = state.stacking.iter().position(|w| w == id) {
                let window = state.stacking.remove(pos);
                state.stacking.push(window);
            }
        }
        WindowAction::ShowNotification { name, text } => {
            state.notifications.retain(|n| &n.name != name);
            state.notifications.push(Notification {
                name: name.clone(),
                text: text.clone(),
            });
        }
        WindowAction::CloseWindow { name } => {
            state.notifications.retain(|n| &n.name != name);
            state.stacking.retain(|w| w != name);
        }
    }
}
