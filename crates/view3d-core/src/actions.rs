//! Actions accepted by the host and embedded containers

use crate::map::{MapBBox, SearchProviderRegistry};
use crate::mode::ModeRequest;
use crate::slices::{DisplayState, LayerCollection, LocalConfig, Theme};
use std::sync::Arc;

/// Task selection actions
#[derive(Debug, Clone, PartialEq)]
pub enum TaskAction {
    /// Select the active task. `id == None` clears the selection.
    SetCurrentTask {
        /// Task id
        id: Option<String>,
        /// Task mode
        mode: Option<String>,
    },
}

impl TaskAction {
    /// Clear the active task
    pub fn clear() -> Self {
        TaskAction::SetCurrentTask {
            id: None,
            mode: None,
        }
    }

    /// Select a task without mode
    pub fn select(id: impl Into<String>) -> Self {
        TaskAction::SetCurrentTask {
            id: Some(id.into()),
            mode: None,
        }
    }
}

/// Window registry actions
#[derive(Debug, Clone, PartialEq)]
pub enum WindowAction {
    /// Register a window
    Register {
        /// Window id
        id: String,
    },
    /// Remove a window
    Unregister {
        /// Window id
        id: String,
    },
    /// Move a window to the top of the stack
    Raise {
        /// Window id
        id: String,
    },
    /// Show a transient notification
    ShowNotification {
        /// Notification name (replaces an existing one with the same name)
        name: String,
        /// Message text
        text: String,
    },
    /// Close a notification or window by name
    CloseWindow {
        /// Name
        name: String,
    },
}

/// Display actions
///
/// These are owned by the host. Raised inside the embedded container they are
/// forwarded to the host instead of being reduced locally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayAction {
    /// Request a presentation mode change
    SetView3dMode(ModeRequest),
    /// Toggle application fullscreen
    SetFullscreen(bool),
}

/// Map actions
#[derive(Debug, Clone, PartialEq)]
pub enum MapAction {
    /// Change the visible extent
    SetBBox(MapBBox),
    /// Change the map projection
    SetProjection(String),
}

/// Actions dispatched against the host container
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    /// Task selection
    Task(TaskAction),
    /// Window registry
    Windows(WindowAction),
    /// Display state
    Display(DisplayAction),
    /// Map state
    Map(MapAction),
    /// Replace the theme
    SetTheme(Arc<Theme>),
    /// Replace the local configuration
    SetLocalConfig(Arc<LocalConfig>),
    /// Replace the layer collection
    SetLayers(Arc<LayerCollection>),
    /// Replace the search provider registry
    SetSearchProviders(Arc<SearchProviderRegistry>),
}

impl HostAction {
    /// Shorthand for a mode change request
    pub fn set_view3d_mode(request: impl Into<ModeRequest>) -> Self {
        HostAction::Display(DisplayAction::SetView3dMode(request.into()))
    }
}

/// Actions dispatched against the embedded container
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedAction {
    /// Task selection inside the 3D view
    Task(TaskAction),
    /// Window registry inside the 3D view
    Windows(WindowAction),
    /// Display change intent, forwarded to the host
    Display(DisplayAction),
    /// Host theme changed
    SyncTheme(Arc<Theme>),
    /// Host local configuration changed
    SyncLocalConfig(Arc<LocalConfig>),
    /// Host layers changed
    SyncLayers(Arc<LayerCollection>),
    /// Host display state changed
    SyncDisplay(Arc<DisplayState>),
}

/// Discriminant of an [`EmbeddedAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// [`TaskAction::SetCurrentTask`]
    SetCurrentTask,
    /// [`WindowAction::Register`]
    RegisterWindow,
    /// [`WindowAction::Unregister`]
    UnregisterWindow,
    /// [`WindowAction::Raise`]
    RaiseWindow,
    /// [`WindowAction::ShowNotification`]
    ShowNotification,
    /// [`WindowAction::CloseWindow`]
    CloseWindow,
    /// [`DisplayAction::SetView3dMode`]
    SetView3dMode,
    /// [`DisplayAction::SetFullscreen`]
    SetFullscreen,
    /// [`EmbeddedAction::SyncTheme`]
    SyncTheme,
    /// [`EmbeddedAction::SyncLocalConfig`]
    SyncLocalConfig,
    /// [`EmbeddedAction::SyncLayers`]
    SyncLayers,
    /// [`EmbeddedAction::SyncDisplay`]
    SyncDisplay,
}

/// Display action kinds
pub const DISPLAY_ACTION_KINDS: &[ActionKind] =
    &[ActionKind::SetView3dMode, ActionKind::SetFullscreen];

/// Action kinds the embedded container hands to the host unchanged
pub const FORWARDED_ACTION_KINDS: &[ActionKind] = DISPLAY_ACTION_KINDS;

impl EmbeddedAction {
    /// Kind of this action
    pub fn kind(&self) -> ActionKind {
        match self {
            EmbeddedAction::Task(TaskAction::SetCurrentTask { .. }) => ActionKind::SetCurrentTask,
            EmbeddedAction::Windows(action) => match action {
                WindowAction::Register { .. } => ActionKind::RegisterWindow,
                WindowAction::Unregister { .. } => ActionKind::UnregisterWindow,
                WindowAction::Raise { .. } => ActionKind::RaiseWindow,
                WindowAction::ShowNotification { .. } => ActionKind::ShowNotification,
                WindowAction::CloseWindow { .. } => ActionKind::CloseWindow,
            },
            EmbeddedAction::Display(DisplayAction::SetView3dMode(_)) => ActionKind::SetView3dMode,
            EmbeddedAction::Display(DisplayAction::SetFullscreen(_)) => ActionKind::SetFullscreen,
            EmbeddedAction::SyncTheme(_) => ActionKind::SyncTheme,
            EmbeddedAction::SyncLocalConfig(_) => ActionKind::SyncLocalConfig,
            EmbeddedAction::SyncLayers(_) => ActionKind::SyncLayers,
            EmbeddedAction::SyncDisplay(_) => ActionKind::SyncDisplay,
        }
    }

    /// Whether this action is handed to the host instead of reduced locally
    pub fn is_forwarded(&self) -> bool {
        FORWARDED_ACTION_KINDS.contains(&self.kind())
    }

    /// Host counterpart of a forwarded action
    pub fn to_host(&self) -> Option<HostAction> {
        match self {
            EmbeddedAction::Display(action) if self.is_forwarded() => {
                Some(HostAction::Display(*action))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_display_actions_forwarded() {
        let forwarded = EmbeddedAction::Display(DisplayAction::SetFullscreen(true));
        assert!(forwarded.is_forwarded());
        assert_eq!(
            forwarded.to_host(),
            Some(HostAction::Display(DisplayAction::SetFullscreen(true)))
        );

        let sync = EmbeddedAction::SyncDisplay(Arc::new(DisplayState::default()));
        assert!(!sync.is_forwarded());
        assert_eq!(sync.to_host(), None);

        let task = EmbeddedAction::Task(TaskAction::clear());
        assert!(!task.is_forwarded());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            EmbeddedAction::Windows(WindowAction::Raise { id: "a".into() }).kind(),
            ActionKind::RaiseWindow
        );
        assert_eq!(
            EmbeddedAction::Display(DisplayAction::SetView3dMode(ModeRequest::Initial)).kind(),
            ActionKind::SetView3dMode
        );
    }

    #[test]
    fn test_set_view3d_mode_shorthand() {
        assert_eq!(
            HostAction::set_view3d_mode(crate::PresentationMode::Fullscreen),
            HostAction::Display(DisplayAction::SetView3dMode(ModeRequest::Fullscreen))
        );
    }
}
