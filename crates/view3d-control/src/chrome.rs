//! Window chrome contract
//!
//! The floating window and the switch button are rendered by the host. This
//! module only describes what they should show and the callbacks they report
//! back. Titles are localization keys; lookup happens in the host.

use serde::{Deserialize, Serialize};
use view3d_core::{PresentationMode, WindowGeometryDefaults};

/// Localization key of the window title
pub const TITLE_KEY: &str = "map3d.title";
/// Icon of the 3D window
pub const WINDOW_ICON: &str = "map3d";
/// Window registry id of the 3D window
pub const WINDOW_ID: &str = "View3DWindow";

/// Toolbar actions of the 3D window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromeAction {
    /// Move the 3D camera to the current 2D extent
    SyncViewToExtent,
    /// Switch to fullscreen mode
    Maximize,
}

/// Extra toolbar button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraControl {
    /// Icon name
    pub icon: String,
    /// Localization key of the tooltip
    pub title_key: String,
    /// Action reported when clicked
    pub action: ChromeAction,
}

/// Description of the 3D window for the host window manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Window registry id
    pub id: String,
    /// Localization key of the title
    pub title_key: String,
    /// Icon name
    pub icon: String,
    /// Cover the whole map area
    pub fullscreen: bool,
    /// Initial geometry
    pub geometry: WindowGeometryDefaults,
    /// Whether the window manager offers its own maximize button
    pub maximizeable: bool,
    /// Docked windows split the map area instead of floating over it
    pub split_screen_when_docked: bool,
    /// Split between top and bottom bar rather than full height
    pub split_top_and_bottom_bar: bool,
    /// Extra toolbar buttons
    pub extra_controls: Vec<ExtraControl>,
}

impl WindowSpec {
    /// Spec for the given mode, `None` when the view is disabled
    pub fn for_mode(mode: PresentationMode, geometry: WindowGeometryDefaults) -> Option<Self> {
        if !mode.is_enabled() {
            return None;
        }
        Some(Self {
            id: WINDOW_ID.to_string(),
            title_key: TITLE_KEY.to_string(),
            icon: WINDOW_ICON.to_string(),
            fullscreen: mode == PresentationMode::Fullscreen,
            geometry,
            maximizeable: false,
            split_screen_when_docked: true,
            split_top_and_bottom_bar: true,
            extra_controls: vec![
                ExtraControl {
                    icon: "sync".to_string(),
                    title_key: "map3d.syncview".to_string(),
                    action: ChromeAction::SyncViewToExtent,
                },
                ExtraControl {
                    icon: "maximize".to_string(),
                    title_key: "window.maximize".to_string(),
                    action: ChromeAction::Maximize,
                },
            ],
        })
    }
}

/// Geometry reported by the window manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    /// X position
    pub x: i32,
    /// Y position
    pub y: i32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
    /// Docked to the side of the map
    pub docked: bool,
    /// Maximized by the user
    pub maximized: bool,
}

/// Resize of the hosting window outside the state-driven path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResizeEvent {
    /// New width
    pub width: u32,
    /// New height
    pub height: u32,
}

/// The 2D/3D switch map button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherButton {
    /// Slot counted from the bottom (0 = bottom slot)
    pub position: u32,
}
