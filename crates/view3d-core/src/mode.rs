//! Presentation mode of the embedded 3D view

use serde::{Deserialize, Serialize};
use std::fmt;

/// Startup parameter key selecting the initial presentation mode.
pub const MODE_STARTUP_PARAM: &str = "v";

/// Visibility/layout mode of the embedded 3D view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PresentationMode {
    /// No 3D view, nothing mounted
    #[default]
    Disabled,
    /// 3D view covers the whole map area
    Fullscreen,
    /// 3D view shares the map area with the 2D map
    SplitScreen,
}

impl PresentationMode {
    /// True for any mode other than `Disabled`
    pub fn is_enabled(self) -> bool {
        self != PresentationMode::Disabled
    }

    /// Map a startup parameter value to a mode.
    ///
    /// `"3d"` selects fullscreen, `"3d2d"` selects split screen. Anything else
    /// is not a mode selector and yields `None`.
    pub fn from_startup_value(value: &str) -> Option<Self> {
        match value {
            "3d" => Some(PresentationMode::Fullscreen),
            "3d2d" => Some(PresentationMode::SplitScreen),
            _ => None,
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Fullscreen => write!(f, "fullscreen"),
            Self::SplitScreen => write!(f, "split-screen"),
        }
    }
}

/// Mode change request sent to the host.
///
/// `Initial` is the unset sentinel; it resolves to the host default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeRequest {
    /// Reset to the initial (unset) mode
    Initial,
    /// Close the 3D view
    Disabled,
    /// Open the 3D view side by side with the 2D map
    SplitScreen,
    /// Open the 3D view over the whole map area
    Fullscreen,
}

impl ModeRequest {
    /// Resolve the request against the host default
    pub fn resolve(self, initial: PresentationMode) -> PresentationMode {
        match self {
            ModeRequest::Initial => initial,
            ModeRequest::Disabled => PresentationMode::Disabled,
            ModeRequest::SplitScreen => PresentationMode::SplitScreen,
            ModeRequest::Fullscreen => PresentationMode::Fullscreen,
        }
    }
}

impl From<PresentationMode> for ModeRequest {
    fn from(mode: PresentationMode) -> Self {
        match mode {
            PresentationMode::Disabled => ModeRequest::Disabled,
            PresentationMode::Fullscreen => ModeRequest::Fullscreen,
            PresentationMode::SplitScreen => ModeRequest::SplitScreen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        assert_eq!(PresentationMode::default(), PresentationMode::Disabled);
        assert!(!PresentationMode::default().is_enabled());
        assert!(PresentationMode::Fullscreen.is_enabled());
        assert!(PresentationMode::SplitScreen.is_enabled());
    }

    #[test]
    fn test_startup_values() {
        assert_eq!(
            PresentationMode::from_startup_value("3d"),
            Some(PresentationMode::Fullscreen)
        );
        assert_eq!(
            PresentationMode::from_startup_value("3d2d"),
            Some(PresentationMode::SplitScreen)
        );
        assert_eq!(PresentationMode::from_startup_value("2d"), None);
        assert_eq!(PresentationMode::from_startup_value(""), None);
        assert_eq!(PresentationMode::from_startup_value("3D"), None);
    }

    #[test]
    fn test_request_resolution() {
        let initial = PresentationMode::Disabled;
        assert_eq!(ModeRequest::Initial.resolve(initial), initial);
        assert_eq!(
            ModeRequest::Initial.resolve(PresentationMode::SplitScreen),
            PresentationMode::SplitScreen
        );
        assert_eq!(
            ModeRequest::Fullscreen.resolve(initial),
            PresentationMode::Fullscreen
        );
        assert_eq!(
            ModeRequest::from(PresentationMode::SplitScreen),
            ModeRequest::SplitScreen
        );
    }
}
