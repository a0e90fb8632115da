//! Host display reducer
//!
//! Only replaces the `Arc` when the value actually changes, so the bridge sees
//! a new reference exactly when there is something to sync.

use crate::actions::DisplayAction;
use crate::mode::PresentationMode;
use crate::slices::DisplayState;
use std::sync::Arc;

/// Apply a display action. `initial` is what [`ModeRequest::Initial`] resolves to.
///
/// [`ModeRequest::Initial`]: crate::mode::ModeRequest::Initial
pub fn reduce(state: &mut Arc<DisplayState>, action: &DisplayAction, initial: PresentationMode) {
    let mut next = **state;
    match action {
        DisplayAction::SetView3dMode(request) => next.view3d_mode = request.resolve(initial),
        DisplayAction::SetFullscreen(fullscreen) => next.fullscreen = *fullscreen,
    }
    if next != **state {
        *state = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeRequest;

    #[test]
    fn test_mode_change_replaces_arc() {
        let mut state = Arc::new(DisplayState::default());
        let before = state.clone();
        reduce(
            &mut state,
            &DisplayAction::SetView3dMode(ModeRequest::Fullscreen),
            PresentationMode::Disabled,
        );
        assert!(!Arc::ptr_eq(&before, &state));
        assert_eq!(state.view3d_mode, PresentationMode::Fullscreen);
    }

    #[test]
    fn test_noop_keeps_arc() {
        let mut state = Arc::new(DisplayState::default());
        let before = state.clone();
        reduce(
            &mut state,
            &DisplayAction::SetView3dMode(ModeRequest::Initial),
            PresentationMode::Disabled,
        );
        reduce(
            &mut state,
            &DisplayAction::SetFullscreen(false),
            PresentationMode::Disabled,
        );
        assert!(Arc::ptr_eq(&before, &state));
    }
}
