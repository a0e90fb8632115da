//! Active task selection

use crate::actions::TaskAction;
use serde::{Deserialize, Serialize};

/// Currently selected task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskState {
    /// Task id, `None` when no task is active
    pub id: Option<String>,
    /// Task mode
    pub mode: Option<String>,
}

impl TaskState {
    /// Check whether the given task is active
    pub fn is_active(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

/// Apply a task action
pub fn reduce(state: &mut TaskState, action: &TaskAction) {
    match action {
        TaskAction::SetCurrentTask { id, mode } => {
            state.id = id.clone();
            state.mode = if id.is_some() { mode.clone() } else { None };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_clear() {
        let mut state = TaskState::default();
        reduce(
            &mut state,
            &TaskAction::SetCurrentTask {
                id: Some("View3D".into()),
                mode: Some("full".into()),
            },
        );
        assert!(state.is_active("View3D"));
        assert_eq!(state.mode.as_deref(), Some("full"));

        reduce(&mut state, &TaskAction::clear());
        assert_eq!(state, TaskState::default());
    }

    #[test]
    fn test_clear_drops_mode() {
        let mut state = TaskState::default();
        reduce(
            &mut state,
            &TaskAction::SetCurrentTask {
                id: None,
                mode: Some("stale".into()),
            },
        );
        assert!(state.mode.is_none());
    }
}
