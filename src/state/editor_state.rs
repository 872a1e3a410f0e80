//! The synchronisation state machine of the editor.
//!
//! The model and the generated code are kept in step by regenerating the code
//! after every mutation. A full rebuild (from a script or from code) clears
//! and refills the model one element at a time, and the generator must not
//! observe that half-built model. Rebuilds therefore run in their own state,
//! and regeneration is only allowed while idle.
//!
//! # State Transitions
//!
//! ```text
//! ┌──────────┐  begin_rebuild   ┌──────────────┐
//! │          ├─────────────────►│              │
//! │   Idle   │                  │  Rebuilding  │
//! │          │◄─────────────────┤              │
//! └──────────┘  finish_rebuild  └──────────────┘
//! ```
//!
//! A rebuild cannot start while another one is running.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorState {
    /// Model and code are in step; every mutation regenerates the code
    #[default]
    Idle,
    /// The model is being replaced wholesale; regeneration is suppressed
    Rebuilding,
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        matches!(
            (self, new_state),
            (EditorState::Idle, EditorState::Rebuilding)
                | (EditorState::Rebuilding, EditorState::Idle)
        )
    }

    /// Returns true if the editor is currently in an idle state
    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Returns true while a full rebuild is in progress
    pub fn is_rebuilding(&self) -> bool {
        matches!(self, EditorState::Rebuilding)
    }

    /// Whether the code generator may run in this state
    pub fn allows_regeneration(&self) -> bool {
        self.is_idle()
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "Idle",
            EditorState::Rebuilding => "Rebuilding",
        }
    }
}

impl std::fmt::Display for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_and_rebuilding_alternate() {
        assert!(EditorState::Idle.can_transition_to(&EditorState::Rebuilding));
        assert!(EditorState::Rebuilding.can_transition_to(&EditorState::Idle));
        assert!(!EditorState::Idle.can_transition_to(&EditorState::Idle));
        assert!(!EditorState::Rebuilding.can_transition_to(&EditorState::Rebuilding));
    }

    #[test]
    fn test_regeneration_only_when_idle() {
        assert!(EditorState::default().allows_regeneration());
        assert!(!EditorState::Rebuilding.allows_regeneration());
    }
}
