pub mod context;
mod drag;
mod editor_state;

pub use context::{EditorContext, StateTransitionError};
pub use drag::{DragMode, DragState};
pub use editor_state::EditorState;
