mod central_panel;
mod display_selector;
mod editor_panel;

pub use central_panel::central_panel;
pub use display_selector::{DisplaySelectorState, display_selector};
pub use editor_panel::{code_panel, editor_panel};
