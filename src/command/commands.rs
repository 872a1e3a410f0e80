use super::{CommandResult, DrawCommand, LineError};
use crate::element::{Element, ElementId, ElementKind};
use crate::geometry::{Corner, Point};
use crate::state::EditorContext;

/// Everything the view can ask the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a shape with its default placement and select it
    AddElement(ElementKind),

    /// Insert a shape described by a script line
    Draw(DrawCommand),

    /// Translate an element, clamped to the display
    MoveElement {
        element_id: ElementId,
        dx: i32,
        dy: i32,
    },

    /// Drag the corner opposite `anchor` to `position`
    ResizeElement {
        element_id: ElementId,
        anchor: Corner,
        position: Point,
    },

    /// Rotate a rect by a relative number of degrees
    RotateElement {
        element_id: ElementId,
        degrees: i32,
    },

    /// Rotate whatever is selected
    RotateSelected(i32),

    /// Remove one element
    DeleteElement(ElementId),

    /// Remove whatever is selected
    DeleteSelected,

    /// Replace the model with the shapes of an editor script
    RunScript(String),

    /// Replace the model with the shapes found in generated-style code
    ApplyCode(String),
}

/// What a command produced, for the view to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Created(ElementId),
    Changed,
    Unchanged,
    Deleted(Element),
    Rebuilt {
        element_count: usize,
        errors: Vec<LineError>,
    },
}

impl Command {
    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut EditorContext) -> CommandResult {
        match self {
            Command::AddElement(kind) => Ok(CommandOutcome::Created(ctx.add_element(*kind))),

            Command::Draw(draw) => Ok(CommandOutcome::Created(ctx.construct_element(draw))),

            Command::MoveElement { element_id, dx, dy } => {
                let applied = ctx.move_element(*element_id, *dx, *dy)?;
                Ok(if applied == (0, 0) {
                    CommandOutcome::Unchanged
                } else {
                    CommandOutcome::Changed
                })
            }

            Command::ResizeElement {
                element_id,
                anchor,
                position,
            } => {
                ctx.resize_element(*element_id, *anchor, *position)?;
                Ok(CommandOutcome::Changed)
            }

            Command::RotateElement {
                element_id,
                degrees,
            } => Ok(match ctx.rotate_element(*element_id, *degrees)? {
                Some(_) => CommandOutcome::Changed,
                None => CommandOutcome::Unchanged,
            }),

            Command::RotateSelected(degrees) => Ok(match ctx.rotate_selected(*degrees) {
                Some(_) => CommandOutcome::Changed,
                None => CommandOutcome::Unchanged,
            }),

            Command::DeleteElement(element_id) => {
                Ok(CommandOutcome::Deleted(ctx.delete_element(*element_id)?))
            }

            Command::DeleteSelected => Ok(match ctx.delete_selected() {
                Some(element) => CommandOutcome::Deleted(element),
                None => CommandOutcome::Unchanged,
            }),

            Command::RunScript(script) => {
                let errors = ctx.run_script(script)?;
                Ok(CommandOutcome::Rebuilt {
                    element_count: ctx.document().len(),
                    errors,
                })
            }

            Command::ApplyCode(code) => {
                let element_count = ctx.apply_code(code)?;
                Ok(CommandOutcome::Rebuilt {
                    element_count,
                    errors: Vec::new(),
                })
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddElement(_) => "AddElement",
            Command::Draw(_) => "Draw",
            Command::MoveElement { .. } => "MoveElement",
            Command::ResizeElement { .. } => "ResizeElement",
            Command::RotateElement { .. } => "RotateElement",
            Command::RotateSelected(_) => "RotateSelected",
            Command::DeleteElement(_) => "DeleteElement",
            Command::DeleteSelected => "DeleteSelected",
            Command::RunScript(_) => "RunScript",
            Command::ApplyCode(_) => "ApplyCode",
        }
    }
}
