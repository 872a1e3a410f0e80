//! The editor session: the element model, the generated code derived from it,
//! and the interaction state the view drives.
//!
//! The `EditorContext` is the whole contract between the core and the view.
//! The view forwards pointer events and button presses; the context mutates
//! the model through the geometry engine and keeps the generated code in
//! step.
//!
//! # State Management
//!
//! Full rebuilds run through the [`EditorState`] machine:
//! - `begin_rebuild`: Idle → Rebuilding, clears the model
//! - `finish_rebuild`: Rebuilding → Idle, regenerates the code once
//!
//! Every other mutation calls `regenerate`, which is a no-op while a
//! rebuild is in progress.
//!
//! # Example
//!
//! ```rust,no_run
//! use display_designer::{DesignerConfig, EditorContext, ElementKind};
//!
//! let mut context = EditorContext::new(&DesignerConfig::default()).unwrap();
//! let errors = context.run_script("rect 10 25 80 45\ncircle 100 30 15").unwrap();
//! assert!(errors.is_empty());
//!
//! let id = context.add_element(ElementKind::Text);
//! assert_eq!(context.selected(), Some(id));
//! assert!(context.code().contains("display.print(\"New Text\");"));
//! ```
use egui::Pos2;
use log::{debug, info};
use thiserror::Error;

use super::{DragMode, DragState, EditorState};
use crate::codegen;
use crate::code_parser::CodeParser;
use crate::command::{DrawCommand, LineError, parse_script};
use crate::config::DesignerConfig;
use crate::document::Document;
use crate::element::{Element, ElementId, ElementKind, SELECTION_MARGIN, factory};
use crate::error::{EditError, GrammarError};
use crate::geometry::{
    self, BoundingBox, Corner, DisplayBounds, GfxFontMetrics, Hit, HitTarget, Point,
    PointMetrics, TextMetrics,
};

/// Errors that can occur during state transitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateTransitionError {
    /// The requested state transition is not allowed from the current state
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: EditorState, to: EditorState },
}

pub struct EditorContext {
    state: EditorState,
    document: Document,
    width: u32,
    height: u32,
    bounds: DisplayBounds,
    min_size: i32,
    handle_size: i32,
    metrics: Box<dyn TextMetrics>,
    parser: CodeParser,
    selected: Option<ElementId>,
    drag: Option<DragState>,
    code: String,
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("state", &self.state)
            .field("display", &(self.width, self.height))
            .field("elements", &self.document.len())
            .field("selected", &self.selected)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl EditorContext {
    /// Creates an empty session for the configured display.
    ///
    /// Text extents default to the target's built-in 6×8 font.
    pub fn new(config: &DesignerConfig) -> Result<Self, GrammarError> {
        let mut context = Self {
            state: EditorState::Idle,
            document: Document::new(),
            width: config.width,
            height: config.height,
            bounds: config.bounds(),
            min_size: config.min_element_size,
            handle_size: config.handle_size,
            metrics: Box::new(GfxFontMetrics::default()),
            parser: CodeParser::new()?,
            selected: None,
            drag: None,
            code: String::new(),
        };
        context.regenerate();
        Ok(context)
    }

    /// Replace the text measurer, e.g. with one backed by the view's fonts.
    pub fn set_metrics(&mut self, metrics: Box<dyn TextMetrics>) {
        self.metrics = metrics;
    }

    /// Attempts to transition to a new state, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::InvalidTransition` if the requested
    /// transition is not allowed from the current state.
    pub fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state,
                to: new_state,
            });
        }
        debug!("Editor state {} -> {}", self.state, new_state);
        self.state = new_state;
        Ok(())
    }

    /// Enters `Rebuilding` and empties the model, the selection and any drag.
    pub fn begin_rebuild(&mut self) -> Result<(), StateTransitionError> {
        self.transition_to(EditorState::Rebuilding)?;
        self.document.clear();
        self.selected = None;
        self.drag = None;
        Ok(())
    }

    /// Returns to `Idle` and regenerates the code from the rebuilt model.
    pub fn finish_rebuild(&mut self) -> Result<(), StateTransitionError> {
        self.transition_to(EditorState::Idle)?;
        self.regenerate();
        Ok(())
    }

    fn rebuild(&mut self, elements: Vec<Element>) -> Result<(), EditError> {
        self.begin_rebuild()?;
        for element in elements {
            self.insert(element);
        }
        self.finish_rebuild()?;
        info!("Rebuilt model with {} element(s)", self.document.len());
        Ok(())
    }

    /// Refresh the generated code from the model.
    ///
    /// Returns `false` without touching the code while a rebuild is running.
    pub fn regenerate(&mut self) -> bool {
        if !self.state.allows_regeneration() {
            debug!("Skipping regeneration while {}", self.state);
            return false;
        }
        self.code = codegen::generate(self.width, self.height, self.document.iter());
        true
    }

    fn insert(&mut self, element: Element) -> ElementId {
        debug!("Inserting {} {}", element.kind, element.id);
        let id = self.document.insert(element);
        self.regenerate();
        id
    }

    /// Insert the default element of `kind` and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let id = self.insert(factory::default_for(kind));
        self.selected = Some(id);
        info!("Added {} {}", kind, id);
        id
    }

    /// Insert the element a script line describes.
    pub fn construct_element(&mut self, command: &DrawCommand) -> ElementId {
        self.insert(command.to_element())
    }

    /// Move an element, clamped to the display. Returns the applied delta.
    pub fn move_element(
        &mut self,
        id: ElementId,
        dx: i32,
        dy: i32,
    ) -> Result<(i32, i32), EditError> {
        let element = self
            .document
            .get_mut(id)
            .ok_or(EditError::UnknownElement(id))?;
        let applied = geometry::move_element(element, dx, dy, &self.bounds, self.metrics.as_ref());
        self.regenerate();
        Ok(applied)
    }

    /// Drag the corner opposite `anchor` to `pointer` (canvas coordinates).
    /// The pointer is clamped into the display first.
    pub fn resize_element(
        &mut self,
        id: ElementId,
        anchor: Corner,
        pointer: Point,
    ) -> Result<(), EditError> {
        let pointer = self.bounds.clamp(pointer);
        let element = self
            .document
            .get_mut(id)
            .ok_or(EditError::UnknownElement(id))?;
        geometry::resize_element(element, anchor, pointer, self.bounds.padding, self.min_size)?;
        self.regenerate();
        Ok(())
    }

    /// Rotate by a relative angle. Returns the new outline for rects and
    /// `None` for kinds that do not rotate.
    pub fn rotate_element(
        &mut self,
        id: ElementId,
        degrees: i32,
    ) -> Result<Option<[Pos2; 4]>, EditError> {
        let element = self
            .document
            .get_mut(id)
            .ok_or(EditError::UnknownElement(id))?;
        let corners = geometry::rotate_element(element, degrees, self.bounds.padding);
        if corners.is_some() {
            debug!("Rotated {} to {}°", id, element.rotation);
            self.regenerate();
        }
        Ok(corners)
    }

    pub fn rotate_selected(&mut self, degrees: i32) -> Option<[Pos2; 4]> {
        let id = self.selected?;
        self.rotate_element(id, degrees).ok().flatten()
    }

    pub fn delete_element(&mut self, id: ElementId) -> Result<Element, EditError> {
        let element = self.document.remove(id).ok_or(EditError::UnknownElement(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.drag.is_some_and(|drag| drag.element_id == id) {
            self.drag = None;
        }
        info!("Deleted {} {}", element.kind, id);
        self.regenerate();
        Ok(element)
    }

    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selected?;
        self.delete_element(id).ok()
    }

    /// Replace the model with the shapes of an editor script.
    ///
    /// Bad lines do not stop the rebuild; they are returned for display.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<LineError>, EditError> {
        let parsed = parse_script(script);
        let elements = parsed.commands.iter().map(DrawCommand::to_element).collect();
        self.rebuild(elements)?;
        Ok(parsed.errors)
    }

    /// Replace the model with the shapes recognised in `code`. Returns how
    /// many were found.
    pub fn apply_code(&mut self, code: &str) -> Result<usize, EditError> {
        let elements = self.parser.parse(code);
        let count = elements.len();
        self.rebuild(elements)?;
        Ok(count)
    }

    /// What lies under `point` (canvas coordinates), without side effects.
    pub fn hit_test(&self, point: Point) -> Option<Hit> {
        geometry::hit_test(
            &self.document,
            self.selected,
            point,
            &self.bounds,
            self.metrics.as_ref(),
            self.handle_size,
        )
    }

    /// Select the element under `point`, or clear the selection.
    pub fn select(&mut self, point: Point) -> Option<ElementId> {
        self.selected = self.hit_test(point).map(|hit| hit.id);
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<ElementId>) {
        self.selected = id.filter(|id| self.document.contains(*id));
    }

    /// Start a drag sequence. A press on a handle of the selected element
    /// starts a resize, a press on a body starts a move, and a press on
    /// nothing (or outside the display) clears the selection.
    pub fn pointer_pressed(&mut self, point: Point) -> Option<Hit> {
        self.drag = None;
        let hit = self.hit_test(point);
        match hit {
            Some(hit) => {
                let mode = match hit.target {
                    HitTarget::Handle(_) => DragMode::Resize,
                    HitTarget::Body => DragMode::Move,
                };
                self.selected = Some(hit.id);
                self.drag = Some(DragState::new(hit.id, mode, point));
                debug!("Drag {:?} started on {} at ({}, {})", mode, hit.id, point.x, point.y);
            }
            None => self.selected = None,
        }
        hit
    }

    /// Continue the current drag. Returns whether the model changed.
    pub fn pointer_dragged(&mut self, point: Point) -> Result<bool, EditError> {
        let Some(drag) = self.drag else {
            return Ok(false);
        };
        let pointer = self.bounds.clamp(point);

        let changed = match drag.mode {
            DragMode::Move => {
                let (dx, dy) = drag.delta_to(pointer);
                if (dx, dy) == (0, 0) {
                    false
                } else {
                    self.move_element(drag.element_id, dx, dy)? != (0, 0)
                }
            }
            DragMode::Resize => {
                let element = self
                    .document
                    .get(drag.element_id)
                    .ok_or(EditError::UnknownElement(drag.element_id))?;
                let bbox = geometry::bounding_box(element, self.bounds.padding, &PointMetrics);
                let anchor = geometry::nearest_corner(&bbox, pointer).opposite();
                self.resize_element(drag.element_id, anchor, pointer)?;
                true
            }
        };

        self.drag = Some(DragState {
            last_pointer: pointer,
            ..drag
        });
        Ok(changed)
    }

    /// End the current drag, if any.
    pub fn pointer_released(&mut self) -> Option<DragState> {
        let drag = self.drag.take();
        if let Some(drag) = &drag {
            debug!("Drag {:?} on {} ended", drag.mode, drag.element_id);
        }
        drag
    }

    /// Outline drawn around the selection.
    pub fn selection_outline(&self) -> Option<BoundingBox> {
        let element = self.selected_element()?;
        let bbox = geometry::bounding_box(element, self.bounds.padding, self.metrics.as_ref());
        Some(bbox.inflate(SELECTION_MARGIN))
    }

    pub fn selection_handles(&self) -> Option<[(Corner, Point); 4]> {
        geometry::handle_positions(self.selected_element()?, self.bounds.padding)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.document.get(self.selected?)
    }

    pub fn element_box(&self, element: &Element) -> BoundingBox {
        geometry::bounding_box(element, self.bounds.padding, self.metrics.as_ref())
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn bounds(&self) -> &DisplayBounds {
        &self.bounds
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn handle_size(&self) -> i32 {
        self.handle_size
    }
}
