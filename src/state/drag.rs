use crate::element::ElementId;
use crate::geometry::Point;

/// What a press on an element started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Pressed on the body: the element follows the pointer
    Move,
    /// Pressed on a corner handle: the element is resized
    Resize,
}

/// One press → move* → release sequence. Dropped as a whole on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub element_id: ElementId,
    pub mode: DragMode,
    /// Last pointer position seen, already clamped to the display.
    pub last_pointer: Point,
}

impl DragState {
    pub fn new(element_id: ElementId, mode: DragMode, pointer: Point) -> Self {
        Self {
            element_id,
            mode,
            last_pointer: pointer,
        }
    }

    /// Delta from the last pointer position to `pointer`.
    pub fn delta_to(&self, pointer: Point) -> (i32, i32) {
        (pointer.x - self.last_pointer.x, pointer.y - self.last_pointer.y)
    }
}
