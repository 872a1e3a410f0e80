use serde::{Deserialize, Serialize};

mod common;

pub use common::{
    COORDINATE_LIMIT, DISPLAY_PADDING, HANDLE_SIZE, MIN_ELEMENT_SIZE, ROTATE_STEP_DEGREES,
    SELECTION_MARGIN, in_coordinate_range, normalize_rotation,
};
pub(crate) use common::half;

/// Opaque handle correlating a model entry with whatever the view draws for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three shapes the target library primitives can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Rect,
    Circle,
    Text,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Rect => "rect",
            ElementKind::Circle => "circle",
            ElementKind::Text => "text",
        }
    }

    /// Rect and Circle expose corner handles; Text is only movable.
    pub fn is_resizable(&self) -> bool {
        matches!(self, ElementKind::Rect | ElementKind::Circle)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A drawable unit in display space.
///
/// `x`/`y` are the top-left corner (the bounding-box corner for circles),
/// relative to the display origin and excluding any screen padding. Circles
/// keep their diameter in both `w` and `h`. `text` is only meaningful for
/// [`ElementKind::Text`] and `rotation` only for [`ElementKind::Rect`].
///
/// Construction performs no validation: callers parse and check the numeric
/// fields before building an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub id: ElementId,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub text: String,
    pub rotation: i32,
}

impl Element {
    pub fn new(kind: ElementKind, id: ElementId, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            kind,
            id,
            x,
            y,
            w,
            h,
            text: String::new(),
            rotation: 0,
        }
    }

    pub fn is_rotated(&self) -> bool {
        self.kind == ElementKind::Rect && self.rotation % 360 != 0
    }

    /// Centre and radius as the target library's circle primitive expects them.
    pub fn circle_params(&self) -> (i32, i32, i32) {
        (self.x + half(self.w), self.y + half(self.h), half(self.w))
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use crate::id_generator::generate_id;

    /// Rect from its top-left corner and size.
    pub fn create_rect(x: i32, y: i32, w: i32, h: i32) -> Element {
        Element::new(ElementKind::Rect, generate_id(), x, y, w, h)
    }

    /// Rect from two opposite corners. Width and height are `x2 - x1` and
    /// `y2 - y1` without reordering, so inverted corners give negative sizes.
    pub fn create_rect_from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Element {
        create_rect(x1, y1, x2 - x1, y2 - y1)
    }

    /// Circle from its centre and radius.
    pub fn create_circle_centered(cx: i32, cy: i32, r: i32) -> Element {
        Element::new(ElementKind::Circle, generate_id(), cx - r, cy - r, 2 * r, 2 * r)
    }

    /// Text anchored at its top-left corner.
    pub fn create_text(x: i32, y: i32, text: impl Into<String>) -> Element {
        let mut element = Element::new(ElementKind::Text, generate_id(), x, y, 0, 0);
        element.text = text.into();
        element
    }

    /// The element the "Add" buttons insert.
    pub fn default_for(kind: ElementKind) -> Element {
        match kind {
            ElementKind::Rect => create_rect(10, 10, 70, 40),
            ElementKind::Circle => create_circle_centered(60, 30, 20),
            ElementKind::Text => create_text(12, 12, "New Text"),
        }
    }
}
