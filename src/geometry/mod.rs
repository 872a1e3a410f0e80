//! Coordinate transforms and direct-manipulation math.
//!
//! Everything here works in *canvas* coordinates: display space shifted by
//! the display padding, which is what a pointer over the canvas reports.
//! Conversion back to display space happens when results are written into
//! an [`Element`].

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind};

pub mod hit_testing;
pub mod transform;

pub use hit_testing::{Corner, Hit, HitTarget, handle_positions, hit_test, nearest_corner};
pub use transform::{move_element, resize_element, rotate_element, rotated_corners};

/// Integer canvas position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn from_pos2(p: Pos2) -> Self {
        Self {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }

    pub fn to_pos2(self) -> Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Axis-aligned box `(x1, y1)`–`(x2, y2)` with `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    /// Box spanning two arbitrary corners; the corners are reordered.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn center(&self) -> Pos2 {
        egui::pos2(
            (self.x1 as f32 + self.x2 as f32) / 2.0,
            (self.y1 as f32 + self.y2 as f32) / 2.0,
        )
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x1, self.y1),
            Corner::TopRight => Point::new(self.x2, self.y1),
            Corner::BottomRight => Point::new(self.x2, self.y2),
            Corner::BottomLeft => Point::new(self.x1, self.y2),
        }
    }

    /// Corners in TL, TR, BR, BL order.
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|c| self.corner(c))
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x1: self.x1.saturating_add(dx),
            y1: self.y1.saturating_add(dy),
            x2: self.x2.saturating_add(dx),
            y2: self.y2.saturating_add(dy),
        }
    }

    pub fn inflate(&self, margin: i32) -> Self {
        Self {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }

    /// Inclusive containment, so points on the edge count.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_min_max(
            egui::pos2(self.x1 as f32, self.y1 as f32),
            egui::pos2(self.x2 as f32, self.y2 as f32),
        )
    }
}

/// The simulated display inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub width: i32,
    pub height: i32,
    pub padding: i32,
}

impl DisplayBounds {
    pub fn new(width: i32, height: i32, padding: i32) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn left(&self) -> i32 {
        self.padding
    }

    pub fn top(&self) -> i32 {
        self.padding
    }

    pub fn right(&self) -> i32 {
        self.padding + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.padding + self.height
    }

    /// Full canvas size including the padding on both sides.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.width + 2 * self.padding, self.height + 2 * self.padding)
    }

    pub fn display_box(&self) -> BoundingBox {
        BoundingBox {
            x1: self.left(),
            y1: self.top(),
            x2: self.right(),
            y2: self.bottom(),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.display_box().contains(p)
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }

    pub fn to_canvas(&self, x: i32, y: i32) -> Point {
        Point::new(x + self.padding, y + self.padding)
    }
}

/// Extents of rendered text, supplied by whoever draws it.
pub trait TextMetrics {
    /// Width and height in pixels of `text` as drawn on the canvas.
    fn measure(&self, text: &str) -> (i32, i32);
}

/// Treats text as a point at its anchor.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointMetrics;

impl TextMetrics for PointMetrics {
    fn measure(&self, _text: &str) -> (i32, i32) {
        (0, 0)
    }
}

/// The target library's built-in font: a 6×8 cell per glyph at text size 1.
#[derive(Clone, Copy, Debug)]
pub struct GfxFontMetrics {
    pub char_width: i32,
    pub char_height: i32,
}

impl Default for GfxFontMetrics {
    fn default() -> Self {
        Self {
            char_width: 6,
            char_height: 8,
        }
    }
}

impl GfxFontMetrics {
    /// Top-left offset of each glyph's cell, relative to the text anchor.
    /// These cells tile exactly the box `measure` reports.
    pub fn glyph_cells<'a>(&self, text: &'a str) -> impl Iterator<Item = (Point, char)> + 'a {
        let (w, h) = (self.char_width, self.char_height);
        text.split('\n').enumerate().flat_map(move |(row, line)| {
            line.chars()
                .enumerate()
                .map(move |(column, glyph)| (Point::new(column as i32 * w, row as i32 * h), glyph))
        })
    }
}

impl TextMetrics for GfxFontMetrics {
    fn measure(&self, text: &str) -> (i32, i32) {
        let mut widest = 0usize;
        let mut lines = 0i32;
        for line in text.split('\n') {
            widest = widest.max(line.chars().count());
            lines += 1;
        }
        (widest as i32 * self.char_width, lines * self.char_height)
    }
}

/// Axis-aligned box of an element in canvas coordinates.
///
/// Rect and Circle use their stored `x, y, w, h` (rotation is ignored, the
/// box is the unrotated one). Text is anchored at its top-left corner and
/// extends by whatever `metrics` reports.
pub fn bounding_box(element: &Element, padding: i32, metrics: &dyn TextMetrics) -> BoundingBox {
    let origin = Point::new(
        element.x.saturating_add(padding),
        element.y.saturating_add(padding),
    );
    let (w, h) = match element.kind {
        ElementKind::Rect | ElementKind::Circle => (element.w, element.h),
        ElementKind::Text => metrics.measure(&element.text),
    };
    BoundingBox::from_corners(
        origin,
        Point::new(origin.x.saturating_add(w), origin.y.saturating_add(h)),
    )
}

/// Writes a canvas-space box back into the element's display-space fields.
pub(crate) fn apply_box(element: &mut Element, bbox: BoundingBox, padding: i32) {
    element.x = bbox.x1.saturating_sub(padding);
    element.y = bbox.y1.saturating_sub(padding);
    element.w = bbox.width();
    element.h = bbox.height();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    #[test]
    fn test_bounding_box_normalizes_negative_size() {
        let rect = factory::create_rect_from_corners(50, 40, 10, 20);
        let bbox = bounding_box(&rect, 12, &PointMetrics);
        assert_eq!(
            bbox,
            BoundingBox {
                x1: 22,
                y1: 32,
                x2: 62,
                y2: 52
            }
        );
    }

    #[test]
    fn test_text_box_is_degenerate_without_metrics() {
        let text = factory::create_text(4, 5, "Hi");
        let bbox = bounding_box(&text, 12, &PointMetrics);
        assert_eq!(bbox.width(), 0);
        assert_eq!(bbox.height(), 0);
        assert_eq!(bbox.corner(Corner::TopLeft), Point::new(16, 17));

        let measured = bounding_box(&text, 12, &GfxFontMetrics::default());
        assert_eq!((measured.width(), measured.height()), (12, 8));
    }

    #[test]
    fn test_glyph_cells_tile_measured_box() {
        let metrics = GfxFontMetrics::default();
        let cells: Vec<_> = metrics.glyph_cells("ab\ncde").collect();
        assert_eq!(
            cells,
            vec![
                (Point::new(0, 0), 'a'),
                (Point::new(6, 0), 'b'),
                (Point::new(0, 8), 'c'),
                (Point::new(6, 8), 'd'),
                (Point::new(12, 8), 'e'),
            ]
        );
        let (w, h) = metrics.measure("ab\ncde");
        let right = cells.iter().map(|(p, _)| p.x + metrics.char_width).max();
        let bottom = cells.iter().map(|(p, _)| p.y + metrics.char_height).max();
        assert_eq!((right, bottom), (Some(w), Some(h)));
    }

    #[test]
    fn test_bounding_box_saturates_at_extremes() {
        let rect = factory::create_rect(i32::MAX, 0, 1, 1);
        let bbox = bounding_box(&rect, 12, &PointMetrics);
        assert_eq!((bbox.x1, bbox.x2), (i32::MAX, i32::MAX));
    }
}
