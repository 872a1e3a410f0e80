use egui::Pos2;
use log::debug;

use super::{
    BoundingBox, Corner, DisplayBounds, Point, PointMetrics, TextMetrics, apply_box, bounding_box,
};
use crate::element::{Element, ElementKind, normalize_rotation};
use crate::error::EditError;

/// Translate an element by `(dx, dy)` without letting it leave the display.
///
/// Each axis is clamped on its own: if the box would cross an edge, that
/// axis' delta is cut down to exactly touch it. Returns the delta that was
/// actually applied.
pub fn move_element(
    element: &mut Element,
    dx: i32,
    dy: i32,
    bounds: &DisplayBounds,
    metrics: &dyn TextMetrics,
) -> (i32, i32) {
    let bbox = bounding_box(element, bounds.padding, metrics);

    let final_dx = clamp_delta(dx, bbox.x1, bbox.x2, bounds.left(), bounds.right());
    let final_dy = clamp_delta(dy, bbox.y1, bbox.y2, bounds.top(), bounds.bottom());

    match element.kind {
        ElementKind::Text => {
            element.x = element.x.saturating_add(final_dx);
            element.y = element.y.saturating_add(final_dy);
        }
        ElementKind::Rect | ElementKind::Circle => {
            apply_box(element, bbox.translate(final_dx, final_dy), bounds.padding);
        }
    }

    (final_dx, final_dy)
}

// Worked in i64 so an extreme delta cannot overflow. The far edge wins when
// the box is wider than the display.
fn clamp_delta(delta: i32, low: i32, high: i32, min: i32, max: i32) -> i32 {
    let mut delta = i64::from(delta);
    let (low, high) = (i64::from(low), i64::from(high));
    if low + delta < i64::from(min) {
        delta = i64::from(min) - low;
    }
    if high + delta > i64::from(max) {
        delta = i64::from(max) - high;
    }
    delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Resize a Rect or Circle by dragging the corner opposite `anchor` to
/// `pointer`.
///
/// The anchor corner stays put. If the new box is narrower or shorter than
/// `min_size`, the dragged edge is pushed outward until it is not. Circles
/// stay square: the longer side wins and the dragged edges follow it.
pub fn resize_element(
    element: &mut Element,
    anchor: Corner,
    pointer: Point,
    padding: i32,
    min_size: i32,
) -> Result<(), EditError> {
    if !element.kind.is_resizable() {
        return Err(EditError::NotResizable(element.kind));
    }

    let bbox = bounding_box(element, padding, &PointMetrics);
    let fixed = bbox.corner(anchor);
    let dragged = anchor.opposite();

    let (mut x1, mut x2) = if dragged.is_left() {
        (pointer.x, fixed.x)
    } else {
        (fixed.x, pointer.x)
    };
    let (mut y1, mut y2) = if dragged.is_top() {
        (pointer.y, fixed.y)
    } else {
        (fixed.y, pointer.y)
    };

    if x2.saturating_sub(x1) < min_size {
        if dragged.is_left() {
            x1 = x2.saturating_sub(min_size);
        } else {
            x2 = x1.saturating_add(min_size);
        }
    }
    if y2.saturating_sub(y1) < min_size {
        if dragged.is_top() {
            y1 = y2.saturating_sub(min_size);
        } else {
            y2 = y1.saturating_add(min_size);
        }
    }

    if element.kind == ElementKind::Circle {
        let side = x2.saturating_sub(x1).max(y2.saturating_sub(y1));
        if dragged.is_left() {
            x1 = x2.saturating_sub(side);
        } else {
            x2 = x1.saturating_add(side);
        }
        if dragged.is_top() {
            y1 = y2.saturating_sub(side);
        } else {
            y2 = y1.saturating_add(side);
        }
    }

    let new_box = BoundingBox { x1, y1, x2, y2 };
    apply_box(element, new_box, padding);
    debug!(
        "Resized {} {} to {}x{} at ({}, {})",
        element.kind, element.id, element.w, element.h, element.x, element.y
    );
    Ok(())
}

/// Add `delta_degrees` to a Rect's rotation and return its new outline.
///
/// Circles and text are left untouched and yield `None`.
pub fn rotate_element(
    element: &mut Element,
    delta_degrees: i32,
    padding: i32,
) -> Option<[Pos2; 4]> {
    if element.kind != ElementKind::Rect {
        return None;
    }
    element.rotation = normalize_rotation(i64::from(element.rotation) + i64::from(delta_degrees));
    Some(rotated_corners(element, padding))
}

/// Corners (TL, TR, BR, BL of the unrotated box) rotated about the box centre
/// by the element's absolute rotation.
pub fn rotated_corners(element: &Element, padding: i32) -> [Pos2; 4] {
    let x1 = element.x.saturating_add(padding) as f32;
    let y1 = element.y.saturating_add(padding) as f32;
    let w = element.w as f32;
    let h = element.h as f32;
    let cx = x1 + w / 2.0;
    let cy = y1 + h / 2.0;

    let (sin, cos) = (element.rotation as f32).to_radians().sin_cos();
    let offsets = [
        (-w / 2.0, -h / 2.0),
        (w / 2.0, -h / 2.0),
        (w / 2.0, h / 2.0),
        (-w / 2.0, h / 2.0),
    ];
    offsets.map(|(dx, dy)| egui::pos2(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    #[test]
    fn test_rotated_corners_quarter_turn() {
        let mut rect = factory::create_rect(0, 0, 20, 10);
        rect.rotation = 90;
        let corners = rotated_corners(&rect, 0);
        // Centre (10, 5); TL offset (-10, -5) rotates to (5, -10).
        assert!((corners[0].x - 15.0).abs() < 1e-4);
        assert!((corners[0].y - -5.0).abs() < 1e-4);
    }

    #[test]
    fn test_unrotated_corners_match_box() {
        let rect = factory::create_rect(3, 4, 10, 6);
        let corners = rotated_corners(&rect, 12);
        assert_eq!(corners[0], egui::pos2(15.0, 16.0));
        assert_eq!(corners[2], egui::pos2(25.0, 22.0));
    }

    #[test]
    fn test_resize_text_is_rejected() {
        let mut text = factory::create_text(0, 0, "abc");
        let result = resize_element(&mut text, Corner::TopLeft, Point::new(50, 50), 12, 6);
        assert!(matches!(result, Err(EditError::NotResizable(ElementKind::Text))));
    }
}
