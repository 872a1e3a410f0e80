use egui::CursorIcon;

use super::{BoundingBox, DisplayBounds, Point, TextMetrics, bounding_box};
use crate::document::Document;
use crate::element::{Element, ElementId, ElementKind};

/// Represents a corner of a bounding box, listed in TL, TR, BR, BL order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomRight => "bottom_right",
            Corner::BottomLeft => "bottom_left",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomRight => Corner::TopLeft,
            Corner::BottomLeft => Corner::TopRight,
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft => CursorIcon::ResizeNwSe,
            Corner::TopRight => CursorIcon::ResizeNeSw,
            Corner::BottomRight => CursorIcon::ResizeNwSe,
            Corner::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }
}

/// What part of an element the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Body,
    Handle(Corner),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ElementId,
    pub target: HitTarget,
}

/// Corner of `bbox` closest to `point`. Ties go to the earlier corner in
/// TL, TR, BR, BL order.
pub fn nearest_corner(bbox: &BoundingBox, point: Point) -> Corner {
    let mut best = Corner::TopLeft;
    let mut best_distance = f64::INFINITY;
    for corner in Corner::ALL {
        let distance = point.distance(bbox.corner(corner));
        if distance < best_distance {
            best = corner;
            best_distance = distance;
        }
    }
    best
}

/// Resize handle centres for an element, or `None` for kinds without handles.
///
/// Rotated rects keep their handles on the unrotated box, which is the box
/// the model stores and the generated code draws.
pub fn handle_positions(element: &Element, padding: i32) -> Option<[(Corner, Point); 4]> {
    if !element.kind.is_resizable() {
        return None;
    }
    let bbox = bounding_box(element, padding, &super::PointMetrics);
    Some(Corner::ALL.map(|corner| (corner, bbox.corner(corner))))
}

fn point_in_handle(point: Point, center: Point, handle_size: i32) -> bool {
    let half = handle_size as f32 / 2.0;
    (point.x - center.x).abs() as f32 <= half && (point.y - center.y).abs() as f32 <= half
}

fn hit_test_rotated_rect(element: &Element, padding: i32, point: Point) -> bool {
    let x1 = element.x.saturating_add(padding) as f32;
    let y1 = element.y.saturating_add(padding) as f32;
    let half_w = element.w.abs() as f32 / 2.0;
    let half_h = element.h.abs() as f32 / 2.0;
    let cx = x1 + element.w as f32 / 2.0;
    let cy = y1 + element.h as f32 / 2.0;

    // Undo the rotation so the test is against the axis-aligned box.
    let (sin, cos) = (-(element.rotation as f32)).to_radians().sin_cos();
    let vx = point.x as f32 - cx;
    let vy = point.y as f32 - cy;
    let lx = vx * cos - vy * sin;
    let ly = vx * sin + vy * cos;
    lx.abs() <= half_w + 0.5 && ly.abs() <= half_h + 0.5
}

fn hit_test_ellipse(bbox: &BoundingBox, point: Point) -> bool {
    let rx = bbox.width() as f32 / 2.0 + 0.5;
    let ry = bbox.height() as f32 / 2.0 + 0.5;
    let center = bbox.center();
    let dx = (point.x as f32 - center.x) / rx;
    let dy = (point.y as f32 - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

/// Whether `point` falls on the element's visible footprint.
pub fn element_contains(
    element: &Element,
    point: Point,
    padding: i32,
    metrics: &dyn TextMetrics,
) -> bool {
    let bbox = bounding_box(element, padding, metrics);
    match element.kind {
        ElementKind::Rect if element.is_rotated() => hit_test_rotated_rect(element, padding, point),
        ElementKind::Rect | ElementKind::Text => bbox.contains(point),
        ElementKind::Circle => hit_test_ellipse(&bbox, point),
    }
}

/// Find what lies under `point`.
///
/// Handles of the `selected` element win over any body. Otherwise the
/// topmost (most recently inserted) element whose footprint contains the
/// point is returned. Points outside the display hit nothing.
pub fn hit_test(
    document: &Document,
    selected: Option<ElementId>,
    point: Point,
    bounds: &DisplayBounds,
    metrics: &dyn TextMetrics,
    handle_size: i32,
) -> Option<Hit> {
    if !bounds.contains(point) {
        return None;
    }

    if let Some(element) = selected.and_then(|id| document.get(id)) {
        if let Some(handles) = handle_positions(element, bounds.padding) {
            for (corner, center) in handles {
                if point_in_handle(point, center, handle_size) {
                    return Some(Hit {
                        id: element.id,
                        target: HitTarget::Handle(corner),
                    });
                }
            }
        }
    }

    document
        .iter()
        .rev()
        .find(|element| element_contains(element, point, bounds.padding, metrics))
        .map(|element| Hit {
            id: element.id,
            target: HitTarget::Body,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for corner in Corner::ALL {
            assert_eq!(corner.opposite().opposite(), corner);
            assert_ne!(corner.opposite(), corner);
        }
    }

    #[test]
    fn test_nearest_corner_tie_prefers_first() {
        let bbox = BoundingBox {
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 10,
        };
        // Equidistant from all four corners.
        assert_eq!(nearest_corner(&bbox, Point::new(5, 5)), Corner::TopLeft);
        // Equidistant from TR and BR.
        assert_eq!(nearest_corner(&bbox, Point::new(12, 5)), Corner::TopRight);
        assert_eq!(nearest_corner(&bbox, Point::new(9, 9)), Corner::BottomRight);
        assert_eq!(nearest_corner(&bbox, Point::new(1, 8)), Corner::BottomLeft);
    }
}
