use egui::{Color32, Pos2, Rect, Stroke};

use crate::app::EditorSession;
use crate::command::Command;
use crate::element::{Element, ElementKind};
use crate::geometry::{self, GfxFontMetrics, HitTarget, Point};

const CANVAS_FILL: Color32 = Color32::from_rgb(40, 40, 40);
const DISPLAY_FILL: Color32 = Color32::BLACK;
const DISPLAY_BORDER: Color32 = Color32::from_rgb(160, 160, 160);
const SELECTION_COLOR: Color32 = Color32::YELLOW;
const TEXT_CELLS: GfxFontMetrics = GfxFontMetrics {
    char_width: 6,
    char_height: 8,
};

/// Maps canvas pixels to screen points.
#[derive(Clone, Copy, Debug)]
struct CanvasView {
    origin: Pos2,
    zoom: f32,
}

impl CanvasView {
    fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.origin + canvas.to_vec2() * self.zoom
    }

    fn to_canvas(&self, screen: Pos2) -> Point {
        Point::from_pos2(((screen - self.origin) / self.zoom).to_pos2())
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }
}

pub fn central_panel(session: &mut EditorSession, ctx: &egui::Context) {
    let zoom = session.config.canvas_zoom.max(1.0);
    let step = session.config.rotate_step;

    egui::CentralPanel::default().show(ctx, |ui| {
        let (width, height) = session.context.display_size();
        ui.heading(format!("{} ({}x{})", session.config.display_name, width, height));

        egui::ScrollArea::both().show(ui, |ui| {
            let (canvas_w, canvas_h) = session.context.bounds().canvas_size();
            let size = egui::vec2(canvas_w as f32 * zoom, canvas_h as f32 * zoom);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let view = CanvasView {
                origin: response.rect.min,
                zoom,
            };

            handle_pointer(session, &response, ui, view);
            paint_canvas(session, &painter, view);

            if let Some(hover) = response.hover_pos() {
                if let Some(hit) = session.context.hit_test(view.to_canvas(hover)) {
                    ui.ctx().set_cursor_icon(match hit.target {
                        HitTarget::Handle(corner) => corner.cursor_icon(),
                        HitTarget::Body => egui::CursorIcon::Move,
                    });
                }
            }
        });
    });

    handle_keyboard(session, ctx, step);
}

fn handle_pointer(
    session: &mut EditorSession,
    response: &egui::Response,
    ui: &egui::Ui,
    view: CanvasView,
) {
    let pressed = ui.input(|i| i.pointer.primary_pressed());
    if pressed {
        if let Some(pos) = response.interact_pointer_pos() {
            session.context.pointer_pressed(view.to_canvas(pos));
        }
    }

    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            match session.context.pointer_dragged(view.to_canvas(pos)) {
                Ok(true) => session.sync_code_buffer(),
                Ok(false) => {}
                Err(e) => log::warn!("Drag step failed: {}", e),
            }
        }
    }

    if response.drag_stopped() || ui.input(|i| i.pointer.primary_released()) {
        session.context.pointer_released();
    }
}

fn handle_keyboard(session: &mut EditorSession, ctx: &egui::Context, step: i32) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let (delete, left, right) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
            i.key_pressed(egui::Key::ArrowLeft),
            i.key_pressed(egui::Key::ArrowRight),
        )
    });
    if delete {
        session.execute(Command::DeleteSelected);
    }
    if left {
        session.execute(Command::RotateSelected(-step));
    }
    if right {
        session.execute(Command::RotateSelected(step));
    }
}

fn paint_canvas(session: &EditorSession, painter: &egui::Painter, view: CanvasView) {
    let context = &session.context;
    let bounds = context.bounds();
    let (canvas_w, canvas_h) = bounds.canvas_size();
    let canvas = Rect::from_min_size(Pos2::ZERO, egui::vec2(canvas_w as f32, canvas_h as f32));
    painter.rect_filled(view.rect_to_screen(canvas), 0.0, CANVAS_FILL);

    let display = view.rect_to_screen(bounds.display_box().to_rect());
    painter.rect_filled(display, 0.0, DISPLAY_FILL);
    painter.rect_stroke(display, 0.0, Stroke::new(1.0, DISPLAY_BORDER));

    let stroke = Stroke::new(1.0_f32.max(view.zoom / 2.0), Color32::WHITE);
    for element in context.document().iter() {
        paint_element(session, painter, view, element, stroke);
    }

    if let Some(outline) = context.selection_outline() {
        painter.rect_stroke(
            view.rect_to_screen(outline.to_rect()),
            0.0,
            Stroke::new(1.0, SELECTION_COLOR),
        );
    }
    if let Some(handles) = context.selection_handles() {
        let side = context.handle_size() as f32 * view.zoom;
        for (_, center) in handles {
            let rect =
                Rect::from_center_size(view.to_screen(center.to_pos2()), egui::vec2(side, side));
            painter.rect_filled(rect, 0.0, SELECTION_COLOR);
        }
    }
}

fn paint_element(
    session: &EditorSession,
    painter: &egui::Painter,
    view: CanvasView,
    element: &Element,
    stroke: Stroke,
) {
    let context = &session.context;
    let padding = context.bounds().padding;
    match element.kind {
        ElementKind::Rect if element.is_rotated() => {
            let points = geometry::rotated_corners(element, padding)
                .iter()
                .map(|p| view.to_screen(*p))
                .collect();
            painter.add(egui::Shape::closed_line(points, stroke));
        }
        ElementKind::Rect => {
            let rect = context.element_box(element).to_rect();
            painter.rect_stroke(view.rect_to_screen(rect), 0.0, stroke);
        }
        ElementKind::Circle => {
            let bbox = context.element_box(element);
            let radius = bbox.width() as f32 / 2.0 * view.zoom;
            painter.circle_stroke(view.to_screen(bbox.center()), radius, stroke);
        }
        ElementKind::Text => {
            // One glyph per font cell, on the grid the hit test measures.
            let anchor = context.element_box(element).corner(geometry::Corner::TopLeft);
            let font = egui::FontId::monospace(TEXT_CELLS.char_height as f32 * view.zoom);
            for (offset, glyph) in TEXT_CELLS.glyph_cells(&element.text) {
                let cell = Point::new(anchor.x + offset.x, anchor.y + offset.y);
                painter.text(
                    view.to_screen(cell.to_pos2()),
                    egui::Align2::LEFT_TOP,
                    glyph,
                    font.clone(),
                    Color32::WHITE,
                );
            }
        }
    }
}
