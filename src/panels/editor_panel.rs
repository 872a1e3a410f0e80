use crate::app::EditorSession;
use crate::command::Command;
use crate::element::ElementKind;

/// Left panel: the editor script and the element buttons.
///
/// Returns true when the user asked to pick another display.
pub fn editor_panel(session: &mut EditorSession, ctx: &egui::Context) -> bool {
    let mut change_display = false;
    let mut commands = Vec::new();

    egui::SidePanel::left("editor_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Editor Commands");
            ui.label("text x y words | rect x1 y1 x2 y2 | circle x y r");
            ui.add(
                egui::TextEdit::multiline(&mut session.script)
                    .code_editor()
                    .desired_rows(10)
                    .desired_width(f32::INFINITY),
            );
            if ui.button("Run").clicked() {
                commands.push(Command::RunScript(session.script.clone()));
            }
            for error in &session.line_errors {
                ui.colored_label(egui::Color32::LIGHT_RED, error.as_str());
            }

            ui.separator();
            ui.horizontal(|ui| {
                for kind in [ElementKind::Rect, ElementKind::Circle, ElementKind::Text] {
                    if ui.button(format!("Add {}", kind)).clicked() {
                        commands.push(Command::AddElement(kind));
                    }
                }
            });

            let has_selection = session.context.selected().is_some();
            let step = session.config.rotate_step;
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                    .clicked()
                {
                    commands.push(Command::DeleteSelected);
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new(format!("⟲ {}°", step)))
                    .clicked()
                {
                    commands.push(Command::RotateSelected(-step));
                }
                if ui
                    .add_enabled(has_selection, egui::Button::new(format!("⟳ {}°", step)))
                    .clicked()
                {
                    commands.push(Command::RotateSelected(step));
                }
            });

            if let Some(element) = session.context.selected_element() {
                ui.label(format!(
                    "Selected {} {}: x={} y={} w={} h={} rotation={}°",
                    element.kind,
                    element.id,
                    element.x,
                    element.y,
                    element.w,
                    element.h,
                    element.rotation
                ));
            }

            ui.separator();
            if let Some(status) = &session.status {
                ui.label(status.as_str());
            }
            if ui.button("Change Display").clicked() {
                change_display = true;
            }
        });

    for command in commands {
        session.execute(command);
    }
    change_display
}

/// Right panel: the generated code, editable and re-parseable.
pub fn code_panel(session: &mut EditorSession, ctx: &egui::Context) {
    let mut apply = false;

    egui::SidePanel::right("code_panel")
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Generated Code");
                if ui.button("Apply Code").clicked() {
                    apply = true;
                }
            });
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut session.code_buffer)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

    if apply {
        session.execute(Command::ApplyCode(session.code_buffer.clone()));
    }
}
