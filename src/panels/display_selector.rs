use crate::config::{
    CUSTOM_DISPLAY_NAME, DISPLAY_PRESETS, DesignerConfig, find_preset, parse_custom_dimensions,
};

/// Widget state of the start screen.
#[derive(Debug, Clone, Default)]
pub struct DisplaySelectorState {
    pub choice: String,
    pub custom_width: String,
    pub custom_height: String,
    pub error: Option<String>,
}

impl DisplaySelectorState {
    pub fn from_config(config: &DesignerConfig) -> Self {
        let choice = match find_preset(&config.display_name) {
            Some(preset) => preset.name.to_string(),
            None => CUSTOM_DISPLAY_NAME.to_string(),
        };
        Self {
            choice,
            custom_width: config.width.to_string(),
            custom_height: config.height.to_string(),
            error: None,
        }
    }

    /// The config to open the editor with, or the message to show.
    fn resolve(&self, base: &DesignerConfig) -> Result<DesignerConfig, String> {
        if let Some(preset) = find_preset(&self.choice) {
            return Ok(base.for_preset(preset));
        }
        let (width, height) = parse_custom_dimensions(&self.custom_width, &self.custom_height)
            .map_err(|e| e.to_string())?;
        Ok(base.for_display(format!("{} {}x{}", CUSTOM_DISPLAY_NAME, width, height), width, height))
    }
}

/// Start screen. Returns the chosen display once the user confirms it.
pub fn display_selector(
    base: &DesignerConfig,
    state: &mut DisplaySelectorState,
    ctx: &egui::Context,
) -> Option<DesignerConfig> {
    let mut chosen = None;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Select Display Type");
        ui.add_space(8.0);

        egui::ComboBox::from_id_salt("display_type")
            .selected_text(state.choice.as_str())
            .show_ui(ui, |ui| {
                for preset in DISPLAY_PRESETS.iter() {
                    ui.selectable_value(&mut state.choice, preset.name.to_string(), preset.name);
                }
                ui.selectable_value(
                    &mut state.choice,
                    CUSTOM_DISPLAY_NAME.to_string(),
                    CUSTOM_DISPLAY_NAME,
                );
            });

        if state.choice == CUSTOM_DISPLAY_NAME {
            egui::Grid::new("custom_dimensions")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Width:");
                    ui.text_edit_singleline(&mut state.custom_width);
                    ui.end_row();
                    ui.label("Height:");
                    ui.text_edit_singleline(&mut state.custom_height);
                    ui.end_row();
                });
        }

        ui.add_space(8.0);
        if ui.button("Start Designing").clicked() {
            match state.resolve(base) {
                Ok(config) => {
                    state.error = None;
                    chosen = Some(config);
                }
                Err(message) => {
                    log::warn!("Rejected display size: {}", message);
                    state.error = Some(message);
                }
            }
        }

        if let Some(error) = &state.error {
            ui.colored_label(egui::Color32::RED, error.as_str());
        }
    });
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_choice_validates_fields() {
        let mut state = DisplaySelectorState::from_config(&DesignerConfig::default());
        assert_eq!(state.choice, "OLED 128x64");

        state.choice = CUSTOM_DISPLAY_NAME.to_string();
        state.custom_width = "96".to_string();
        state.custom_height = "abc".to_string();
        assert_eq!(
            state.resolve(&DesignerConfig::default()).unwrap_err(),
            "Enter positive integers for width & height."
        );

        state.custom_height = "16".to_string();
        let config = state.resolve(&DesignerConfig::default()).unwrap();
        assert_eq!((config.width, config.height), (96, 16));
        assert_eq!(config.display_name, "Custom 96x16");
    }
}
