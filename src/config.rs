//! Display presets and editor tunables.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::element::{
    COORDINATE_LIMIT, DISPLAY_PADDING, HANDLE_SIZE, MIN_ELEMENT_SIZE, ROTATE_STEP_DEGREES,
};
use crate::error::{ConfigError, DimensionError};
use crate::geometry::DisplayBounds;

/// Environment variable naming a JSON config file to start from.
pub const CONFIG_ENV_VAR: &str = "DISPLAY_DESIGNER_CONFIG";

/// Largest width or height accepted for a custom display.
pub const MAX_DIMENSION: u32 = 4096;

pub const CUSTOM_DISPLAY_NAME: &str = "Custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

pub static DISPLAY_PRESETS: [DisplayPreset; 3] = [
    DisplayPreset {
        name: "OLED 128x64",
        width: 128,
        height: 64,
    },
    DisplayPreset {
        name: "TFT 240x135",
        width: 240,
        height: 135,
    },
    DisplayPreset {
        name: "TFT 320x240",
        width: 320,
        height: 240,
    },
];

pub fn find_preset(name: &str) -> Option<&'static DisplayPreset> {
    DISPLAY_PRESETS.iter().find(|preset| preset.name == name)
}

pub const DEFAULT_SCRIPT: &str = "text 8 8 Hello Simulator\nrect 10 25 80 45\ncircle 100 30 15";

/// Parse one custom dimension as typed by the user.
pub fn parse_dimension(input: &str) -> Result<u32, DimensionError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| DimensionError::NotAnInteger(trimmed.to_string()))?;
    if value <= 0 {
        return Err(DimensionError::NotPositive(value));
    }
    if value > i64::from(MAX_DIMENSION) {
        return Err(DimensionError::TooLarge {
            value,
            max: MAX_DIMENSION,
        });
    }
    Ok(value as u32)
}

/// Validate both custom dimension fields.
pub fn parse_custom_dimensions(width: &str, height: &str) -> Result<(u32, u32), DimensionError> {
    Ok((parse_dimension(width)?, parse_dimension(height)?))
}

fn validate_dimension(value: u32) -> Result<u32, DimensionError> {
    match value {
        0 => Err(DimensionError::NotPositive(0)),
        v if v > MAX_DIMENSION => Err(DimensionError::TooLarge {
            value: i64::from(v),
            max: MAX_DIMENSION,
        }),
        v => Ok(v),
    }
}

/// Everything the editor session needs to know about its display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    pub display_name: String,
    pub width: u32,
    pub height: u32,
    /// Canvas margin around the display, in canvas pixels.
    pub padding: i32,
    pub min_element_size: i32,
    pub handle_size: i32,
    /// Degrees added or removed by one rotate key press.
    pub rotate_step: i32,
    /// Screen pixels per display pixel in the canvas view.
    pub canvas_zoom: f32,
    pub initial_script: String,
}

fn check_range(field: &'static str, value: i32, min: i32) -> Result<(), ConfigError> {
    if (min..=COORDINATE_LIMIT).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max: COORDINATE_LIMIT,
        })
    }
}

impl Default for DesignerConfig {
    fn default() -> Self {
        let preset = DISPLAY_PRESETS[0];
        Self {
            display_name: preset.name.to_string(),
            width: preset.width,
            height: preset.height,
            padding: DISPLAY_PADDING,
            min_element_size: MIN_ELEMENT_SIZE,
            handle_size: HANDLE_SIZE,
            rotate_step: ROTATE_STEP_DEGREES,
            canvas_zoom: 3.0,
            initial_script: DEFAULT_SCRIPT.to_string(),
        }
    }
}

impl DesignerConfig {
    /// Same tunables, different display.
    pub fn for_display(&self, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            display_name: name.into(),
            width,
            height,
            ..self.clone()
        }
    }

    pub fn for_preset(&self, preset: &DisplayPreset) -> Self {
        self.for_display(preset.name, preset.width, preset.height)
    }

    pub fn bounds(&self) -> DisplayBounds {
        DisplayBounds::new(self.width as i32, self.height as i32, self.padding)
    }

    /// Reject sizes and tunables the editor cannot lay out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimension(self.width)?;
        validate_dimension(self.height)?;
        check_range("padding", self.padding, 0)?;
        check_range("min_element_size", self.min_element_size, 1)?;
        check_range("handle_size", self.handle_size, 1)?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(
            "Loaded config from {}: {} ({}x{})",
            path.display(),
            config.display_name,
            config.width,
            config.height
        );
        Ok(config)
    }

    /// Config named by [`CONFIG_ENV_VAR`], if set and readable.
    pub fn from_env() -> Option<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)?;
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring {}: {}", CONFIG_ENV_VAR, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dimensions_must_be_positive_integers() {
        assert_eq!(parse_custom_dimensions(" 96 ", "48"), Ok((96, 48)));
        assert_eq!(
            parse_custom_dimensions("0", "48"),
            Err(DimensionError::NotPositive(0))
        );
        assert_eq!(
            parse_custom_dimensions("96", "4.5"),
            Err(DimensionError::NotAnInteger("4.5".to_string()))
        );
        assert_eq!(
            parse_dimension("-3").unwrap_err().to_string(),
            "Enter positive integers for width & height."
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DesignerConfig::from_json_str(r#"{"width": 320, "height": 240}"#).unwrap();
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.padding, DISPLAY_PADDING);
        assert_eq!(config.min_element_size, MIN_ELEMENT_SIZE);
        assert_eq!(config.initial_script, DEFAULT_SCRIPT);
    }

    #[test]
    fn test_zero_width_json_is_rejected() {
        let result = DesignerConfig::from_json_str(r#"{"width": 0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::Dimensions(DimensionError::NotPositive(0)))
        ));
    }

    #[test]
    fn test_nonsense_tunables_are_rejected() {
        for (json, field) in [
            (r#"{"min_element_size": 0}"#, "min_element_size"),
            (r#"{"padding": -4}"#, "padding"),
            (r#"{"handle_size": -1}"#, "handle_size"),
            (r#"{"padding": 2147483647}"#, "padding"),
        ] {
            match DesignerConfig::from_json_str(json) {
                Err(ConfigError::OutOfRange { field: rejected, .. }) => assert_eq!(rejected, field),
                other => panic!("{} should be rejected, got {:?}", json, other),
            }
        }
        assert!(DesignerConfig::from_json_str(r#"{"padding": 0}"#).is_ok());
    }

    #[test]
    fn test_preset_lookup() {
        let preset = find_preset("TFT 240x135").unwrap();
        let config = DesignerConfig::default().for_preset(preset);
        assert_eq!(config.bounds().right(), DISPLAY_PADDING + 240);
        assert!(find_preset(CUSTOM_DISPLAY_NAME).is_none());
    }
}
