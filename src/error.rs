use thiserror::Error;

use crate::element::{ElementId, ElementKind};
use crate::state::StateTransitionError;

/// Errors from operations that mutate the element model.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("No element with handle {0}")]
    UnknownElement(ElementId),

    #[error("{0} elements cannot be resized")]
    NotResizable(ElementKind),

    #[error(transparent)]
    Transition(#[from] StateTransitionError),
}

/// Invalid custom display dimensions, rejected before the editor opens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    #[error("Enter positive integers for width & height.")]
    NotAnInteger(String),

    #[error("Enter positive integers for width & height.")]
    NotPositive(i64),

    #[error("Width and height must be at most {max}.")]
    TooLarge { value: i64, max: u32 },
}

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid display size: {0}")]
    Dimensions(#[from] DimensionError),

    #[error("`{field}` must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

/// A shape grammar failed to compile.
#[derive(Debug, Error)]
#[error("Invalid grammar for {shape}: {source}")]
pub struct GrammarError {
    pub shape: &'static str,
    #[source]
    pub source: regex::Error,
}
