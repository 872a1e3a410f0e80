#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod code_parser;
pub mod codegen;
pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod panels;
pub mod state;

pub use app::{DesignerApp, EditorSession};
pub use code_parser::CodeParser;
pub use command::{Command, CommandOutcome, DrawCommand, LineError};
pub use config::DesignerConfig;
pub use document::Document;
pub use element::{Element, ElementId, ElementKind};
pub use error::{ConfigError, DimensionError, EditError};
pub use geometry::{BoundingBox, Corner, DisplayBounds, Point};
pub use state::{DragMode, EditorContext, EditorState};
