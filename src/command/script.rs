use std::num::ParseIntError;

use log::warn;
use thiserror::Error;

use crate::element::{COORDINATE_LIMIT, Element, factory, in_coordinate_range};

/// Why a single script line could not be turned into a shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("`{command}` expects {expected} argument(s), found {found}")]
    MissingArgument {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("`{command}` expects {expected} argument(s), found {found}")]
    TooManyArguments {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid integer `{token}`: {source}")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("coordinate `{token}` is outside -{limit}..={limit}")]
    OutOfRange { token: String, limit: i32 },
}

/// A failed line, reported without stopping the rest of the script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to parse line {line_number}: {line} ({source})")]
pub struct LineError {
    /// 1-based line number in the script.
    pub line_number: usize,
    pub line: String,
    #[source]
    pub source: CommandError,
}

/// One shape-producing line of the editor script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// `text x y words...`
    Text { x: i32, y: i32, text: String },
    /// `rect x1 y1 x2 y2`
    Rect { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// `circle x y r`
    Circle { x: i32, y: i32, r: i32 },
}

impl DrawCommand {
    /// Build the element this line describes. Rotation always starts at 0.
    pub fn to_element(&self) -> Element {
        match self {
            DrawCommand::Text { x, y, text } => factory::create_text(*x, *y, text.as_str()),
            DrawCommand::Rect { x1, y1, x2, y2 } => {
                factory::create_rect_from_corners(*x1, *y1, *x2, *y2)
            }
            DrawCommand::Circle { x, y, r } => factory::create_circle_centered(*x, *y, *r),
        }
    }
}

/// Result of parsing a whole script: the good lines plus every failure.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedScript {
    pub commands: Vec<DrawCommand>,
    pub errors: Vec<LineError>,
}

fn parse_int(token: &str) -> Result<i32, CommandError> {
    let value: i32 = token.parse().map_err(|source| CommandError::InvalidInteger {
        token: token.to_string(),
        source,
    })?;
    if !in_coordinate_range(value) {
        return Err(CommandError::OutOfRange {
            token: token.to_string(),
            limit: COORDINATE_LIMIT,
        });
    }
    Ok(value)
}

fn int_args<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[i32; N], CommandError> {
    if args.len() < N {
        return Err(CommandError::MissingArgument {
            command,
            expected: N,
            found: args.len(),
        });
    }
    if args.len() > N {
        return Err(CommandError::TooManyArguments {
            command,
            expected: N,
            found: args.len(),
        });
    }
    let mut values = [0; N];
    for (value, token) in values.iter_mut().zip(args) {
        *value = parse_int(token)?;
    }
    Ok(values)
}

/// Parse one script line.
///
/// Blank lines, `#` comments and unknown commands yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<DrawCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let args = &tokens[1..];
    let command = match tokens[0].to_lowercase().as_str() {
        "text" => {
            if args.len() < 2 {
                return Err(CommandError::MissingArgument {
                    command: "text",
                    expected: 2,
                    found: args.len(),
                });
            }
            DrawCommand::Text {
                x: parse_int(args[0])?,
                y: parse_int(args[1])?,
                text: args[2..].join(" "),
            }
        }
        "rect" => {
            let [x1, y1, x2, y2] = int_args::<4>("rect", args)?;
            DrawCommand::Rect { x1, y1, x2, y2 }
        }
        "circle" => {
            let [x, y, r] = int_args::<3>("circle", args)?;
            DrawCommand::Circle { x, y, r }
        }
        other => {
            warn!("Ignoring unknown command `{}`", other);
            return Ok(None);
        }
    };
    Ok(Some(command))
}

/// Parse every line, collecting failures instead of stopping at the first.
pub fn parse_script(script: &str) -> ParsedScript {
    let mut parsed = ParsedScript::default();
    for (index, line) in script.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(command)) => parsed.commands.push(command),
            Ok(None) => {}
            Err(source) => {
                let error = LineError {
                    line_number: index + 1,
                    line: line.trim().to_string(),
                    source,
                };
                warn!("{}", error);
                parsed.errors.push(error);
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_is_case_insensitive() {
        assert_eq!(
            parse_line("  RECT 1 2 3 4 ").unwrap(),
            Some(DrawCommand::Rect {
                x1: 1,
                y1: 2,
                x2: 3,
                y2: 4
            })
        );
    }

    #[test]
    fn test_text_joins_words_with_single_spaces() {
        assert_eq!(
            parse_line("text 8 8   Hello    Simulator").unwrap(),
            Some(DrawCommand::Text {
                x: 8,
                y: 8,
                text: "Hello Simulator".to_string()
            })
        );
        assert_eq!(
            parse_line("text 1 2").unwrap(),
            Some(DrawCommand::Text {
                x: 1,
                y: 2,
                text: String::new()
            })
        );
    }

    #[test]
    fn test_comments_blanks_and_unknown_are_skipped() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # rect 1 2 3 4").unwrap(), None);
        assert_eq!(parse_line("line 0 0 10 10").unwrap(), None);
    }

    #[test]
    fn test_arity_errors() {
        assert_eq!(
            parse_line("circle 1 2").unwrap_err(),
            CommandError::MissingArgument {
                command: "circle",
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            parse_line("rect 1 2 3 4 5").unwrap_err(),
            CommandError::TooManyArguments {
                command: "rect",
                expected: 4,
                found: 5
            }
        );
        assert!(matches!(
            parse_line("text x 2 hi").unwrap_err(),
            CommandError::InvalidInteger { ref token, .. } if token == "x"
        ));
    }

    #[test]
    fn test_parsed_script_is_cloneable() {
        let parsed = parse_script("rect 1 2 3 4\ncircle 1 x 3");
        let copy = parsed.clone();
        assert_eq!(copy, parsed);
        assert_eq!(copy.errors[0].line_number, 2);
    }

    #[test]
    fn test_coordinates_past_int16_are_rejected() {
        assert_eq!(
            parse_line("circle 0 0 2000000000").unwrap_err(),
            CommandError::OutOfRange {
                token: "2000000000".to_string(),
                limit: COORDINATE_LIMIT
            }
        );
        assert!(matches!(
            parse_line("rect 0 -40000 1 1").unwrap_err(),
            CommandError::OutOfRange { ref token, .. } if token == "-40000"
        ));
        assert!(parse_line("circle 32767 -32767 32767").unwrap().is_some());
    }
}
