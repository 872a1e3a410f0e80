//! Reverse direction: heuristic sketch → element model.
//!
//! Each shape has its own grammar, scanned independently over the whole text.
//! Only non-negative decimal literals in the exact call spellings and within
//! the `int16_t` coordinate range are recognised; anything else is ignored,
//! never reported. Rotation cannot be recovered and always comes back as 0.

use log::{debug, info};
use regex::Regex;

use crate::element::{Element, factory, in_coordinate_range};
use crate::error::GrammarError;

/// A family of calls taking a fixed number of integer arguments.
struct CallGrammar {
    shape: &'static str,
    spellings: &'static [&'static str],
    arity: usize,
    build: fn(&[i32]) -> Element,
}

const RECT_GRAMMAR: CallGrammar = CallGrammar {
    shape: "rect",
    spellings: &["drawRect", "fillRect"],
    arity: 4,
    build: build_rect,
};

const CIRCLE_GRAMMAR: CallGrammar = CallGrammar {
    shape: "circle",
    spellings: &["drawCircle", "fillCircle"],
    arity: 3,
    build: build_circle,
};

fn build_rect(args: &[i32]) -> Element {
    factory::create_rect(args[0], args[1], args[2], args[3])
}

fn build_circle(args: &[i32]) -> Element {
    factory::create_circle_centered(args[0], args[1], args[2])
}

const TEXT_PATTERN: &str = r#"setCursor\((\d+),\s*(\d+)\);\s*display\.print\("([^"]*)"\)"#;

/// One compiled shape grammar.
pub trait ShapeGrammar {
    fn shape(&self) -> &'static str;

    /// Every element this grammar recognises in `text`, in scan order.
    fn scan(&self, text: &str) -> Vec<Element>;
}

struct CompiledCall {
    shape: &'static str,
    // One pattern per spelling, scanned in turn.
    patterns: Vec<Regex>,
    build: fn(&[i32]) -> Element,
}

impl CompiledCall {
    fn compile(grammar: &CallGrammar) -> Result<Self, GrammarError> {
        let args = vec![r"(\d+)"; grammar.arity].join(r",\s*");
        let patterns = grammar
            .spellings
            .iter()
            .map(|name| Regex::new(&format!(r"{}\({}", regex::escape(name), args)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| GrammarError {
                shape: grammar.shape,
                source,
            })?;
        Ok(Self {
            shape: grammar.shape,
            patterns,
            build: grammar.build,
        })
    }
}

impl ShapeGrammar for CompiledCall {
    fn shape(&self) -> &'static str {
        self.shape
    }

    fn scan(&self, text: &str) -> Vec<Element> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(text) {
                let args: Option<Vec<i32>> = caps
                    .iter()
                    .skip(1)
                    .map(|m| {
                        m.and_then(|m| m.as_str().parse::<i32>().ok())
                            .filter(|value| in_coordinate_range(*value))
                    })
                    .collect();
                match args {
                    Some(args) => found.push((self.build)(&args)),
                    None => debug!("Skipping {} call with out-of-range arguments", self.shape),
                }
            }
        }
        found
    }
}

struct CompiledText {
    pattern: Regex,
}

impl ShapeGrammar for CompiledText {
    fn shape(&self) -> &'static str {
        "text"
    }

    fn scan(&self, text: &str) -> Vec<Element> {
        let mut found = Vec::new();
        for caps in self.pattern.captures_iter(text) {
            let x = caps[1].parse::<i32>().ok().filter(|x| in_coordinate_range(*x));
            let y = caps[2].parse::<i32>().ok().filter(|y| in_coordinate_range(*y));
            match (x, y) {
                (Some(x), Some(y)) => found.push(factory::create_text(x, y, &caps[3])),
                _ => debug!("Skipping text call with out-of-range cursor"),
            }
        }
        found
    }
}

/// Rebuilds elements from generated-style code.
pub struct CodeParser {
    grammars: Vec<Box<dyn ShapeGrammar>>,
}

impl std::fmt::Debug for CodeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shapes: Vec<_> = self.grammars.iter().map(|g| g.shape()).collect();
        f.debug_struct("CodeParser").field("grammars", &shapes).finish()
    }
}

impl CodeParser {
    pub fn new() -> Result<Self, GrammarError> {
        let text = Regex::new(TEXT_PATTERN).map_err(|source| GrammarError {
            shape: "text",
            source,
        })?;
        let mut grammars: Vec<Box<dyn ShapeGrammar>> = Vec::with_capacity(3);
        grammars.push(Box::new(CompiledCall::compile(&RECT_GRAMMAR)?));
        grammars.push(Box::new(CompiledCall::compile(&CIRCLE_GRAMMAR)?));
        grammars.push(Box::new(CompiledText { pattern: text }));
        Ok(Self { grammars })
    }

    /// All recognised elements: rects first, then circles, then text.
    pub fn parse(&self, text: &str) -> Vec<Element> {
        let mut elements = Vec::new();
        for grammar in &self.grammars {
            let found = grammar.scan(text);
            debug!("Matched {} {} element(s)", found.len(), grammar.shape());
            elements.extend(found);
        }
        info!("Parsed {} element(s) from code", elements.len());
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_both_spellings_rects_before_circles() {
        let parser = CodeParser::new().unwrap();
        let code = "display.fillCircle(5, 6, 2, WHITE);\n\
                    display.fillRect(1, 2, 3, 4, WHITE);\n\
                    display.drawRect(10,20,  30, 40, WHITE);";
        let elements = parser.parse(code);
        let summary: Vec<_> = elements.iter().map(|e| (e.kind, e.x, e.y, e.w, e.h)).collect();
        assert_eq!(
            summary,
            vec![
                (ElementKind::Rect, 10, 20, 30, 40),
                (ElementKind::Rect, 1, 2, 3, 4),
                (ElementKind::Circle, 3, 4, 4, 4),
            ]
        );
    }

    #[test]
    fn test_negative_and_expressions_are_ignored() {
        let parser = CodeParser::new().unwrap();
        let code = "display.drawRect(-1, 2, 3, 4, WHITE);\n\
                    display.drawCircle(x, 10, 5, WHITE);\n\
                    display.drawLine(0, 0, 10, 10, WHITE);";
        assert!(parser.parse(code).is_empty());
    }

    #[test]
    fn test_text_requires_display_print() {
        let parser = CodeParser::new().unwrap();
        let code = "display.setCursor(4, 9);   display.print(\"Hello there\");\n\
                    display.setCursor(1, 1); Serial.print(\"nope\");";
        let elements = parser.parse(code);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].text, "Hello there");
        assert_eq!((elements[0].x, elements[0].y), (4, 9));
    }

    #[test]
    fn test_overflowing_literal_is_skipped() {
        let parser = CodeParser::new().unwrap();
        let code = "drawRect(99999999999, 0, 1, 1);\ndrawRect(1, 1, 8, 8);";
        let elements = parser.parse(code);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].w, 8);
    }

    #[test]
    fn test_literal_past_int16_is_skipped() {
        let parser = CodeParser::new().unwrap();
        let code = "display.drawCircle(0, 0, 1500000000, WHITE);\n\
                    display.drawRect(2147483647, 0, 1, 1, WHITE);\n\
                    display.setCursor(40000, 1); display.print(\"far\");\n\
                    display.drawCircle(32767, 0, 32767, WHITE);";
        let elements = parser.parse(code);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::Circle);
        assert_eq!(elements[0].w, 65534);
    }
}
