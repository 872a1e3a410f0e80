//! Forward direction: element model → Adafruit GFX sketch.
//!
//! The output is a pure function of the display size and the ordered
//! elements. The reverse parser in [`crate::code_parser`] recognises exactly
//! the call spellings emitted here.

use crate::element::{Element, ElementKind};

fn header(width: u32, height: u32) -> Vec<String> {
    vec![
        "#include <Adafruit_GFX.h>".to_string(),
        "#include <Adafruit_SSD1306.h>".to_string(),
        format!("#define SCREEN_WIDTH {width}"),
        format!("#define SCREEN_HEIGHT {height}"),
        "// Assuming a standard I2C connection and OLED type (adjust for other displays/protocols)"
            .to_string(),
        "Adafruit_SSD1306 display(SCREEN_WIDTH, SCREEN_HEIGHT, &Wire);".to_string(),
        String::new(),
        "void setup() {".to_string(),
        "  // Serial.begin(115200); // Uncomment for debugging".to_string(),
        "  if(!display.begin(SSD1306_SWITCHCAPVCC, 0x3C)) {".to_string(),
        "    // Serial.println(F(\"SSD1306 allocation failed\"));".to_string(),
        "    for(;;); // Don't proceed, loop forever".to_string(),
        "  }".to_string(),
        "  display.clearDisplay();".to_string(),
        "  display.setTextColor(WHITE);".to_string(),
    ]
}

const FOOTER: [&str; 6] = [
    "  display.display();",
    "}",
    "",
    "void loop() {",
    "  // Your main loop code here",
    "}",
];

/// Body statements for one element.
///
/// Text payloads are emitted verbatim: quotes and backslashes are not
/// escaped.
pub fn element_lines(element: &Element) -> Vec<String> {
    match element.kind {
        ElementKind::Text => vec![format!(
            "  display.setCursor({}, {}); display.print(\"{}\");",
            element.x, element.y, element.text
        )],
        ElementKind::Rect => {
            let mut lines = Vec::with_capacity(3);
            if element.is_rotated() {
                lines.push(format!(
                    "  // WARNING: Rotated rectangle (rotation={}°) - Not supported by Adafruit_GFX::drawRect.",
                    element.rotation
                ));
                lines.push(
                    "  // Drawing the bounding box based on unrotated coordinates.".to_string(),
                );
            }
            lines.push(format!(
                "  display.drawRect({}, {}, {}, {}, WHITE);",
                element.x, element.y, element.w, element.h
            ));
            lines
        }
        ElementKind::Circle => {
            let (cx, cy, r) = element.circle_params();
            vec![format!("  display.drawCircle({cx}, {cy}, {r}, WHITE);")]
        }
    }
}

/// Render the whole sketch. Lines are joined with `\n` and there is no
/// trailing newline.
pub fn generate<'a>(
    width: u32,
    height: u32,
    elements: impl IntoIterator<Item = &'a Element>,
) -> String {
    let mut lines = header(width, height);
    for element in elements {
        lines.extend(element_lines(element));
    }
    lines.extend(FOOTER.iter().map(|line| line.to_string()));
    lines.join("\n")
}
