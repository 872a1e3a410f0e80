use display_designer::code_parser::CodeParser;
use display_designer::codegen;
use display_designer::element::{Element, ElementKind, factory};

fn shape_lines(code: &str) -> Vec<String> {
    let mut lines: Vec<String> = code
        .lines()
        .filter(|line| line.contains("drawRect(") || line.contains("drawCircle("))
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}

fn sample_model() -> Vec<Element> {
    let mut odd_circle = factory::create_circle_centered(30, 30, 10);
    odd_circle.w = 21;
    odd_circle.h = 21;
    vec![
        factory::create_text(8, 8, "Hello Simulator"),
        factory::create_rect(10, 25, 70, 45),
        factory::create_circle_centered(100, 30, 15),
        factory::create_rect(0, 0, 128, 64),
        odd_circle,
    ]
}

#[test]
fn test_single_rect_example() {
    let rect = factory::create_rect(10, 25, 70, 45);
    let code = codegen::generate(128, 64, [&rect]);
    assert!(code.contains("  display.drawRect(10, 25, 70, 45, WHITE);"));

    let parsed = CodeParser::new().unwrap().parse(&code);
    assert_eq!(parsed.len(), 1);
    let back = &parsed[0];
    assert_eq!(back.kind, ElementKind::Rect);
    assert_eq!((back.x, back.y, back.w, back.h), (10, 25, 70, 45));
    assert_eq!(back.rotation, 0);
}

#[test]
fn test_generation_is_deterministic() {
    let model = sample_model();
    let first = codegen::generate(128, 64, &model);
    let second = codegen::generate(128, 64, &model);
    assert_eq!(first, second);
}

#[test]
fn test_body_follows_model_order() {
    let model = sample_model();
    let code = codegen::generate(128, 64, &model);
    let text_at = code.find("display.print(\"Hello Simulator\")").unwrap();
    let rect_at = code.find("drawRect(10, 25, 70, 45").unwrap();
    let circle_at = code.find("drawCircle(100, 30, 15").unwrap();
    assert!(text_at < rect_at && rect_at < circle_at);
    assert!(code.find("display.display();").unwrap() > circle_at);
}

#[test]
fn test_round_trip_reproduces_shapes() {
    let parser = CodeParser::new().unwrap();
    let model = sample_model();
    let code = codegen::generate(128, 64, &model);

    let rebuilt = parser.parse(&code);
    let regenerated = codegen::generate(128, 64, &rebuilt);

    assert_eq!(shape_lines(&regenerated), shape_lines(&code));
    assert_eq!(shape_lines(&code).len(), 4);
}

#[test]
fn test_rotation_is_lost_on_reparse() {
    let mut rect = factory::create_rect(5, 5, 20, 10);
    rect.rotation = 30;
    let code = codegen::generate(128, 64, [&rect]);
    assert!(code.contains("rotation=30°"));

    let parsed = CodeParser::new().unwrap().parse(&code);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].rotation, 0);
    assert_eq!((parsed[0].w, parsed[0].h), (20, 10));
}

#[test]
fn test_text_round_trip() {
    let text = factory::create_text(4, 9, "Hi there");
    let code = codegen::generate(128, 64, [&text]);
    let parsed = CodeParser::new().unwrap().parse(&code);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].kind, ElementKind::Text);
    assert_eq!((parsed[0].x, parsed[0].y), (4, 9));
    assert_eq!(parsed[0].text, "Hi there");
}

#[test]
fn test_unrecognised_code_yields_nothing() {
    let parser = CodeParser::new().unwrap();
    assert!(parser.parse("int main() { return 0; }").is_empty());
    assert!(parser.parse("").is_empty());
}
