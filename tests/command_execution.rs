use display_designer::codegen;
use display_designer::command::{
    Command, CommandError, CommandOutcome, DrawCommand, parse_line, parse_script,
};
use display_designer::config::DesignerConfig;
use display_designer::element::ElementKind;
use display_designer::error::EditError;
use display_designer::state::EditorContext;

fn create_test_context() -> EditorContext {
    EditorContext::new(&DesignerConfig::default()).unwrap()
}

#[test]
fn test_circle_line_example() {
    let command = parse_line("circle 100 30 15").unwrap().unwrap();
    assert_eq!(command, DrawCommand::Circle { x: 100, y: 30, r: 15 });

    let circle = command.to_element();
    assert_eq!(circle.kind, ElementKind::Circle);
    assert_eq!((circle.x, circle.y, circle.w, circle.h), (85, 15, 30, 30));

    let code = codegen::generate(128, 64, [&circle]);
    assert!(code.contains("drawCircle(100, 30, 15, WHITE);"));
}

#[test]
fn test_bad_lines_do_not_stop_the_batch() {
    let script = "text 8 8 Hello\nrect 1 2 x 4\n\n# comment\ncircle 1 2\nrect 10 25 80 45";
    let parsed = parse_script(script);

    assert_eq!(parsed.commands.len(), 2);
    assert_eq!(parsed.errors.len(), 2);

    let first = &parsed.errors[0];
    assert_eq!(first.line_number, 2);
    assert_eq!(first.line, "rect 1 2 x 4");
    assert!(matches!(first.source, CommandError::InvalidInteger { .. }));
    assert!(first.to_string().starts_with("Failed to parse line 2: rect 1 2 x 4"));

    let second = &parsed.errors[1];
    assert_eq!(second.line_number, 5);
    assert_eq!(
        second.source,
        CommandError::MissingArgument {
            command: "circle",
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn test_inverted_rect_is_accepted() {
    let rect = parse_line("rect 80 45 10 25").unwrap().unwrap().to_element();
    assert_eq!((rect.w, rect.h), (-70, -20));
}

#[test]
fn test_add_command_selects_new_element() {
    let mut ctx = create_test_context();
    let outcome = Command::AddElement(ElementKind::Circle).execute(&mut ctx).unwrap();
    let id = match outcome {
        CommandOutcome::Created(id) => id,
        other => panic!("expected Created, got {:?}", other),
    };
    assert_eq!(ctx.selected(), Some(id));
    assert!(ctx.code().contains("display.drawCircle(60, 30, 20, WHITE);"));
}

#[test]
fn test_draw_command_does_not_select() {
    let mut ctx = create_test_context();
    let draw = DrawCommand::Rect {
        x1: 1,
        y1: 2,
        x2: 11,
        y2: 12,
    };
    let outcome = Command::Draw(draw).execute(&mut ctx).unwrap();
    assert!(matches!(outcome, CommandOutcome::Created(_)));
    assert_eq!(ctx.selected(), None);
    assert!(ctx.code().contains("display.drawRect(1, 2, 10, 10, WHITE);"));
}

#[test]
fn test_run_script_reports_errors() {
    let mut ctx = create_test_context();
    let outcome = Command::RunScript("rect 10 25 80 45\ncircle oops".to_string())
        .execute(&mut ctx)
        .unwrap();
    match outcome {
        CommandOutcome::Rebuilt {
            element_count,
            errors,
        } => {
            assert_eq!(element_count, 1);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].line_number, 2);
        }
        other => panic!("expected Rebuilt, got {:?}", other),
    }
}

#[test]
fn test_move_and_rotate_commands() {
    let mut ctx = create_test_context();
    let id = ctx.add_element(ElementKind::Rect);

    let outcome = Command::MoveElement {
        element_id: id,
        dx: 5,
        dy: 0,
    }
    .execute(&mut ctx)
    .unwrap();
    assert_eq!(outcome, CommandOutcome::Changed);
    assert_eq!(ctx.document().get(id).unwrap().x, 15);

    Command::RotateSelected(-15).execute(&mut ctx).unwrap();
    assert_eq!(ctx.document().get(id).unwrap().rotation, 345);
    assert!(ctx.code().contains("rotation=345°"));
}

#[test]
fn test_delete_unknown_element_fails() {
    let mut ctx = create_test_context();
    let id = ctx.add_element(ElementKind::Text);
    Command::DeleteElement(id).execute(&mut ctx).unwrap();

    let result = Command::DeleteElement(id).execute(&mut ctx);
    assert!(matches!(result, Err(EditError::UnknownElement(missing)) if missing == id));
    assert_eq!(Command::DeleteSelected.execute(&mut ctx).unwrap(), CommandOutcome::Unchanged);
}
