use super::*;
use crate::models::FileId;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn draw(view: &mut ContentView, selection: &FileSelection) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
    let theme = UiTheme::default();
    terminal
        .draw(|frame| {
            let area = frame.area();
            view.render(frame, area, selection, true, &theme);
        })
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect()
}

fn loaded(lines: usize) -> FileSelection {
    let mut selection = FileSelection::default();
    selection.select(FileId::from("x1"), "Main.java".to_string());
    selection.content = Some(
        (0..lines)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    selection
}

#[test]
fn shows_placeholder_while_loading() {
    let mut view = ContentView::new();
    let mut selection = FileSelection::default();
    selection.select(FileId::from("x1"), "Main.java".to_string());

    let screen = draw(&mut view, &selection);
    assert!(screen[0].contains("Main.java"));
    assert!(screen[1].contains("Loading"));
}

#[test]
fn scroll_is_bounded_by_content() {
    let mut view = ContentView::new();
    let selection = loaded(10);
    draw(&mut view, &selection);

    assert!(view.scroll_by(100));
    assert_eq!(view.scroll, 7);
    assert!(!view.scroll_by(1));

    let screen = draw(&mut view, &selection);
    assert!(screen[1].contains("line 7"));
}

#[test]
fn new_selection_resets_scroll() {
    let mut view = ContentView::new();
    let mut selection = loaded(10);
    draw(&mut view, &selection);
    view.scroll_by(4);

    selection.select(FileId::from("x2"), "Other.java".to_string());
    selection.content = Some("only".to_string());
    draw(&mut view, &selection);
    assert_eq!(view.scroll, 0);
}
