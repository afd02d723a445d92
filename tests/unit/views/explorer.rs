use super::*;
use crate::models::{build_node_tree, visible_rows, File, FileId, Folder, FolderId, Project};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn sample_rows() -> Vec<TreeRow> {
    let project = Project::new("p1", "demo", "java").with_contents(
        vec![Folder::new("f1", "src", None)],
        vec![
            File::new("x1", "Main.java", Some(FolderId::from("f1"))),
            File::new("x2", "README", None),
        ],
    );
    visible_rows(&build_node_tree(&project).unwrap())
}

fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>().trim_end().to_string())
        .collect()
}

#[test]
fn renders_indented_rows_from_scroll_offset() {
    let rows = sample_rows();
    let mut view = ExplorerView::new();
    let mut terminal = Terminal::new(TestBackend::new(20, 2)).unwrap();
    let theme = UiTheme::default();

    terminal
        .draw(|frame| {
            let area = frame.area();
            view.render(frame, area, &rows, None, 1, None, &theme);
        })
        .unwrap();

    assert_eq!(screen_lines(&terminal), vec!["    Main.java", "  README"]);
}

#[test]
fn hit_test_maps_cells_to_absolute_rows() {
    let rows = sample_rows();
    let mut view = ExplorerView::new();
    let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
    let theme = UiTheme::default();
    let selected = NodeRef::File(FileId::from("x1"));

    terminal
        .draw(|frame| {
            view.render(frame, Rect::new(2, 1, 10, 3), &rows, Some(&selected), 0, None, &theme);
        })
        .unwrap();

    assert_eq!(view.view_height(), Some(3));
    assert_eq!(view.hit_test_row(2, 1, 0), Some(0));
    assert_eq!(view.hit_test_row(5, 3, 4), Some(6));
    assert_eq!(view.hit_test_row(1, 1, 0), None);
    assert_eq!(view.hit_test_row(2, 4, 0), None);

    assert_eq!(view.row_anchor(2, 1), Some((4, 2)));
    assert_eq!(view.row_anchor(0, 1), None);
    assert_eq!(view.row_anchor(5, 0), None);
}

#[test]
fn malformed_tree_shows_error_instead_of_rows() {
    let mut view = ExplorerView::new();
    let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
    let theme = UiTheme::default();
    let err = TreeError::Cycle {
        folder: FolderId::from("a"),
    };

    terminal
        .draw(|frame| {
            let area = frame.area();
            view.render(frame, area, &[], None, 0, Some(&err), &theme);
        })
        .unwrap();

    assert!(screen_lines(&terminal)[0].starts_with("Project tree unavailable"));
}
