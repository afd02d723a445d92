use super::*;
use crate::kernel::ContextMenuItem;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn file_menu(anchor: (u16, u16)) -> ContextMenuState {
    ContextMenuState {
        visible: true,
        anchor,
        items: vec![
            ContextMenuItem::NewFolder,
            ContextMenuItem::NewFile,
            ContextMenuItem::RenameFile,
            ContextMenuItem::DeleteFile,
        ],
        selected: 0,
        target: None,
    }
}

#[test]
fn menu_opens_at_anchor() {
    let rect = menu_rect(&file_menu((3, 2)), Rect::new(0, 0, 80, 24)).unwrap();
    assert_eq!(rect, Rect::new(3, 2, 17, 6));
}

#[test]
fn menu_is_shifted_back_inside_area() {
    let rect = menu_rect(&file_menu((78, 23)), Rect::new(0, 0, 80, 24)).unwrap();
    assert_eq!(rect.x + rect.width, 80);
    assert_eq!(rect.y + rect.height, 24);
}

#[test]
fn hidden_menu_has_no_rect() {
    let menu = ContextMenuState::default();
    assert_eq!(menu_rect(&menu, Rect::new(0, 0, 80, 24)), None);
}

#[test]
fn hit_test_distinguishes_items_frame_and_outside() {
    let menu = file_menu((10, 5));
    let mut view = ContextMenuView::new();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let theme = UiTheme::default();
    terminal
        .draw(|frame| {
            let area = frame.area();
            view.render(frame, area, &menu, &theme);
        })
        .unwrap();

    assert_eq!(view.hit_test(12, 6, menu.items.len()), MenuHit::Item(0));
    assert_eq!(view.hit_test(12, 9, menu.items.len()), MenuHit::Item(3));
    assert_eq!(view.hit_test(10, 5, menu.items.len()), MenuHit::Frame);
    assert_eq!(view.hit_test(0, 0, menu.items.len()), MenuHit::Outside);
}
