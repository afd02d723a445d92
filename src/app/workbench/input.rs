use super::{Focus, Workbench};
use crate::kernel::Action as KernelAction;
use crate::tui::view::EventResult;
use crate::views::MenuHit;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

const SCROLL_STEP: isize = 3;

pub(super) fn handle_input(workbench: &mut Workbench, event: &Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => workbench.handle_key_event(key),
        Event::Mouse(mouse) => workbench.handle_mouse_event(mouse),
        Event::Resize(..) => EventResult::Consumed,
        _ => EventResult::Ignored,
    }
}

fn consumed(_changed: bool) -> EventResult {
    EventResult::Consumed
}

impl Workbench {
    fn handle_key_event(&mut self, key: &KeyEvent) -> EventResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return EventResult::Quit;
        }

        if self.store.state().ui.input_dialog.visible {
            return self.handle_input_dialog_key(key);
        }
        if self.store.state().ui.context_menu.visible {
            return self.handle_context_menu_key(key);
        }

        match key.code {
            KeyCode::Char('q') => EventResult::Quit,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Explorer => Focus::Content,
                    Focus::Content => Focus::Explorer,
                };
                EventResult::Consumed
            }
            KeyCode::Char('r') => consumed(self.dispatch_kernel(KernelAction::RefreshProject)),
            _ => match self.focus {
                Focus::Explorer => self.handle_explorer_key(key),
                Focus::Content => self.handle_content_key(key),
            },
        }
    }

    fn handle_input_dialog_key(&mut self, key: &KeyEvent) -> EventResult {
        let action = match key.code {
            KeyCode::Esc => KernelAction::InputDialogCancel,
            KeyCode::Enter => KernelAction::InputDialogAccept,
            KeyCode::Backspace => KernelAction::InputDialogBackspace,
            KeyCode::Left => KernelAction::InputDialogCursorLeft,
            KeyCode::Right => KernelAction::InputDialogCursorRight,
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                KernelAction::InputDialogAppend(ch)
            }
            _ => return EventResult::Consumed,
        };
        consumed(self.dispatch_kernel(action))
    }

    fn handle_context_menu_key(&mut self, key: &KeyEvent) -> EventResult {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('m') => KernelAction::ContextMenuClose,
            KeyCode::Up | KeyCode::Char('k') => KernelAction::ContextMenuMoveSelection { delta: -1 },
            KeyCode::Down | KeyCode::Char('j') => KernelAction::ContextMenuMoveSelection { delta: 1 },
            KeyCode::Enter => KernelAction::ContextMenuConfirm,
            _ => return EventResult::Consumed,
        };
        consumed(self.dispatch_kernel(action))
    }

    fn handle_explorer_key(&mut self, key: &KeyEvent) -> EventResult {
        let page = self.store.state().explorer.view_height.max(1) as isize;
        let action = match key.code {
            KeyCode::Up | KeyCode::Char('k') => KernelAction::ExplorerMoveSelection { delta: -1 },
            KeyCode::Down | KeyCode::Char('j') => KernelAction::ExplorerMoveSelection { delta: 1 },
            KeyCode::PageUp => KernelAction::ExplorerMoveSelection { delta: -page },
            KeyCode::PageDown => KernelAction::ExplorerMoveSelection { delta: page },
            KeyCode::Enter => KernelAction::ExplorerActivate,
            KeyCode::Char('m') => self.keyboard_menu_action(),
            _ => return EventResult::Ignored,
        };
        consumed(self.dispatch_kernel(action))
    }

    /// Menu on the selected row, or on empty space when nothing is selected.
    fn keyboard_menu_action(&self) -> KernelAction {
        let explorer = &self.store.state().explorer;
        let row = explorer.selected_index();
        let (x, y) = row
            .and_then(|r| self.explorer.row_anchor(r, explorer.scroll_offset))
            .or_else(|| self.explorer.row_anchor(explorer.scroll_offset, explorer.scroll_offset))
            .unwrap_or((0, 0));
        KernelAction::ContextMenuOpen { row, x, y }
    }

    fn handle_content_key(&mut self, key: &KeyEvent) -> EventResult {
        let changed = match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.content.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.content.scroll_by(1),
            KeyCode::PageUp => self.content.scroll_by(-10),
            KeyCode::PageDown => self.content.scroll_by(10),
            _ => return EventResult::Ignored,
        };
        consumed(changed)
    }

    fn handle_mouse_event(&mut self, event: &MouseEvent) -> EventResult {
        if self.store.state().ui.input_dialog.visible {
            return EventResult::Consumed;
        }
        if self.store.state().ui.context_menu.visible {
            return self.handle_context_menu_mouse(event);
        }

        let (x, y) = (event.column, event.row);
        if self.explorer.contains(x, y) {
            return self.handle_explorer_mouse(event);
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.focus = Focus::Content;
                EventResult::Consumed
            }
            MouseEventKind::ScrollUp => consumed(self.content.scroll_by(-SCROLL_STEP)),
            MouseEventKind::ScrollDown => consumed(self.content.scroll_by(SCROLL_STEP)),
            _ => EventResult::Ignored,
        }
    }

    fn handle_explorer_mouse(&mut self, event: &MouseEvent) -> EventResult {
        let (x, y) = (event.column, event.row);
        let explorer = &self.store.state().explorer;
        let hit = self
            .explorer
            .hit_test_row(x, y, explorer.scroll_offset)
            .filter(|row| *row < explorer.rows.len());

        let action = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.focus = Focus::Explorer;
                match hit {
                    Some(row) => KernelAction::ExplorerClickRow { row },
                    None => return EventResult::Consumed,
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.focus = Focus::Explorer;
                KernelAction::ContextMenuOpen { row: hit, x, y }
            }
            MouseEventKind::ScrollUp => KernelAction::ExplorerScroll {
                delta: -SCROLL_STEP,
            },
            MouseEventKind::ScrollDown => KernelAction::ExplorerScroll { delta: SCROLL_STEP },
            _ => return EventResult::Ignored,
        };
        consumed(self.dispatch_kernel(action))
    }

    fn handle_context_menu_mouse(&mut self, event: &MouseEvent) -> EventResult {
        let count = self.store.state().ui.context_menu.items.len();
        let hit = self.context_menu.hit_test(event.column, event.row, count);

        match (event.kind, hit) {
            (MouseEventKind::Moved, MenuHit::Item(index)) => {
                consumed(self.dispatch_kernel(KernelAction::ContextMenuSetSelected { index }))
            }
            (MouseEventKind::Down(MouseButton::Left), MenuHit::Item(index)) => {
                let _ = self.dispatch_kernel(KernelAction::ContextMenuSetSelected { index });
                consumed(self.dispatch_kernel(KernelAction::ContextMenuConfirm))
            }
            (MouseEventKind::Down(_), MenuHit::Outside) => {
                consumed(self.dispatch_kernel(KernelAction::ContextMenuClose))
            }
            _ => EventResult::Consumed,
        }
    }
}
