use super::{Action, AppState, Effect};

mod context_menu;
mod explorer;
mod input_dialog;
mod workspace;

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn effect(effect: Effect, state_changed: bool) -> Self {
        Self {
            effects: vec![effect],
            state_changed,
        }
    }
}

/// Owns the application state; every change goes through `dispatch`.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ExplorerSetViewHeight { .. }
            | Action::ExplorerMoveSelection { .. }
            | Action::ExplorerScroll { .. }
            | Action::ExplorerClickRow { .. }
            | Action::ExplorerActivate => self.reduce_explorer_action(action),
            Action::ContextMenuOpen { .. }
            | Action::ContextMenuClose
            | Action::ContextMenuMoveSelection { .. }
            | Action::ContextMenuSetSelected { .. }
            | Action::ContextMenuConfirm => self.reduce_context_menu_action(action),
            Action::InputDialogAppend(_)
            | Action::InputDialogBackspace
            | Action::InputDialogCursorLeft
            | Action::InputDialogCursorRight
            | Action::InputDialogAccept
            | Action::InputDialogCancel => self.reduce_input_dialog_action(action),
            other => self.reduce_workspace_action(other),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
