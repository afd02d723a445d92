use crate::kernel::{Action, Effect};
use crate::models::NodeRef;

impl super::Store {
    pub(super) fn reduce_explorer_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::ExplorerSetViewHeight { height } => {
                super::DispatchResult::changed(self.state.explorer.set_view_height(height))
            }
            Action::ExplorerMoveSelection { delta } => {
                super::DispatchResult::changed(self.state.explorer.move_selection(delta))
            }
            Action::ExplorerScroll { delta } => {
                super::DispatchResult::changed(self.state.explorer.scroll(delta))
            }
            Action::ExplorerClickRow { row } => {
                if self.state.explorer.row(row).is_none() {
                    return super::DispatchResult::unchanged();
                }
                let moved = self.state.explorer.select_row(row);
                let mut result = self.open_selected_row();
                result.state_changed |= moved;
                result
            }
            Action::ExplorerActivate => self.open_selected_row(),
            _ => super::DispatchResult::unchanged(),
        }
    }

    /// Files load their content; folders only hold the selection.
    fn open_selected_row(&mut self) -> super::DispatchResult {
        let Some(row) = self.state.explorer.selected_row() else {
            return super::DispatchResult::unchanged();
        };
        let NodeRef::File(file) = row.node.clone() else {
            return super::DispatchResult::unchanged();
        };
        let name = row.name.clone();

        let seq = self.state.selection.select(file.clone(), name);
        tracing::debug!(file = %file, seq, "file selected");
        super::DispatchResult::effect(Effect::FetchFileContent { file, seq }, true)
    }
}
