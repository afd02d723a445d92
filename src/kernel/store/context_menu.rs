use crate::kernel::effect::DeletePlan;
use crate::kernel::state::{ContextMenuItem, ContextMenuState, InputDialogKind, StatusLevel};
use crate::kernel::{Action, Effect};
use crate::models::{FolderId, NodeRef};

impl super::Store {
    pub(super) fn reduce_context_menu_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::ContextMenuOpen { row, x, y } => {
                if self.state.ui.input_dialog.visible || self.state.selected_project.is_none() {
                    return super::DispatchResult::unchanged();
                }

                let mut state_changed = false;
                let target = match row.and_then(|r| self.state.explorer.row(r).map(|t| (r, t))) {
                    Some((row, tree_row)) => {
                        let node = tree_row.node.clone();
                        state_changed |= self.state.explorer.select_row(row);
                        Some(node)
                    }
                    None => None,
                };

                let mut items = vec![ContextMenuItem::NewFolder, ContextMenuItem::NewFile];
                match &target {
                    Some(NodeRef::Folder(_)) => {
                        items.push(ContextMenuItem::RenameFolder);
                        items.push(ContextMenuItem::DeleteFolder);
                    }
                    Some(NodeRef::File(_)) => {
                        items.push(ContextMenuItem::RenameFile);
                        items.push(ContextMenuItem::DeleteFile);
                    }
                    None => {}
                }

                let prev = self.state.ui.context_menu.clone();
                self.state.ui.context_menu = ContextMenuState {
                    visible: true,
                    anchor: (x, y),
                    items,
                    selected: 0,
                    target,
                };
                state_changed |= self.state.ui.context_menu != prev;
                super::DispatchResult::changed(state_changed)
            }
            Action::ContextMenuClose => {
                if !self.state.ui.context_menu.visible {
                    return super::DispatchResult::unchanged();
                }
                self.state.ui.context_menu = ContextMenuState::default();
                super::DispatchResult::changed(true)
            }
            Action::ContextMenuMoveSelection { delta } => {
                let menu = &mut self.state.ui.context_menu;
                let len = menu.items.len();
                if !menu.visible || delta == 0 || len == 0 {
                    return super::DispatchResult::unchanged();
                }

                let current = menu.selected.min(len - 1) as isize;
                let next = (current + delta).rem_euclid(len as isize) as usize;
                let changed = next != menu.selected;
                menu.selected = next;
                super::DispatchResult::changed(changed)
            }
            Action::ContextMenuSetSelected { index } => {
                let menu = &mut self.state.ui.context_menu;
                let len = menu.items.len();
                if !menu.visible || len == 0 {
                    return super::DispatchResult::unchanged();
                }

                let next = index.min(len - 1);
                let changed = next != menu.selected;
                menu.selected = next;
                super::DispatchResult::changed(changed)
            }
            Action::ContextMenuConfirm => {
                if !self.state.ui.context_menu.visible {
                    return super::DispatchResult::unchanged();
                }

                let menu = std::mem::take(&mut self.state.ui.context_menu);
                let Some(item) = menu.items.get(menu.selected).copied() else {
                    return super::DispatchResult::changed(true);
                };
                self.run_context_menu_item(item, menu.target)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn run_context_menu_item(
        &mut self,
        item: ContextMenuItem,
        target: Option<NodeRef>,
    ) -> super::DispatchResult {
        let Some(project) = self.state.selected_project() else {
            return super::DispatchResult::changed(true);
        };

        match (item, target) {
            (ContextMenuItem::NewFolder, target) => {
                let parent = self.create_parent(target.as_ref());
                self.state.ui.input_dialog.open(
                    "New Folder",
                    String::new(),
                    InputDialogKind::NewFolder { parent },
                );
                super::DispatchResult::changed(true)
            }
            (ContextMenuItem::NewFile, target) => {
                match self.create_parent(target.as_ref()) {
                    Some(parent) => self.state.ui.input_dialog.open(
                        "New File",
                        String::new(),
                        InputDialogKind::NewFile { parent },
                    ),
                    None => self
                        .state
                        .ui
                        .set_status(StatusLevel::Error, "Files must be created inside a folder"),
                }
                super::DispatchResult::changed(true)
            }
            (ContextMenuItem::RenameFolder, Some(NodeRef::Folder(folder))) => {
                let Some(record) = project.folder(&folder) else {
                    return super::DispatchResult::changed(true);
                };
                self.state.ui.input_dialog.open(
                    "Rename Folder",
                    record.name.clone(),
                    InputDialogKind::RenameFolder { folder },
                );
                super::DispatchResult::changed(true)
            }
            (ContextMenuItem::RenameFile, Some(NodeRef::File(file))) => {
                let Some(record) = project.file(&file) else {
                    return super::DispatchResult::changed(true);
                };
                let (name, parent) = (record.name.clone(), record.parent.clone());
                self.state.ui.input_dialog.open(
                    "Rename File",
                    name,
                    InputDialogKind::RenameFile { file, parent },
                );
                super::DispatchResult::changed(true)
            }
            (ContextMenuItem::DeleteFolder, Some(NodeRef::Folder(folder))) => {
                let (folders, files) = match self.state.workspace.descendants(&project.id, &folder)
                {
                    Ok(found) => found,
                    Err(err) => {
                        self.state.ui.set_status(StatusLevel::Error, err.to_string());
                        return super::DispatchResult::changed(true);
                    }
                };
                let plan = DeletePlan {
                    files: files
                        .into_iter()
                        .map(|id| (project.file(&id).and_then(|f| f.parent.clone()), id))
                        .collect(),
                    folders,
                };
                tracing::info!(
                    folder = %folder,
                    files = plan.files.len(),
                    subfolders = plan.folders.len(),
                    "deleting folder"
                );
                super::DispatchResult::effect(
                    Effect::DeleteFolder {
                        project: project.id.clone(),
                        folder,
                        plan,
                    },
                    true,
                )
            }
            (ContextMenuItem::DeleteFile, Some(NodeRef::File(file))) => {
                let Some(record) = project.file(&file) else {
                    return super::DispatchResult::changed(true);
                };
                super::DispatchResult::effect(
                    Effect::DeleteFile {
                        project: project.id.clone(),
                        parent: record.parent.clone(),
                        file,
                    },
                    true,
                )
            }
            _ => super::DispatchResult::changed(true),
        }
    }

    /// Folder targets receive new children directly; file targets hand over their parent.
    fn create_parent(&self, target: Option<&NodeRef>) -> Option<FolderId> {
        match target? {
            NodeRef::Folder(folder) => Some(folder.clone()),
            NodeRef::File(file) => self
                .state
                .selected_project()
                .and_then(|p| p.file(file).and_then(|f| f.parent.clone())),
        }
    }
}
