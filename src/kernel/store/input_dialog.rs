use crate::kernel::state::InputDialogKind;
use crate::kernel::{Action, Effect};

fn validate_name(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Name required");
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err("Invalid name");
    }
    Ok(())
}

impl super::Store {
    pub(super) fn reduce_input_dialog_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::InputDialogAppend(ch) => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible {
                    return super::DispatchResult::unchanged();
                }

                dialog.error = None;
                if dialog.cursor > dialog.value.len() {
                    dialog.cursor = dialog.value.len();
                }
                dialog.value.insert(dialog.cursor, ch);
                dialog.cursor += ch.len_utf8();
                super::DispatchResult::changed(true)
            }
            Action::InputDialogBackspace => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.cursor == 0 {
                    return super::DispatchResult::unchanged();
                }

                dialog.error = None;
                let prev = dialog.value[..dialog.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                dialog.value.drain(prev..dialog.cursor);
                dialog.cursor = prev;
                super::DispatchResult::changed(true)
            }
            Action::InputDialogCursorLeft => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.cursor == 0 {
                    return super::DispatchResult::unchanged();
                }

                let prev = dialog.value[..dialog.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                let changed = prev != dialog.cursor;
                dialog.cursor = prev;
                super::DispatchResult::changed(changed)
            }
            Action::InputDialogCursorRight => {
                let dialog = &mut self.state.ui.input_dialog;
                if !dialog.visible || dialog.cursor >= dialog.value.len() {
                    return super::DispatchResult::unchanged();
                }

                let next = dialog.value[dialog.cursor..]
                    .chars()
                    .next()
                    .map(|ch| dialog.cursor + ch.len_utf8())
                    .unwrap_or(dialog.value.len());
                let changed = next != dialog.cursor;
                dialog.cursor = next;
                super::DispatchResult::changed(changed)
            }
            Action::InputDialogCancel => {
                if !self.state.ui.input_dialog.visible {
                    return super::DispatchResult::unchanged();
                }
                self.state.ui.input_dialog.reset();
                super::DispatchResult::changed(true)
            }
            Action::InputDialogAccept => self.accept_input_dialog(),
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn accept_input_dialog(&mut self) -> super::DispatchResult {
        let dialog = &mut self.state.ui.input_dialog;
        if !dialog.visible {
            return super::DispatchResult::unchanged();
        }

        let (Some(kind), Some(project)) = (dialog.kind.clone(), self.state.selected_project.clone())
        else {
            dialog.reset();
            return super::DispatchResult::changed(true);
        };

        let name = dialog.value.trim().to_string();
        if let Err(message) = validate_name(&name) {
            let prev = dialog.error.replace(message.to_string());
            return super::DispatchResult::changed(prev.as_deref() != dialog.error.as_deref());
        }
        dialog.reset();

        let snapshot = self.state.workspace.project(&project);
        let effect = match kind {
            InputDialogKind::NewFolder { parent } => Effect::CreateFolder {
                project,
                parent,
                name,
            },
            InputDialogKind::NewFile { parent } => Effect::CreateFile {
                project,
                parent,
                name,
            },
            InputDialogKind::RenameFolder { folder } => {
                let unchanged = snapshot
                    .as_ref()
                    .and_then(|p| p.folder(&folder))
                    .is_some_and(|f| f.name == name);
                if unchanged {
                    return super::DispatchResult::changed(true);
                }
                Effect::RenameFolder {
                    project,
                    folder,
                    name,
                }
            }
            InputDialogKind::RenameFile { file, parent } => {
                let unchanged = snapshot
                    .as_ref()
                    .and_then(|p| p.file(&file))
                    .is_some_and(|f| f.name == name);
                if unchanged {
                    return super::DispatchResult::changed(true);
                }
                Effect::RenameFile {
                    project,
                    parent,
                    file,
                    name,
                }
            }
        };
        super::DispatchResult::effect(effect, true)
    }
}
