use std::sync::Arc;

use crate::kernel::state::StatusLevel;
use crate::kernel::{Action, Effect, RemoteOp};
use crate::models::{
    find_language, FilePatch, FolderPatch, Project, ProjectId, ProjectPatch, WorkspaceError,
};

impl super::Store {
    pub(super) fn reduce_workspace_action(&mut self, action: Action) -> super::DispatchResult {
        match action {
            Action::AddProject(project) => {
                let result = self.state.workspace.add_project(project);
                self.apply_workspace_result(result)
            }
            Action::RemoveProject(id) => {
                let result = self.state.workspace.remove_project(&id);
                if result.is_ok() && self.state.selected_project.as_ref() == Some(&id) {
                    self.state.selected_project = None;
                    self.state.selection.clear();
                }
                self.apply_workspace_result(result)
            }
            Action::UpdateProject { project, patch } => {
                let result = self.state.workspace.update_project(&project, patch);
                self.apply_workspace_result(result)
            }
            Action::AddFolder { project, folder } => {
                let result = self.state.workspace.add_folder(&project, folder);
                self.apply_workspace_result(result)
            }
            Action::RemoveFolder { project, folder } => {
                self.clear_selection_under(&project, &folder);
                let result = self.state.workspace.remove_folder(&project, &folder);
                self.apply_workspace_result(result)
            }
            Action::UpdateFolder {
                project,
                folder,
                patch,
            } => {
                let result = self.state.workspace.update_folder(&project, &folder, patch);
                self.apply_workspace_result(result)
            }
            Action::AddFile {
                project,
                parent,
                file,
            } => {
                let result = self
                    .state
                    .workspace
                    .add_file(&project, parent.as_ref(), file);
                self.apply_workspace_result(result)
            }
            Action::RemoveFile { project, file } => {
                let result = self.state.workspace.remove_file(&project, &file);
                if result.is_ok() && self.state.selection.file.as_ref() == Some(&file) {
                    self.state.selection.clear();
                }
                self.apply_workspace_result(result)
            }
            Action::UpdateFile {
                project,
                file,
                patch,
            } => {
                let new_name = patch.name.clone();
                let result = self.state.workspace.update_file(&project, &file, patch);
                if result.is_ok() && self.state.selection.file.as_ref() == Some(&file) {
                    if let Some(name) = new_name {
                        self.state.selection.name = Some(name);
                    }
                }
                self.apply_workspace_result(result)
            }
            Action::SelectProject(project) => {
                super::DispatchResult::effect(self.load_project(project), false)
            }
            Action::RefreshProject => match self.state.selected_project.clone() {
                Some(project) => super::DispatchResult::effect(self.load_project(project), false),
                None => super::DispatchResult::unchanged(),
            },
            Action::ProjectLoaded {
                project,
                seq,
                name,
                language,
                folders,
                files,
            } => {
                if self.state.loads.is_stale(seq) {
                    tracing::debug!(
                        project = %project,
                        seq,
                        applied = self.state.loads.applied,
                        "dropping stale project listing"
                    );
                    return super::DispatchResult::unchanged();
                }
                if !self.state.workspace.contains_project(&project) {
                    let placeholder = Project::new(
                        project.clone(),
                        name.clone().unwrap_or_else(|| project.to_string()),
                        language.clone().unwrap_or_default(),
                    );
                    if let Err(err) = self.state.workspace.add_project(placeholder) {
                        return self.apply_workspace_result(Err(err));
                    }
                }
                if name.is_some() || language.is_some() {
                    if let Err(err) = self
                        .state
                        .workspace
                        .update_project(&project, ProjectPatch { name, language })
                    {
                        tracing::debug!(error = %err, "project details not applied locally");
                    }
                }

                let folder_count = folders.len();
                let file_count = files.len();
                let result = self
                    .state
                    .workspace
                    .replace_contents(&project, folders, files);
                if result.is_ok() {
                    self.state.loads.mark_applied(seq);
                    tracing::info!(
                        project = %project,
                        folders = folder_count,
                        files = file_count,
                        "project loaded"
                    );
                    self.state.selected_project = Some(project);
                    let selection_gone = match (&self.state.selection.file, &result) {
                        (Some(file), Ok(snapshot)) => snapshot.file(file).is_none(),
                        _ => false,
                    };
                    if selection_gone {
                        self.state.selection.clear();
                    }
                }
                self.apply_workspace_result(result)
            }
            Action::ProjectLoadFailed {
                project,
                seq,
                error,
            } => {
                tracing::warn!(project = %project, seq, error = %error, "project load failed");
                super::DispatchResult::unchanged()
            }
            Action::CreateProject { name, language } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    self.state
                        .ui
                        .set_status(StatusLevel::Error, "Project name required");
                    return super::DispatchResult::changed(true);
                }
                let Some(lang) = find_language(&language) else {
                    self.state.ui.set_status(
                        StatusLevel::Error,
                        format!("Unsupported language: {}", language.trim()),
                    );
                    return super::DispatchResult::changed(true);
                };
                super::DispatchResult::effect(
                    Effect::CreateProject {
                        name,
                        language: lang.id.to_string(),
                    },
                    false,
                )
            }
            Action::ProjectCreated(project) => {
                let id = project.id.clone();
                if !self.state.workspace.contains_project(&id) {
                    if let Err(err) = self.state.workspace.add_project(project) {
                        return self.apply_workspace_result(Err(err));
                    }
                }
                if self.state.selected_project.as_ref() != Some(&id) {
                    self.state.selected_project = Some(id.clone());
                    self.state.selection.clear();
                }
                self.state.refresh_explorer();
                self.state
                    .ui
                    .set_status(StatusLevel::Info, format!("Created project {id}"));
                super::DispatchResult::effect(self.load_project(id), true)
            }
            Action::SelectFile { file, name } => {
                self.state.selection.select(file, name);
                super::DispatchResult::changed(true)
            }
            Action::FetchFileContent { file } => {
                let seq = self.state.selection.seq;
                super::DispatchResult::effect(Effect::FetchFileContent { file, seq }, false)
            }
            Action::FileContentLoaded { file, seq, content } => {
                if !self.state.selection.is_current(&file, seq) {
                    tracing::debug!(
                        file = %file,
                        seq,
                        current = self.state.selection.seq,
                        "dropping stale file content"
                    );
                    return super::DispatchResult::unchanged();
                }
                self.state.selection.content = Some(content);
                super::DispatchResult::changed(true)
            }
            Action::SaveFileContent { file, content } => {
                let seq = self.state.selection.seq;
                super::DispatchResult::effect(Effect::SaveCode { file, content, seq }, false)
            }
            Action::CodeSaved { file, seq, content } => {
                if self.state.selection.is_current(&file, seq) {
                    self.state.selection.content = Some(content);
                }
                self.state
                    .ui
                    .set_status(StatusLevel::Info, format!("Saved file {file}"));
                super::DispatchResult::changed(true)
            }
            Action::FolderCreated { project, folder } => {
                if let Some(folder) = folder {
                    if let Err(err) = self.state.workspace.add_folder(&project, folder) {
                        tracing::debug!(error = %err, "created folder not applied locally");
                    }
                }
                self.finish_remote_mutation(project, "Folder created")
            }
            Action::FileCreated { project, file } => {
                if let Some(file) = file {
                    let parent = file.parent.clone();
                    if let Err(err) = self
                        .state
                        .workspace
                        .add_file(&project, parent.as_ref(), file)
                    {
                        tracing::debug!(error = %err, "created file not applied locally");
                    }
                }
                self.finish_remote_mutation(project, "File created")
            }
            Action::FolderDeleted { project, folder } => {
                self.clear_selection_under(&project, &folder);
                if let Err(err) = self.state.workspace.remove_folder(&project, &folder) {
                    tracing::debug!(error = %err, "deleted folder not applied locally");
                }
                self.finish_remote_mutation(project, "Folder deleted")
            }
            Action::FolderDeleteFailed {
                project,
                folder,
                completed,
                error,
            } => {
                tracing::warn!(
                    folder = %folder,
                    completed,
                    error = %error,
                    "remote call failed"
                );
                self.state.ui.set_status(
                    StatusLevel::Error,
                    format!("Failed to {}: {error}", RemoteOp::DeleteFolder.label()),
                );
                if completed == 0 {
                    return super::DispatchResult::changed(true);
                }
                // Part of the subtree is already gone on the server.
                super::DispatchResult::effect(self.load_project(project), true)
            }
            Action::FileDeleted { project, file } => {
                if self.state.selection.file.as_ref() == Some(&file) {
                    self.state.selection.clear();
                }
                if let Err(err) = self.state.workspace.remove_file(&project, &file) {
                    tracing::debug!(error = %err, "deleted file not applied locally");
                }
                self.finish_remote_mutation(project, "File deleted")
            }
            Action::FolderRenamed {
                project,
                folder,
                name,
            } => {
                let patch = FolderPatch {
                    name: Some(name),
                    parent: None,
                };
                if let Err(err) = self.state.workspace.update_folder(&project, &folder, patch) {
                    tracing::debug!(error = %err, "renamed folder not applied locally");
                }
                self.finish_remote_mutation(project, "Folder renamed")
            }
            Action::FileRenamed {
                project,
                file,
                name,
            } => {
                if self.state.selection.file.as_ref() == Some(&file) {
                    self.state.selection.name = Some(name.clone());
                }
                let patch = FilePatch {
                    name: Some(name),
                    parent: None,
                };
                if let Err(err) = self.state.workspace.update_file(&project, &file, patch) {
                    tracing::debug!(error = %err, "renamed file not applied locally");
                }
                self.finish_remote_mutation(project, "File renamed")
            }
            Action::RemoteFailed { op, error } => {
                tracing::warn!(op = op.label(), error = %error, "remote call failed");
                self.state
                    .ui
                    .set_status(StatusLevel::Error, format!("Failed to {}: {error}", op.label()));
                super::DispatchResult::changed(true)
            }
            _ => super::DispatchResult::unchanged(),
        }
    }

    fn apply_workspace_result(
        &mut self,
        result: Result<Arc<Project>, WorkspaceError>,
    ) -> super::DispatchResult {
        match result {
            Ok(_) => {
                self.state.refresh_explorer();
                super::DispatchResult::changed(true)
            }
            Err(err) => {
                tracing::warn!(error = %err, "workspace update rejected");
                self.state.ui.set_status(StatusLevel::Error, err.to_string());
                super::DispatchResult::changed(true)
            }
        }
    }

    /// The server confirmed a change: show it locally, then refetch the authoritative listing.
    fn finish_remote_mutation(
        &mut self,
        project: ProjectId,
        message: &str,
    ) -> super::DispatchResult {
        self.state.refresh_explorer();
        self.state.ui.set_status(StatusLevel::Info, message);
        super::DispatchResult::effect(self.load_project(project), true)
    }

    fn load_project(&mut self, project: ProjectId) -> Effect {
        let seq = self.state.loads.next();
        Effect::LoadProject { project, seq }
    }

    fn clear_selection_under(&mut self, project: &ProjectId, folder: &crate::models::FolderId) {
        let Some(file) = self.state.selection.file.clone() else {
            return;
        };
        let Some(snapshot) = self.state.workspace.project(project) else {
            return;
        };
        let under = snapshot
            .file(&file)
            .and_then(|f| f.parent.as_ref())
            .is_some_and(|parent| snapshot.is_ancestor_or_self(folder, parent));
        if under {
            self.state.selection.clear();
        }
    }
}
