use super::message::AppMessage;
use crate::kernel::services::ports::{
    ApiError, NewFile, NewFolder, NewProject, ProjectApi, SaveCodeRequest,
};
use crate::kernel::{DeletePlan, Effect, RemoteOp};
use crate::models::{FolderId, ProjectId};
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Runs effects on a tokio runtime; each effect reports exactly one `AppMessage`.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    api: Arc<dyn ProjectApi>,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(api: Arc<dyn ProjectApi>, tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, api, tx })
    }

    pub fn run(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let message = execute(api.as_ref(), effect).await;
            let _ = tx.send(message);
        });
    }
}

fn failed(op: RemoteOp, error: ApiError) -> AppMessage {
    tracing::debug!(op = op.label(), error = %error, "effect failed");
    AppMessage::Failed {
        op,
        error: error.to_string(),
    }
}

async fn execute(api: &dyn ProjectApi, effect: Effect) -> AppMessage {
    match effect {
        Effect::LoadProject { project, seq } => match api.load_project(&project).await {
            Ok(listing) => AppMessage::ProjectLoaded {
                project,
                seq,
                listing,
            },
            Err(e) => AppMessage::ProjectLoadFailed {
                project,
                seq,
                error: e.to_string(),
            },
        },
        Effect::CreateProject { name, language } => {
            match api.create_project(NewProject { name, language }).await {
                Ok(project) => AppMessage::ProjectCreated { project },
                Err(e) => failed(RemoteOp::CreateProject, e),
            }
        }
        Effect::FetchFileContent { file, seq } => match api.fetch_file_content(&file).await {
            Ok(body) => AppMessage::FileContentLoaded {
                file,
                seq,
                content: body.content,
            },
            Err(e) => failed(RemoteOp::FetchFileContent, e),
        },
        Effect::SaveCode { file, content, seq } => {
            let request = SaveCodeRequest {
                source_code: content.clone(),
                file_id: file.clone(),
            };
            match api.save_code(request).await {
                Ok(()) => AppMessage::CodeSaved { file, seq, content },
                Err(e) => failed(RemoteOp::SaveCode, e),
            }
        }
        Effect::CreateFolder {
            project,
            parent,
            name,
        } => {
            let request = NewFolder {
                name,
                parent_id: parent,
            };
            match api.create_folder(&project, request).await {
                Ok(folder) => AppMessage::FolderCreated { project, folder },
                Err(e) => failed(RemoteOp::CreateFolder, e),
            }
        }
        Effect::CreateFile {
            project,
            parent,
            name,
        } => {
            let request = NewFile {
                name,
                content: String::new(),
                parent_id: parent,
            };
            match api.create_file(&project, request).await {
                Ok(file) => AppMessage::FileCreated { project, file },
                Err(e) => failed(RemoteOp::CreateFile, e),
            }
        }
        Effect::DeleteFolder {
            project,
            folder,
            plan,
        } => match delete_folder_tree(api, &project, &folder, &plan).await {
            Ok(()) => AppMessage::FolderDeleted { project, folder },
            Err((completed, e)) => {
                tracing::debug!(folder = %folder, completed, error = %e, "folder delete aborted");
                AppMessage::FolderDeleteFailed {
                    project,
                    folder,
                    completed,
                    error: e.to_string(),
                }
            }
        },
        Effect::DeleteFile {
            project,
            parent,
            file,
        } => match api.delete_file(&project, parent.as_ref(), &file).await {
            Ok(()) => AppMessage::FileDeleted { project, file },
            Err(e) => failed(RemoteOp::DeleteFile, e),
        },
        Effect::RenameFolder {
            project,
            folder,
            name,
        } => match api.rename_folder(&project, &folder, name.clone()).await {
            Ok(()) => AppMessage::FolderRenamed {
                project,
                folder,
                name,
            },
            Err(e) => failed(RemoteOp::RenameFolder, e),
        },
        Effect::RenameFile {
            project,
            parent,
            file,
            name,
        } => match api
            .rename_file(&project, parent.as_ref(), &file, name.clone())
            .await
        {
            Ok(()) => AppMessage::FileRenamed {
                project,
                file,
                name,
            },
            Err(e) => failed(RemoteOp::RenameFile, e),
        },
    }
}

/// Files first, then sub-folders deepest-first, then the folder.
///
/// Stops at the first failure and reports how many steps the server had already applied.
async fn delete_folder_tree(
    api: &dyn ProjectApi,
    project: &ProjectId,
    folder: &FolderId,
    plan: &DeletePlan,
) -> Result<(), (usize, ApiError)> {
    let mut completed = 0usize;
    for (parent, file) in &plan.files {
        api.delete_file(project, parent.as_ref(), file)
            .await
            .map_err(|e| (completed, e))?;
        completed += 1;
    }
    for sub in &plan.folders {
        api.delete_folder(project, sub)
            .await
            .map_err(|e| (completed, e))?;
        completed += 1;
    }
    api.delete_folder(project, folder)
        .await
        .map_err(|e| (completed, e))?;
    tracing::info!(
        folder = %folder,
        files = plan.files.len(),
        subfolders = plan.folders.len(),
        "folder deleted"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
