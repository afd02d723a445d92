use crate::kernel::services::ports::ProjectListing;
use crate::kernel::{Action, RemoteOp};
use crate::models::{File, FileId, Folder, FolderId, Project, ProjectId};

/// Completion of one effect, delivered back to the UI thread.
#[derive(Debug)]
pub enum AppMessage {
    ProjectLoaded {
        project: ProjectId,
        seq: u64,
        listing: ProjectListing,
    },
    ProjectLoadFailed {
        project: ProjectId,
        seq: u64,
        error: String,
    },
    ProjectCreated {
        project: Project,
    },
    FileContentLoaded {
        file: FileId,
        seq: u64,
        content: String,
    },
    CodeSaved {
        file: FileId,
        seq: u64,
        content: String,
    },
    FolderCreated {
        project: ProjectId,
        folder: Option<Folder>,
    },
    FileCreated {
        project: ProjectId,
        file: Option<File>,
    },
    FolderDeleted {
        project: ProjectId,
        folder: FolderId,
    },
    FolderDeleteFailed {
        project: ProjectId,
        folder: FolderId,
        completed: usize,
        error: String,
    },
    FileDeleted {
        project: ProjectId,
        file: FileId,
    },
    FolderRenamed {
        project: ProjectId,
        folder: FolderId,
        name: String,
    },
    FileRenamed {
        project: ProjectId,
        file: FileId,
        name: String,
    },
    Failed {
        op: RemoteOp,
        error: String,
    },
}

impl AppMessage {
    pub fn into_action(self) -> Action {
        match self {
            AppMessage::ProjectLoaded {
                project,
                seq,
                listing,
            } => Action::ProjectLoaded {
                project,
                seq,
                name: listing.name,
                language: listing.language,
                folders: listing.folders.into_iter().map(Folder::from).collect(),
                files: listing.files.into_iter().map(File::from).collect(),
            },
            AppMessage::ProjectLoadFailed {
                project,
                seq,
                error,
            } => Action::ProjectLoadFailed {
                project,
                seq,
                error,
            },
            AppMessage::ProjectCreated { project } => Action::ProjectCreated(project),
            AppMessage::FileContentLoaded { file, seq, content } => {
                Action::FileContentLoaded { file, seq, content }
            }
            AppMessage::CodeSaved { file, seq, content } => {
                Action::CodeSaved { file, seq, content }
            }
            AppMessage::FolderCreated { project, folder } => {
                Action::FolderCreated { project, folder }
            }
            AppMessage::FileCreated { project, file } => Action::FileCreated { project, file },
            AppMessage::FolderDeleted { project, folder } => {
                Action::FolderDeleted { project, folder }
            }
            AppMessage::FolderDeleteFailed {
                project,
                folder,
                completed,
                error,
            } => Action::FolderDeleteFailed {
                project,
                folder,
                completed,
                error,
            },
            AppMessage::FileDeleted { project, file } => Action::FileDeleted { project, file },
            AppMessage::FolderRenamed {
                project,
                folder,
                name,
            } => Action::FolderRenamed {
                project,
                folder,
                name,
            },
            AppMessage::FileRenamed {
                project,
                file,
                name,
            } => Action::FileRenamed {
                project,
                file,
                name,
            },
            AppMessage::Failed { op, error } => Action::RemoteFailed { op, error },
        }
    }
}
