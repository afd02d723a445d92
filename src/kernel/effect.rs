use crate::models::{FileId, FolderId, ProjectId};

/// Remote operations, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    CreateProject,
    FetchFileContent,
    SaveCode,
    CreateFolder,
    CreateFile,
    DeleteFolder,
    DeleteFile,
    RenameFolder,
    RenameFile,
}

impl RemoteOp {
    pub fn label(self) -> &'static str {
        match self {
            RemoteOp::CreateProject => "create project",
            RemoteOp::FetchFileContent => "fetch file",
            RemoteOp::SaveCode => "save file",
            RemoteOp::CreateFolder => "create folder",
            RemoteOp::CreateFile => "create file",
            RemoteOp::DeleteFolder => "delete folder",
            RemoteOp::DeleteFile => "delete file",
            RemoteOp::RenameFolder => "rename folder",
            RemoteOp::RenameFile => "rename file",
        }
    }
}

/// Server-side deletions that must succeed, in order, before the folder itself goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePlan {
    pub files: Vec<(Option<FolderId>, FileId)>,
    pub folders: Vec<FolderId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadProject {
        project: ProjectId,
        seq: u64,
    },
    CreateProject {
        name: String,
        language: String,
    },
    FetchFileContent {
        file: FileId,
        seq: u64,
    },
    SaveCode {
        file: FileId,
        content: String,
        seq: u64,
    },
    CreateFolder {
        project: ProjectId,
        parent: Option<FolderId>,
        name: String,
    },
    CreateFile {
        project: ProjectId,
        parent: FolderId,
        name: String,
    },
    DeleteFolder {
        project: ProjectId,
        folder: FolderId,
        plan: DeletePlan,
    },
    DeleteFile {
        project: ProjectId,
        parent: Option<FolderId>,
        file: FileId,
    },
    RenameFolder {
        project: ProjectId,
        folder: FolderId,
        name: String,
    },
    RenameFile {
        project: ProjectId,
        parent: Option<FolderId>,
        file: FileId,
        name: String,
    },
}
