use crate::models::{
    File, FileId, FilePatch, Folder, FolderId, FolderPatch, Project, ProjectId, ProjectPatch,
};

use super::effect::RemoteOp;

#[derive(Debug, Clone)]
pub enum Action {
    AddProject(Project),
    RemoveProject(ProjectId),
    UpdateProject {
        project: ProjectId,
        patch: ProjectPatch,
    },
    AddFolder {
        project: ProjectId,
        folder: Folder,
    },
    RemoveFolder {
        project: ProjectId,
        folder: FolderId,
    },
    UpdateFolder {
        project: ProjectId,
        folder: FolderId,
        patch: FolderPatch,
    },
    AddFile {
        project: ProjectId,
        parent: Option<FolderId>,
        file: File,
    },
    RemoveFile {
        project: ProjectId,
        file: FileId,
    },
    UpdateFile {
        project: ProjectId,
        file: FileId,
        patch: FilePatch,
    },
    SelectProject(ProjectId),
    RefreshProject,
    ProjectLoaded {
        project: ProjectId,
        seq: u64,
        name: Option<String>,
        language: Option<String>,
        folders: Vec<Folder>,
        files: Vec<File>,
    },
    ProjectLoadFailed {
        project: ProjectId,
        seq: u64,
        error: String,
    },
    CreateProject {
        name: String,
        language: String,
    },
    ProjectCreated(Project),
    SelectFile {
        file: FileId,
        name: String,
    },
    FetchFileContent {
        file: FileId,
    },
    FileContentLoaded {
        file: FileId,
        seq: u64,
        content: String,
    },
    SaveFileContent {
        file: FileId,
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
    /// `completed` counts the plan steps the server already carried out.
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
    RemoteFailed {
        op: RemoteOp,
        error: String,
    },
    ExplorerSetViewHeight {
        height: usize,
    },
    ExplorerMoveSelection {
        delta: isize,
    },
    ExplorerScroll {
        delta: isize,
    },
    ExplorerClickRow {
        row: usize,
    },
    ExplorerActivate,
    ContextMenuOpen {
        row: Option<usize>,
        x: u16,
        y: u16,
    },
    ContextMenuClose,
    ContextMenuMoveSelection {
        delta: isize,
    },
    ContextMenuSetSelected {
        index: usize,
    },
    ContextMenuConfirm,
    InputDialogAppend(char),
    InputDialogBackspace,
    InputDialogCursorLeft,
    InputDialogCursorRight,
    InputDialogAccept,
    InputDialogCancel,
}
