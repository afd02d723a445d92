//! Remote project API contract and its wire types.

use super::runtime::BoxFuture;
use crate::models::{File, FileId, Folder, FolderId, Project, ProjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("file {0} has no parent folder")]
    MissingParent(FileId),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveCodeRequest {
    pub source_code: String,
    pub file_id: FileId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    pub name: String,
    pub parent_id: Option<FolderId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub name: String,
    pub content: String,
    pub parent_id: FolderId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FolderDto {
    #[serde(alias = "folderId")]
    pub id: FolderId,
    #[serde(alias = "folderName", default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

impl From<FolderDto> for Folder {
    fn from(dto: FolderDto) -> Self {
        Folder::new(dto.id, dto.name, dto.parent_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    #[serde(alias = "fileId")]
    pub id: FileId,
    #[serde(alias = "fileName", default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

impl From<FileDto> for File {
    fn from(dto: FileDto) -> Self {
        File::new(dto.id, dto.name, dto.parent_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    #[serde(alias = "projectId")]
    pub id: ProjectId,
    #[serde(alias = "projectName", default)]
    pub name: String,
    #[serde(default)]
    pub language: String,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project::new(dto.id, dto.name, dto.language)
    }
}

/// `GET /projects/{id}` body. Name and language are only present on some servers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectListing {
    #[serde(default, alias = "projectName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub folders: Vec<FolderDto>,
    #[serde(default)]
    pub files: Vec<FileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileContent {
    #[serde(default)]
    pub content: String,
}

/// Remote CRUD over projects, folders and files.
///
/// Create calls return the server's record when the response carries one;
/// callers refetch the project either way.
pub trait ProjectApi: Send + Sync {
    fn save_code(&self, request: SaveCodeRequest) -> BoxFuture<'_, ApiResult<()>>;

    fn create_project(&self, request: NewProject) -> BoxFuture<'_, ApiResult<Project>>;

    fn create_folder(
        &self,
        project: &ProjectId,
        request: NewFolder,
    ) -> BoxFuture<'_, ApiResult<Option<Folder>>>;

    fn create_file(
        &self,
        project: &ProjectId,
        request: NewFile,
    ) -> BoxFuture<'_, ApiResult<Option<File>>>;

    fn delete_folder(&self, project: &ProjectId, folder: &FolderId)
        -> BoxFuture<'_, ApiResult<()>>;

    fn delete_file(
        &self,
        project: &ProjectId,
        parent: Option<&FolderId>,
        file: &FileId,
    ) -> BoxFuture<'_, ApiResult<()>>;

    fn rename_folder(
        &self,
        project: &ProjectId,
        folder: &FolderId,
        name: String,
    ) -> BoxFuture<'_, ApiResult<()>>;

    fn rename_file(
        &self,
        project: &ProjectId,
        parent: Option<&FolderId>,
        file: &FileId,
        name: String,
    ) -> BoxFuture<'_, ApiResult<()>>;

    fn load_project(&self, project: &ProjectId) -> BoxFuture<'_, ApiResult<ProjectListing>>;

    fn fetch_file_content(&self, file: &FileId) -> BoxFuture<'_, ApiResult<FileContent>>;
}
