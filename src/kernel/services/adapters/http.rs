//! reqwest-backed `ProjectApi`.

use crate::kernel::services::ports::{
    ApiError, ApiResult, BoxFuture, FileContent, FileDto, FolderDto, NewFile, NewFolder,
    NewProject, ProjectApi, ProjectDto, ProjectListing, RenameRequest, SaveCodeRequest, Settings,
};
use crate::models::{File, FileId, Folder, FolderId, Project, ProjectId};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct HttpProjectApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpProjectApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> ApiResult<Self> {
        Self::new(settings.api_base_url.clone(), settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_discard(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).await.map(|_| ())
    }

    /// Create endpoints may answer with the new record, an empty body, or something else entirely.
    async fn send_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<Option<T>> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(serde_json::from_slice::<T>(&bytes).ok())
    }
}

fn file_parent(parent: Option<&FolderId>, file: &FileId) -> ApiResult<FolderId> {
    parent
        .cloned()
        .ok_or_else(|| ApiError::MissingParent(file.clone()))
}

impl ProjectApi for HttpProjectApi {
    fn save_code(&self, request: SaveCodeRequest) -> BoxFuture<'_, ApiResult<()>> {
        Box::pin(async move {
            let builder = self.client.post(self.url("/savecode")).json(&request);
            self.send_discard(builder).await
        })
    }

    fn create_project(&self, request: NewProject) -> BoxFuture<'_, ApiResult<Project>> {
        Box::pin(async move {
            let builder = self.client.post(self.url("/projects")).json(&request);
            let dto: ProjectDto = self.send_json(builder).await?;
            let mut project = Project::from(dto);
            if project.name.is_empty() {
                project.name = request.name;
            }
            if project.language.is_empty() {
                project.language = request.language;
            }
            Ok(project)
        })
    }

    fn create_folder(
        &self,
        project: &ProjectId,
        request: NewFolder,
    ) -> BoxFuture<'_, ApiResult<Option<Folder>>> {
        let url = self.url(&format!("/projects/{project}/folders"));
        Box::pin(async move {
            let builder = self.client.post(url).json(&request);
            let dto: Option<FolderDto> = self.send_optional(builder).await?;
            Ok(dto.map(|mut dto| {
                if dto.name.is_empty() {
                    dto.name = request.name;
                }
                if dto.parent_id.is_none() {
                    dto.parent_id = request.parent_id;
                }
                Folder::from(dto)
            }))
        })
    }

    fn create_file(
        &self,
        project: &ProjectId,
        request: NewFile,
    ) -> BoxFuture<'_, ApiResult<Option<File>>> {
        let url = self.url(&format!(
            "/projects/{project}/folders/{}/files",
            request.parent_id
        ));
        Box::pin(async move {
            let builder = self.client.post(url).json(&request);
            let dto: Option<FileDto> = self.send_optional(builder).await?;
            Ok(dto.map(|mut dto| {
                if dto.name.is_empty() {
                    dto.name = request.name;
                }
                if dto.parent_id.is_none() {
                    dto.parent_id = Some(request.parent_id);
                }
                File::from(dto)
            }))
        })
    }

    fn delete_folder(
        &self,
        project: &ProjectId,
        folder: &FolderId,
    ) -> BoxFuture<'_, ApiResult<()>> {
        let url = self.url(&format!("/projects/{project}/folders/{folder}"));
        Box::pin(async move { self.send_discard(self.client.delete(url)).await })
    }

    fn delete_file(
        &self,
        project: &ProjectId,
        parent: Option<&FolderId>,
        file: &FileId,
    ) -> BoxFuture<'_, ApiResult<()>> {
        let url = file_parent(parent, file)
            .map(|parent| self.url(&format!("/projects/{project}/folders/{parent}/files/{file}")));
        Box::pin(async move { self.send_discard(self.client.delete(url?)).await })
    }

    fn rename_folder(
        &self,
        project: &ProjectId,
        folder: &FolderId,
        name: String,
    ) -> BoxFuture<'_, ApiResult<()>> {
        let url = self.url(&format!("/projects/{project}/folders/{folder}"));
        Box::pin(async move {
            let builder = self.client.patch(url).json(&RenameRequest { name });
            self.send_discard(builder).await
        })
    }

    fn rename_file(
        &self,
        project: &ProjectId,
        parent: Option<&FolderId>,
        file: &FileId,
        name: String,
    ) -> BoxFuture<'_, ApiResult<()>> {
        let url = file_parent(parent, file)
            .map(|parent| self.url(&format!("/projects/{project}/folders/{parent}/files/{file}")));
        Box::pin(async move {
            let builder = self.client.patch(url?).json(&RenameRequest { name });
            self.send_discard(builder).await
        })
    }

    fn load_project(&self, project: &ProjectId) -> BoxFuture<'_, ApiResult<ProjectListing>> {
        let url = self.url(&format!("/projects/{project}"));
        Box::pin(async move { self.send_json(self.client.get(url)).await })
    }

    fn fetch_file_content(&self, file: &FileId) -> BoxFuture<'_, ApiResult<FileContent>> {
        let url = self.url(&format!("/files/{file}"));
        Box::pin(async move { self.send_json(self.client.get(url)).await })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/http.rs"]
mod tests;
