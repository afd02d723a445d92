//! Service ports: traits + data contracts.

pub mod project_api;
pub mod runtime;
pub mod settings;

pub use project_api::{
    ApiError, ApiResult, FileContent, FileDto, FolderDto, NewFile, NewFolder, NewProject,
    ProjectApi, ProjectDto, ProjectListing, RenameRequest, SaveCodeRequest,
};
pub use runtime::BoxFuture;
pub use settings::Settings;
