use super::*;
use crate::kernel::services::ports::{
    ApiResult, BoxFuture, FileContent, ProjectListing,
};
use crate::kernel::{Action, AppState, Store};
use crate::models::{File, FileId, Folder, Project, WorkspaceStore};
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

/// Records every call; deletes and loads of ids listed in `failing_ids` fail with a 500.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
    failing_ids: Vec<String>,
}

impl FakeApi {
    fn failing(ids: &[&str]) -> Self {
        Self {
            failing_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn result_for(&self, id: &str) -> ApiResult<()> {
        if self.failing_ids.iter().any(|f| f == id) {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

impl ProjectApi for FakeApi {
    fn save_code(&self, request: SaveCodeRequest) -> BoxFuture<'_, ApiResult<()>> {
        self.record(format!("save {}", request.file_id));
        Box::pin(async { Ok(()) })
    }

    fn create_project(&self, request: NewProject) -> BoxFuture<'_, ApiResult<Project>> {
        self.record(format!("create project {}", request.name));
        Box::pin(async move { Ok(Project::new("p9", request.name, request.language)) })
    }

    fn create_folder(
        &self,
        project: &ProjectId,
        request: NewFolder,
    ) -> BoxFuture<'_, ApiResult<Option<Folder>>> {
        self.record(format!("create folder {project}/{}", request.name));
        Box::pin(async move { Ok(Some(Folder::new("new", request.name, request.parent_id))) })
    }

    fn create_file(
        &self,
        project: &ProjectId,
        request: NewFile,
    ) -> BoxFuture<'_, ApiResult<Option<File>>> {
        self.record(format!("create file {project}/{}", request.name));
        Box::pin(async { Ok(None) })
    }

    fn delete_folder(
        &self,
        _project: &ProjectId,
        folder: &FolderId,
    ) -> BoxFuture<'_, ApiResult<()>> {
        self.record(format!("delete folder {folder}"));
        let result = self.result_for(folder.as_str());
        Box::pin(async move { result })
    }

    fn delete_file(
        &self,
        _project: &ProjectId,
        _parent: Option<&FolderId>,
        file: &FileId,
    ) -> BoxFuture<'_, ApiResult<()>> {
        self.record(format!("delete file {file}"));
        let result = self.result_for(file.as_str());
        Box::pin(async move { result })
    }

    fn rename_folder(
        &self,
        _project: &ProjectId,
        folder: &FolderId,
        name: String,
    ) -> BoxFuture<'_, ApiResult<()>> {
        self.record(format!("rename folder {folder} {name}"));
        Box::pin(async { Ok(()) })
    }

    fn rename_file(
        &self,
        _project: &ProjectId,
        _parent: Option<&FolderId>,
        file: &FileId,
        name: String,
    ) -> BoxFuture<'_, ApiResult<()>> {
        self.record(format!("rename file {file} {name}"));
        Box::pin(async { Ok(()) })
    }

    fn load_project(&self, project: &ProjectId) -> BoxFuture<'_, ApiResult<ProjectListing>> {
        self.record(format!("load {project}"));
        let result = self.result_for(project.as_str()).map(|()| ProjectListing::default());
        Box::pin(async move { result })
    }

    fn fetch_file_content(&self, file: &FileId) -> BoxFuture<'_, ApiResult<FileContent>> {
        let content = format!("content of {file}");
        Box::pin(async move { Ok(FileContent { content }) })
    }
}

fn runtime_with(api: Arc<FakeApi>) -> (AsyncRuntime, mpsc::Receiver<AppMessage>) {
    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(api, tx).unwrap();
    (runtime, rx)
}

fn next_message(rx: &mpsc::Receiver<AppMessage>) -> AppMessage {
    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

fn sample_plan() -> DeletePlan {
    DeletePlan {
        files: vec![
            (Some(FolderId::from("f1")), FileId::from("x1")),
            (Some(FolderId::from("f2")), FileId::from("x2")),
        ],
        folders: vec![FolderId::from("f2")],
    }
}

#[test]
fn fetch_reports_content_with_request_seq() {
    let api = Arc::new(FakeApi::default());
    let (runtime, rx) = runtime_with(api);

    runtime.run(Effect::FetchFileContent {
        file: FileId::from("x1"),
        seq: 7,
    });

    match next_message(&rx).into_action() {
        Action::FileContentLoaded { file, seq, content } => {
            assert_eq!(file, FileId::from("x1"));
            assert_eq!(seq, 7);
            assert_eq!(content, "content of x1");
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn folder_delete_runs_plan_in_order() {
    let api = Arc::new(FakeApi::default());
    let (runtime, rx) = runtime_with(Arc::clone(&api));

    runtime.run(Effect::DeleteFolder {
        project: ProjectId::from("p1"),
        folder: FolderId::from("f1"),
        plan: sample_plan(),
    });

    assert!(matches!(
        next_message(&rx),
        AppMessage::FolderDeleted { folder, .. } if folder == FolderId::from("f1")
    ));
    assert_eq!(
        api.calls(),
        vec![
            "delete file x1",
            "delete file x2",
            "delete folder f2",
            "delete folder f1",
        ]
    );
}

#[test]
fn folder_delete_stops_at_first_failure() {
    let api = Arc::new(FakeApi::failing(&["x2"]));
    let (runtime, rx) = runtime_with(Arc::clone(&api));

    runtime.run(Effect::DeleteFolder {
        project: ProjectId::from("p1"),
        folder: FolderId::from("f1"),
        plan: sample_plan(),
    });

    match next_message(&rx).into_action() {
        Action::FolderDeleteFailed {
            folder,
            completed,
            error,
            ..
        } => {
            assert_eq!(folder, FolderId::from("f1"));
            assert_eq!(completed, 1);
            assert!(error.contains("500"));
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert_eq!(api.calls(), vec!["delete file x1", "delete file x2"]);
}

#[test]
fn folder_delete_failing_on_first_step_reports_nothing_applied() {
    let api = Arc::new(FakeApi::failing(&["x1"]));
    let (runtime, rx) = runtime_with(Arc::clone(&api));

    runtime.run(Effect::DeleteFolder {
        project: ProjectId::from("p1"),
        folder: FolderId::from("f1"),
        plan: sample_plan(),
    });

    assert!(matches!(
        next_message(&rx),
        AppMessage::FolderDeleteFailed { completed: 0, .. }
    ));
    assert_eq!(api.calls(), vec!["delete file x1"]);
}

#[test]
fn partial_folder_delete_resyncs_store_from_server() {
    let mut store = Store::new(AppState::new(WorkspaceStore::new()));
    store.dispatch(Action::ProjectLoaded {
        project: ProjectId::from("p1"),
        seq: 0,
        name: None,
        language: None,
        folders: vec![Folder::new("f1", "src", None)],
        files: vec![
            File::new("x1", "A.java", Some(FolderId::from("f1"))),
            File::new("x2", "B.java", Some(FolderId::from("f1"))),
        ],
    });

    let api = Arc::new(FakeApi::failing(&["x2"]));
    let (runtime, rx) = runtime_with(Arc::clone(&api));
    runtime.run(Effect::DeleteFolder {
        project: ProjectId::from("p1"),
        folder: FolderId::from("f1"),
        plan: DeletePlan {
            files: vec![
                (Some(FolderId::from("f1")), FileId::from("x1")),
                (Some(FolderId::from("f1")), FileId::from("x2")),
            ],
            folders: Vec::new(),
        },
    });

    let result = store.dispatch(next_message(&rx).into_action());
    assert_eq!(
        result.effects,
        vec![Effect::LoadProject {
            project: ProjectId::from("p1"),
            seq: 1,
        }]
    );

    for effect in result.effects {
        runtime.run(effect);
    }
    store.dispatch(next_message(&rx).into_action());

    let project = store.state().selected_project().unwrap();
    assert!(project.file(&FileId::from("x1")).is_none());
    assert_eq!(
        api.calls(),
        vec!["delete file x1", "delete file x2", "load p1"]
    );
}

#[test]
fn create_folder_reports_server_record() {
    let api = Arc::new(FakeApi::default());
    let (runtime, rx) = runtime_with(api);

    runtime.run(Effect::CreateFolder {
        project: ProjectId::from("p1"),
        parent: None,
        name: "docs".to_string(),
    });

    match next_message(&rx).into_action() {
        Action::FolderCreated { project, folder } => {
            assert_eq!(project, ProjectId::from("p1"));
            assert_eq!(folder.map(|f| f.name), Some("docs".to_string()));
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn load_project_converts_listing() {
    let api = Arc::new(FakeApi::default());
    let (runtime, rx) = runtime_with(Arc::clone(&api));

    runtime.run(Effect::LoadProject {
        project: ProjectId::from("p1"),
        seq: 4,
    });

    assert!(matches!(
        next_message(&rx).into_action(),
        Action::ProjectLoaded { project, seq: 4, folders, files, .. }
            if project == ProjectId::from("p1") && folders.is_empty() && files.is_empty()
    ));
    assert_eq!(api.calls(), vec!["load p1"]);
}

#[test]
fn load_failure_reports_project_and_seq() {
    let api = Arc::new(FakeApi::failing(&["p1"]));
    let (runtime, rx) = runtime_with(api);

    runtime.run(Effect::LoadProject {
        project: ProjectId::from("p1"),
        seq: 3,
    });

    match next_message(&rx).into_action() {
        Action::ProjectLoadFailed {
            project,
            seq,
            error,
        } => {
            assert_eq!(project, ProjectId::from("p1"));
            assert_eq!(seq, 3);
            assert!(error.contains("500"));
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn rename_file_reports_new_name() {
    let api = Arc::new(FakeApi::default());
    let (runtime, rx) = runtime_with(api);

    runtime.run(Effect::RenameFile {
        project: ProjectId::from("p1"),
        parent: Some(FolderId::from("f1")),
        file: FileId::from("x1"),
        name: "B.java".to_string(),
    });

    assert!(matches!(
        next_message(&rx),
        AppMessage::FileRenamed { name, .. } if name == "B.java"
    ));
}
