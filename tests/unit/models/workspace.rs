use super::*;

fn sample_store() -> (WorkspaceStore, ProjectId) {
    let mut store = WorkspaceStore::new();
    let project = Project::new("p1", "demo", "rust").with_contents(
        vec![
            Folder::new("f1", "src", None),
            Folder::new("f2", "bin", Some(FolderId::from("f1"))),
        ],
        vec![
            File::new("x1", "main.rs", Some(FolderId::from("f1"))),
            File::new("x2", "cli.rs", Some(FolderId::from("f2"))),
            File::new("x3", "README.md", None),
        ],
    );
    store.add_project(project).unwrap();
    (store, ProjectId::from("p1"))
}

#[test]
fn add_project_rejects_duplicate_id() {
    let (mut store, _) = sample_store();
    let err = store
        .add_project(Project::new("p1", "other", "go"))
        .unwrap_err();
    assert_eq!(err, WorkspaceError::DuplicateProject(ProjectId::from("p1")));
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn update_project_merges_only_given_fields() {
    let (mut store, pid) = sample_store();
    let updated = store
        .update_project(
            &pid,
            ProjectPatch {
                name: Some("renamed".to_string()),
                language: None,
            },
        )
        .unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.language, "rust");
}

#[test]
fn remove_project_filters_by_id() {
    let (mut store, pid) = sample_store();
    store.add_project(Project::new("p2", "two", "go")).unwrap();
    store.remove_project(&pid).unwrap();
    assert!(store.project(&pid).is_none());
    assert!(store.project(&ProjectId::from("p2")).is_some());
    assert!(matches!(
        store.remove_project(&pid),
        Err(WorkspaceError::UnknownProject(_))
    ));
}

#[test]
fn snapshots_are_not_affected_by_later_mutations() {
    let (mut store, pid) = sample_store();
    let before = store.project(&pid).unwrap();
    store
        .add_folder(&pid, Folder::new("f3", "tests", None))
        .unwrap();
    assert_eq!(before.folder_count(), 2);
    assert_eq!(store.project(&pid).unwrap().folder_count(), 3);
}

#[test]
fn add_folder_requires_existing_parent() {
    let (mut store, pid) = sample_store();
    let err = store
        .add_folder(&pid, Folder::new("f9", "x", Some(FolderId::from("nope"))))
        .unwrap_err();
    assert_eq!(err, WorkspaceError::UnknownParent(FolderId::from("nope")));
    assert!(store
        .project(&pid)
        .unwrap()
        .folder(&FolderId::from("f9"))
        .is_none());
}

#[test]
fn remove_folder_drops_descendants() {
    let (mut store, pid) = sample_store();
    let project = store.remove_folder(&pid, &FolderId::from("f1")).unwrap();
    assert_eq!(project.folder_count(), 0);
    assert_eq!(project.file_count(), 1);
    assert!(project.file(&FileId::from("x3")).is_some());
}

#[test]
fn update_folder_rejects_moving_under_own_descendant() {
    let (mut store, pid) = sample_store();
    let err = store
        .update_folder(
            &pid,
            &FolderId::from("f1"),
            FolderPatch {
                name: None,
                parent: Some(Some(FolderId::from("f2"))),
            },
        )
        .unwrap_err();
    assert_eq!(err, WorkspaceError::WouldCycle(FolderId::from("f1")));
}

#[test]
fn add_file_parent_argument_wins_over_record_field() {
    let (mut store, pid) = sample_store();
    let file = File::new("x4", "lib.rs", Some(FolderId::from("f2")));
    let project = store
        .add_file(&pid, Some(&FolderId::from("f1")), file)
        .unwrap();
    let children = project.children(Some(&FolderId::from("f1"))).unwrap();
    assert!(children.files.contains(&FileId::from("x4")));
    assert_eq!(
        project.file(&FileId::from("x4")).unwrap().parent,
        Some(FolderId::from("f1"))
    );
}

#[test]
fn update_file_renames_and_reorders_siblings() {
    let (mut store, pid) = sample_store();
    store
        .add_file(
            &pid,
            Some(&FolderId::from("f1")),
            File::new("x5", "a.rs", None),
        )
        .unwrap();
    let project = store
        .update_file(
            &pid,
            &FileId::from("x5"),
            FilePatch {
                name: Some("z.rs".to_string()),
                parent: None,
            },
        )
        .unwrap();
    let children = project.children(Some(&FolderId::from("f1"))).unwrap();
    assert_eq!(
        children.files,
        vec![FileId::from("x1"), FileId::from("x5")]
    );
}

#[test]
fn remove_file_reports_unknown_id() {
    let (mut store, pid) = sample_store();
    store.remove_file(&pid, &FileId::from("x1")).unwrap();
    assert_eq!(
        store.remove_file(&pid, &FileId::from("x1")).unwrap_err(),
        WorkspaceError::UnknownFile(FileId::from("x1"))
    );
}

#[test]
fn failed_mutation_leaves_project_untouched() {
    let (mut store, pid) = sample_store();
    let before = store.project(&pid).unwrap();
    let _ = store.add_folder(&pid, Folder::new("f1", "dup", None));
    let after = store.project(&pid).unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn descendants_lists_children_before_ancestors() {
    let (mut store, pid) = sample_store();
    store
        .add_folder(&pid, Folder::new("f3", "deep", Some(FolderId::from("f2"))))
        .unwrap();
    let project = store.project(&pid).unwrap();
    let (folders, mut files) = project.descendants(&FolderId::from("f1"));
    assert_eq!(folders, vec![FolderId::from("f3"), FolderId::from("f2")]);
    files.sort();
    assert_eq!(files, vec![FileId::from("x1"), FileId::from("x2")]);
}

#[test]
fn replace_contents_swaps_lists_wholesale() {
    let (mut store, pid) = sample_store();
    let project = store
        .replace_contents(&pid, vec![Folder::new("g1", "only", None)], Vec::new())
        .unwrap();
    assert_eq!(project.folder_count(), 1);
    assert_eq!(project.file_count(), 0);
    assert_eq!(project.name, "demo");
}

#[test]
fn ids_deserialize_from_strings_and_numbers() {
    let a: FolderId = serde_json::from_str("\"abc\"").unwrap();
    let b: FolderId = serde_json::from_str("42").unwrap();
    assert_eq!(a, FolderId::from("abc"));
    assert_eq!(b, FolderId::from("42"));
}
