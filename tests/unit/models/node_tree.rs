use super::*;
use crate::models::workspace::{File, Folder};

fn fid(id: &str) -> FolderId {
    FolderId::from(id)
}

fn project(folders: Vec<Folder>, files: Vec<File>) -> Project {
    Project::new("p1", "demo", "rust").with_contents(folders, files)
}

#[test]
fn nested_folder_and_file_under_single_root() {
    let project = project(
        vec![Folder::new("f1", "src", None), Folder::new("f2", "util", Some(fid("f1")))],
        vec![File::new("x1", "main.rs", Some(fid("f1")))],
    );

    let tree = build_node_tree(&project).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].id, NodeRef::Folder(fid("f1")));
    let children: Vec<_> = tree[0].children.iter().map(|n| n.id.clone()).collect();
    assert_eq!(
        children,
        vec![
            NodeRef::Folder(fid("f2")),
            NodeRef::File(FileId::from("x1"))
        ]
    );
}

#[test]
fn root_folders_precede_root_files_regardless_of_input_order() {
    let project = project(
        vec![Folder::new("f2", "zeta", None), Folder::new("f1", "alpha", None)],
        vec![File::new("x2", "a.txt", None), File::new("x1", "0.txt", None)],
    );

    let tree = build_node_tree(&project).unwrap();
    let kinds: Vec<_> = tree.iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Folder,
            NodeKind::Folder,
            NodeKind::File,
            NodeKind::File
        ]
    );
    assert_eq!(tree[0].name, "alpha");
    assert_eq!(tree[2].name, "0.txt");
}

#[test]
fn empty_folder_has_empty_children() {
    let project = project(vec![Folder::new("f1", "empty", None)], Vec::new());
    let tree = build_node_tree(&project).unwrap();
    assert!(tree[0].children.is_empty());
}

#[test]
fn folder_with_only_files_has_no_folder_children() {
    let project = project(
        vec![Folder::new("f1", "docs", None)],
        vec![
            File::new("x1", "a.md", Some(fid("f1"))),
            File::new("x2", "b.md", Some(fid("f1"))),
        ],
    );
    let tree = build_node_tree(&project).unwrap();
    assert_eq!(tree[0].children.len(), 2);
    assert!(tree[0]
        .children
        .iter()
        .all(|child| child.kind() == NodeKind::File));
}

#[test]
fn flatten_reproduces_structural_identity() {
    let folders = vec![
        Folder::new("f1", "a", None),
        Folder::new("f2", "b", Some(fid("f1"))),
        Folder::new("f3", "c", Some(fid("f2"))),
        Folder::new("f4", "d", None),
    ];
    let files = vec![
        File::new("x1", "1", Some(fid("f3"))),
        File::new("x2", "2", Some(fid("f1"))),
        File::new("x3", "3", None),
    ];

    let mut expected: Vec<(NodeRef, Option<FolderId>)> = folders
        .iter()
        .map(|f| (NodeRef::Folder(f.id.clone()), f.parent.clone()))
        .chain(
            files
                .iter()
                .map(|f| (NodeRef::File(f.id.clone()), f.parent.clone())),
        )
        .collect();

    let tree = build_node_tree(&project(folders, files)).unwrap();
    let mut actual = flatten(&tree);

    let key = |(node, _): &(NodeRef, Option<FolderId>)| (node.kind() as u8, node.as_str().to_string());
    expected.sort_by_key(key);
    actual.sort_by_key(key);
    assert_eq!(actual, expected);
}

#[test]
fn parent_cycle_is_reported_instead_of_recursing() {
    let project = project(
        vec![
            Folder::new("f1", "root", None),
            Folder::new("a", "a", Some(fid("b"))),
            Folder::new("b", "b", Some(fid("a"))),
        ],
        Vec::new(),
    );
    let err = build_node_tree(&project).unwrap_err();
    assert!(matches!(err, TreeError::Cycle { .. }));
}

#[test]
fn self_parent_is_a_cycle() {
    let project = project(vec![Folder::new("a", "a", Some(fid("a")))], Vec::new());
    assert_eq!(
        build_node_tree(&project).unwrap_err(),
        TreeError::Cycle { folder: fid("a") }
    );
}

#[test]
fn missing_parent_is_reported() {
    let project = project(
        Vec::new(),
        vec![File::new("x1", "lost.rs", Some(fid("gone")))],
    );
    assert_eq!(
        build_node_tree(&project).unwrap_err(),
        TreeError::DanglingParent {
            node: NodeRef::File(FileId::from("x1")),
            parent: fid("gone"),
        }
    );
}

#[test]
fn visible_rows_are_preorder_with_depth() {
    let project = project(
        vec![Folder::new("f1", "src", None), Folder::new("f2", "util", Some(fid("f1")))],
        vec![
            File::new("x1", "main.rs", Some(fid("f1"))),
            File::new("x2", "mod.rs", Some(fid("f2"))),
            File::new("x3", "Cargo.toml", None),
        ],
    );
    let rows = visible_rows(&build_node_tree(&project).unwrap());
    let summary: Vec<_> = rows.iter().map(|r| (r.name.as_str(), r.depth)).collect();
    assert_eq!(
        summary,
        vec![
            ("src", 0),
            ("util", 1),
            ("mod.rs", 2),
            ("main.rs", 1),
            ("Cargo.toml", 0)
        ]
    );
    assert!(rows[0].is_folder());
    assert!(!rows[4].is_folder());
}
