//! Derived presentation tree built from a project's flat folder/file maps.

use super::workspace::{FileId, FolderId, Project};
use rustc_hash::FxHashSet;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Folder,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Folder(FolderId),
    File(FileId),
}

impl NodeRef {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Folder(_) => NodeKind::Folder,
            NodeRef::File(_) => NodeKind::File,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeRef::Folder(id) => id.as_str(),
            NodeRef::File(id) => id.as_str(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Folder(id) => write!(f, "folder {id}"),
            NodeRef::File(id) => write!(f, "file {id}"),
        }
    }
}

/// One tree element. Files and empty folders carry an empty `children` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeRef,
    pub name: String,
    pub parent: Option<FolderId>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("folder {folder} is part of a parent cycle")]
    Cycle { folder: FolderId },
    #[error("{node} references missing parent folder {parent}")]
    DanglingParent { node: NodeRef, parent: FolderId },
}

pub fn build_node_tree(project: &Project) -> Result<Vec<Node>, TreeError> {
    let mut visited = FxHashSet::default();
    let nodes = build_level(project, None, &mut visited)?;
    check_unreached(project, &visited)?;
    Ok(nodes)
}

fn build_level(
    project: &Project,
    parent: Option<&FolderId>,
    visited: &mut FxHashSet<NodeRef>,
) -> Result<Vec<Node>, TreeError> {
    let Some(children) = project.children(parent) else {
        return Ok(Vec::new());
    };

    let mut nodes = Vec::with_capacity(children.folders.len() + children.files.len());

    for folder_id in &children.folders {
        if !visited.insert(NodeRef::Folder(folder_id.clone())) {
            return Err(TreeError::Cycle {
                folder: folder_id.clone(),
            });
        }
        let Some(folder) = project.folder(folder_id) else {
            continue;
        };
        let children = build_level(project, Some(folder_id), visited)?;
        nodes.push(Node {
            id: NodeRef::Folder(folder.id.clone()),
            name: folder.name.clone(),
            parent: folder.parent.clone(),
            children,
        });
    }

    for file_id in &children.files {
        let Some(file) = project.file(file_id) else {
            continue;
        };
        visited.insert(NodeRef::File(file_id.clone()));
        nodes.push(Node {
            id: NodeRef::File(file.id.clone()),
            name: file.name.clone(),
            parent: file.parent.clone(),
            children: Vec::new(),
        });
    }

    Ok(nodes)
}

/// Anything the walk from the roots did not reach hangs off a loop or a missing folder.
fn check_unreached(project: &Project, visited: &FxHashSet<NodeRef>) -> Result<(), TreeError> {
    let mut folders: Vec<_> = project
        .folders()
        .filter(|f| !visited.contains(&NodeRef::Folder(f.id.clone())))
        .collect();
    folders.sort_by(|a, b| a.id.cmp(&b.id));

    for folder in folders {
        let mut seen: FxHashSet<&FolderId> = FxHashSet::default();
        seen.insert(&folder.id);
        let mut current = folder;
        while let Some(parent) = current.parent.as_ref() {
            let Some(next) = project.folder(parent) else {
                return Err(TreeError::DanglingParent {
                    node: NodeRef::Folder(current.id.clone()),
                    parent: parent.clone(),
                });
            };
            if !seen.insert(&next.id) {
                return Err(TreeError::Cycle {
                    folder: next.id.clone(),
                });
            }
            current = next;
        }
    }

    let mut files: Vec<_> = project
        .files()
        .filter(|f| !visited.contains(&NodeRef::File(f.id.clone())))
        .collect();
    files.sort_by(|a, b| a.id.cmp(&b.id));

    if let Some(file) = files.first() {
        if let Some(parent) = &file.parent {
            return Err(TreeError::DanglingParent {
                node: NodeRef::File(file.id.clone()),
                parent: parent.clone(),
            });
        }
    }

    Ok(())
}

/// Structural identity of every node: `(node, parent)`.
pub fn flatten(nodes: &[Node]) -> Vec<(NodeRef, Option<FolderId>)> {
    let mut out = Vec::new();
    let mut stack: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push((node.id.clone(), node.parent.clone()));
        stack.extend(node.children.iter().rev());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub node: NodeRef,
    pub parent: Option<FolderId>,
    pub depth: u16,
    pub name: String,
}

impl TreeRow {
    pub fn is_folder(&self) -> bool {
        self.node.kind() == NodeKind::Folder
    }
}

/// Pre-order rows for rendering; every descendant is always shown.
pub fn visible_rows(nodes: &[Node]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&Node, u16)> = nodes.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        rows.push(TreeRow {
            node: node.id.clone(),
            parent: node.parent.clone(),
            depth,
            name: node.name.clone(),
        });
        for child in node.children.iter().rev() {
            stack.push((child, depth.saturating_add(1)));
        }
    }
    rows
}

#[cfg(test)]
#[path = "../../tests/unit/models/node_tree.rs"]
mod tests;
