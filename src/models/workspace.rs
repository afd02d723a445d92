//! Workspace records: projects owning flat folder/file maps plus a parent index.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Ids arrive from the server either as JSON strings or numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Str(String),
    Num(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Str(s) => s,
            RawId::Num(n) => n.to_string(),
        }
    }
}

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
            }
        }
    };
}

string_id!(ProjectId);
string_id!(FolderId);
string_id!(FileId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub parent: Option<FolderId>,
}

impl Folder {
    pub fn new(id: impl Into<FolderId>, name: impl Into<String>, parent: Option<FolderId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: FileId,
    pub name: String,
    pub parent: Option<FolderId>,
}

impl File {
    pub fn new(id: impl Into<FileId>, name: impl Into<String>, parent: Option<FolderId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent,
        }
    }
}

/// Direct children of one parent, ordered by name then id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildIndex {
    pub folders: Vec<FolderId>,
    pub files: Vec<FileId>,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub language: String,
    folders: FxHashMap<FolderId, Folder>,
    files: FxHashMap<FileId, File>,
    index: FxHashMap<Option<FolderId>, ChildIndex>,
}

impl Project {
    pub fn new(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            folders: FxHashMap::default(),
            files: FxHashMap::default(),
            index: FxHashMap::default(),
        }
    }

    /// Builds a project from flat lists. Later duplicates replace earlier ones.
    pub fn with_contents(
        mut self,
        folders: impl IntoIterator<Item = Folder>,
        files: impl IntoIterator<Item = File>,
    ) -> Self {
        self.set_contents(folders, files);
        self
    }

    fn set_contents(
        &mut self,
        folders: impl IntoIterator<Item = Folder>,
        files: impl IntoIterator<Item = File>,
    ) {
        self.folders = folders.into_iter().map(|f| (f.id.clone(), f)).collect();
        self.files = files.into_iter().map(|f| (f.id.clone(), f)).collect();
        self.reindex();
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn file(&self, id: &FileId) -> Option<&File> {
        self.files.get(id)
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn children(&self, parent: Option<&FolderId>) -> Option<&ChildIndex> {
        self.index.get(&parent.cloned())
    }

    fn reindex(&mut self) {
        let mut index: FxHashMap<Option<FolderId>, ChildIndex> = FxHashMap::default();
        for folder in self.folders.values() {
            index
                .entry(folder.parent.clone())
                .or_default()
                .folders
                .push(folder.id.clone());
        }
        for file in self.files.values() {
            index
                .entry(file.parent.clone())
                .or_default()
                .files
                .push(file.id.clone());
        }

        for children in index.values_mut() {
            children.folders.sort_by(|a, b| {
                let an = self.folders.get(a).map(|f| f.name.as_str());
                let bn = self.folders.get(b).map(|f| f.name.as_str());
                an.cmp(&bn).then_with(|| a.cmp(b))
            });
            children.files.sort_by(|a, b| {
                let an = self.files.get(a).map(|f| f.name.as_str());
                let bn = self.files.get(b).map(|f| f.name.as_str());
                an.cmp(&bn).then_with(|| a.cmp(b))
            });
        }

        self.index = index;
    }

    /// True when `ancestor` appears on `folder`'s parent chain (or is `folder`).
    pub fn is_ancestor_or_self(&self, ancestor: &FolderId, folder: &FolderId) -> bool {
        let mut current = Some(folder);
        // A malformed chain can loop; bound the walk by the folder count.
        for _ in 0..=self.folders.len() {
            let Some(id) = current else {
                return false;
            };
            if id == ancestor {
                return true;
            }
            current = self.folders.get(id).and_then(|f| f.parent.as_ref());
        }
        false
    }

    /// Every folder and file below `folder`, descendants ordered before their ancestors.
    pub fn descendants(&self, folder: &FolderId) -> (Vec<FolderId>, Vec<FileId>) {
        let mut folders = Vec::new();
        let mut files = Vec::new();
        let mut visited: FxHashSet<&FolderId> = FxHashSet::default();
        visited.insert(folder);

        let mut stack = vec![folder];
        while let Some(id) = stack.pop() {
            let Some(children) = self.index.get(&Some(id.clone())) else {
                continue;
            };
            files.extend(children.files.iter().cloned());
            for child in &children.folders {
                if visited.insert(child) {
                    folders.push(child.clone());
                    stack.push(child);
                }
            }
        }

        folders.reverse();
        (folders, files)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceError {
    #[error("unknown project {0}")]
    UnknownProject(ProjectId),
    #[error("project {0} already exists")]
    DuplicateProject(ProjectId),
    #[error("unknown folder {0}")]
    UnknownFolder(FolderId),
    #[error("folder {0} already exists")]
    DuplicateFolder(FolderId),
    #[error("unknown file {0}")]
    UnknownFile(FileId),
    #[error("file {0} already exists")]
    DuplicateFile(FileId),
    #[error("parent folder {0} does not exist in this project")]
    UnknownParent(FolderId),
    #[error("moving folder {0} there would make it its own ancestor")]
    WouldCycle(FolderId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPatch {
    pub name: Option<String>,
    pub parent: Option<Option<FolderId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePatch {
    pub name: Option<String>,
    pub parent: Option<Option<FolderId>>,
}

/// Authoritative client-side snapshot of all known projects.
///
/// Projects are held behind `Arc`; every mutation copies the touched project,
/// edits the copy and swaps it in, so snapshots handed out earlier never change.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceStore {
    projects: Vec<Arc<Project>>,
}

impl WorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    pub fn project(&self, id: &ProjectId) -> Option<Arc<Project>> {
        self.projects.iter().find(|p| &p.id == id).cloned()
    }

    pub fn contains_project(&self, id: &ProjectId) -> bool {
        self.projects.iter().any(|p| &p.id == id)
    }

    pub fn descendants(
        &self,
        project: &ProjectId,
        folder: &FolderId,
    ) -> Result<(Vec<FolderId>, Vec<FileId>), WorkspaceError> {
        let snapshot = self
            .project(project)
            .ok_or_else(|| WorkspaceError::UnknownProject(project.clone()))?;
        if snapshot.folder(folder).is_none() {
            return Err(WorkspaceError::UnknownFolder(folder.clone()));
        }
        Ok(snapshot.descendants(folder))
    }

    pub fn add_project(&mut self, mut project: Project) -> Result<Arc<Project>, WorkspaceError> {
        if self.contains_project(&project.id) {
            return Err(WorkspaceError::DuplicateProject(project.id));
        }
        project.reindex();
        let project = Arc::new(project);
        self.projects.push(Arc::clone(&project));
        Ok(project)
    }

    pub fn remove_project(&mut self, id: &ProjectId) -> Result<Arc<Project>, WorkspaceError> {
        let pos = self
            .projects
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| WorkspaceError::UnknownProject(id.clone()))?;
        Ok(self.projects.remove(pos))
    }

    pub fn update_project(
        &mut self,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(id, |project| {
            if let Some(name) = patch.name {
                project.name = name;
            }
            if let Some(language) = patch.language {
                project.language = language;
            }
            Ok(())
        })
    }

    pub fn add_folder(
        &mut self,
        project_id: &ProjectId,
        folder: Folder,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            if project.folders.contains_key(&folder.id) {
                return Err(WorkspaceError::DuplicateFolder(folder.id));
            }
            if let Some(parent) = &folder.parent {
                if !project.folders.contains_key(parent) {
                    return Err(WorkspaceError::UnknownParent(parent.clone()));
                }
            }
            project.folders.insert(folder.id.clone(), folder);
            Ok(())
        })
    }

    /// Removes the folder together with every folder and file below it.
    pub fn remove_folder(
        &mut self,
        project_id: &ProjectId,
        folder_id: &FolderId,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            if !project.folders.contains_key(folder_id) {
                return Err(WorkspaceError::UnknownFolder(folder_id.clone()));
            }
            let (folders, files) = project.descendants(folder_id);
            for file in files {
                project.files.remove(&file);
            }
            for folder in folders {
                project.folders.remove(&folder);
            }
            project.folders.remove(folder_id);
            Ok(())
        })
    }

    pub fn update_folder(
        &mut self,
        project_id: &ProjectId,
        folder_id: &FolderId,
        patch: FolderPatch,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            if !project.folders.contains_key(folder_id) {
                return Err(WorkspaceError::UnknownFolder(folder_id.clone()));
            }
            if let Some(Some(parent)) = &patch.parent {
                if !project.folders.contains_key(parent) {
                    return Err(WorkspaceError::UnknownParent(parent.clone()));
                }
                if project.is_ancestor_or_self(folder_id, parent) {
                    return Err(WorkspaceError::WouldCycle(folder_id.clone()));
                }
            }
            let folder = project
                .folders
                .get_mut(folder_id)
                .ok_or_else(|| WorkspaceError::UnknownFolder(folder_id.clone()))?;
            if let Some(name) = patch.name {
                folder.name = name;
            }
            if let Some(parent) = patch.parent {
                folder.parent = parent;
            }
            Ok(())
        })
    }

    /// `parent` is authoritative and overwrites `file.parent`.
    pub fn add_file(
        &mut self,
        project_id: &ProjectId,
        parent: Option<&FolderId>,
        mut file: File,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            if project.files.contains_key(&file.id) {
                return Err(WorkspaceError::DuplicateFile(file.id));
            }
            if let Some(parent) = parent {
                if !project.folders.contains_key(parent) {
                    return Err(WorkspaceError::UnknownParent(parent.clone()));
                }
            }
            file.parent = parent.cloned();
            project.files.insert(file.id.clone(), file);
            Ok(())
        })
    }

    pub fn remove_file(
        &mut self,
        project_id: &ProjectId,
        file_id: &FileId,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            project
                .files
                .remove(file_id)
                .map(|_| ())
                .ok_or_else(|| WorkspaceError::UnknownFile(file_id.clone()))
        })
    }

    pub fn update_file(
        &mut self,
        project_id: &ProjectId,
        file_id: &FileId,
        patch: FilePatch,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            if let Some(Some(parent)) = &patch.parent {
                if !project.folders.contains_key(parent) {
                    return Err(WorkspaceError::UnknownParent(parent.clone()));
                }
            }
            let file = project
                .files
                .get_mut(file_id)
                .ok_or_else(|| WorkspaceError::UnknownFile(file_id.clone()))?;
            if let Some(name) = patch.name {
                file.name = name;
            }
            if let Some(parent) = patch.parent {
                file.parent = parent;
            }
            Ok(())
        })
    }

    /// Wholesale replacement from a server listing. Structure is not validated here.
    pub fn replace_contents(
        &mut self,
        project_id: &ProjectId,
        folders: Vec<Folder>,
        files: Vec<File>,
    ) -> Result<Arc<Project>, WorkspaceError> {
        self.modify(project_id, |project| {
            project.set_contents(folders, files);
            Ok(())
        })
    }

    fn modify<F>(&mut self, id: &ProjectId, f: F) -> Result<Arc<Project>, WorkspaceError>
    where
        F: FnOnce(&mut Project) -> Result<(), WorkspaceError>,
    {
        let slot = self
            .projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| WorkspaceError::UnknownProject(id.clone()))?;

        let mut next = Project::clone(slot);
        f(&mut next)?;
        next.reindex();
        *slot = Arc::new(next);
        Ok(Arc::clone(slot))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/workspace.rs"]
mod tests;
