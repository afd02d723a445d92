use crate::models::{
    build_node_tree, visible_rows, FileId, FolderId, NodeRef, Project, ProjectId, TreeError,
    TreeRow, WorkspaceStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub message: String,
}

/// The single "currently open file" slot.
///
/// `seq` increases on every selection; a content response tagged with an older
/// `seq` belongs to a superseded selection and must be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    pub file: Option<FileId>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub seq: u64,
}

impl FileSelection {
    pub fn select(&mut self, file: FileId, name: String) -> u64 {
        self.seq = self.seq.wrapping_add(1);
        self.file = Some(file);
        self.name = Some(name);
        self.content = None;
        self.seq
    }

    pub fn clear(&mut self) {
        self.seq = self.seq.wrapping_add(1);
        self.file = None;
        self.name = None;
        self.content = None;
    }

    pub fn is_current(&self, file: &FileId, seq: u64) -> bool {
        self.seq == seq && self.file.as_ref() == Some(file)
    }

    pub fn is_loading(&self) -> bool {
        self.file.is_some() && self.content.is_none()
    }
}

/// Listing fetches are numbered as they are issued. A listing older than the
/// last one applied would roll the tree back, so it is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectLoads {
    pub issued: u64,
    pub applied: u64,
}

impl ProjectLoads {
    pub fn next(&mut self) -> u64 {
        self.issued = self.issued.wrapping_add(1);
        self.issued
    }

    pub fn is_stale(&self, seq: u64) -> bool {
        seq < self.applied
    }

    pub fn mark_applied(&mut self, seq: u64) {
        self.applied = self.applied.max(seq);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    pub rows: Vec<TreeRow>,
    pub tree_error: Option<TreeError>,
    selected: Option<NodeRef>,
    pub scroll_offset: usize,
    pub view_height: usize,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds rows from scratch; the previous selection survives if its node still exists.
    pub fn rebuild(&mut self, project: Option<&Project>) {
        let (rows, tree_error) = match project.map(build_node_tree) {
            Some(Ok(nodes)) => (visible_rows(&nodes), None),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "project tree is malformed");
                (Vec::new(), Some(err))
            }
            None => (Vec::new(), None),
        };

        self.rows = rows;
        self.tree_error = tree_error;
        if self.selected_index().is_none() {
            self.selected = None;
        }
        let max_offset = self.rows.len().saturating_sub(self.view_height.max(1));
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    pub fn selected(&self) -> Option<&NodeRef> {
        self.selected.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.rows.iter().position(|row| &row.node == selected)
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.selected_index().and_then(|i| self.rows.get(i))
    }

    pub fn row(&self, row: usize) -> Option<&TreeRow> {
        self.rows.get(row)
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        self.ensure_selected_visible();
        true
    }

    pub fn select_row(&mut self, row: usize) -> bool {
        let Some(node) = self.rows.get(row).map(|r| r.node.clone()) else {
            return false;
        };
        if self.selected.as_ref() == Some(&node) {
            return false;
        }
        self.selected = Some(node);
        self.ensure_selected_visible();
        true
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() || delta == 0 {
            return false;
        }
        let last = self.rows.len() - 1;
        let next = match self.selected_index() {
            Some(current) => {
                if delta < 0 {
                    current.saturating_sub(delta.unsigned_abs())
                } else {
                    current.saturating_add(delta as usize).min(last)
                }
            }
            None => 0,
        };
        self.select_row(next)
    }

    pub fn scroll(&mut self, delta: isize) -> bool {
        let max_offset = self.rows.len().saturating_sub(self.view_height.max(1));
        let next = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize).min(max_offset)
        };
        let changed = next != self.scroll_offset;
        self.scroll_offset = next;
        changed
    }

    fn ensure_selected_visible(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let height = self.view_height.max(1);
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + height {
            self.scroll_offset = index + 1 - height;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuItem {
    NewFolder,
    NewFile,
    DeleteFolder,
    DeleteFile,
    RenameFolder,
    RenameFile,
}

impl ContextMenuItem {
    pub fn label(self) -> &'static str {
        match self {
            ContextMenuItem::NewFolder => "New Folder",
            ContextMenuItem::NewFile => "New File",
            ContextMenuItem::DeleteFolder => "Delete Folder",
            ContextMenuItem::DeleteFile => "Delete File",
            ContextMenuItem::RenameFolder => "Rename Folder",
            ContextMenuItem::RenameFile => "Rename File",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenuState {
    pub visible: bool,
    pub anchor: (u16, u16),
    pub items: Vec<ContextMenuItem>,
    pub selected: usize,
    pub target: Option<NodeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDialogKind {
    NewFolder { parent: Option<FolderId> },
    NewFile { parent: FolderId },
    RenameFolder { folder: FolderId },
    RenameFile { file: FileId, parent: Option<FolderId> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDialogState {
    pub visible: bool,
    pub title: String,
    pub value: String,
    pub cursor: usize,
    pub error: Option<String>,
    pub kind: Option<InputDialogKind>,
}

impl InputDialogState {
    pub fn open(&mut self, title: impl Into<String>, value: String, kind: InputDialogKind) {
        self.visible = true;
        self.title = title.into();
        self.cursor = value.len();
        self.value = value;
        self.error = None;
        self.kind = Some(kind);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub context_menu: ContextMenuState,
    pub input_dialog: InputDialogState,
    pub status: Option<StatusLine>,
}

impl UiState {
    pub fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Some(StatusLine {
            level,
            message: message.into(),
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub workspace: WorkspaceStore,
    pub selected_project: Option<ProjectId>,
    pub selection: FileSelection,
    pub loads: ProjectLoads,
    pub explorer: ExplorerState,
    pub ui: UiState,
}

impl AppState {
    pub fn new(workspace: WorkspaceStore) -> Self {
        Self {
            workspace,
            ..Self::default()
        }
    }

    pub fn selected_project(&self) -> Option<std::sync::Arc<Project>> {
        self.selected_project
            .as_ref()
            .and_then(|id| self.workspace.project(id))
    }

    pub fn refresh_explorer(&mut self) {
        let project = self.selected_project();
        self.explorer.rebuild(project.as_deref());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
