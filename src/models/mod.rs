//! 数据模型层

pub mod language;
pub mod node_tree;
pub mod workspace;

pub use language::{find_language, LanguageOption, LANGUAGES};
pub use node_tree::{
    build_node_tree, flatten, visible_rows, Node, NodeKind, NodeRef, TreeError, TreeRow,
};
pub use workspace::{
    ChildIndex, File, FileId, FilePatch, Folder, FolderId, FolderPatch, Project, ProjectId,
    ProjectPatch, WorkspaceError, WorkspaceStore,
};
