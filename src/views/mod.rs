//! 视图层模块
//!
//! - ExplorerView: 项目树
//! - ContentView: 文件内容
//! - ContextMenuView / input dialog: 弹出层

pub mod content;
pub mod context_menu;
pub mod explorer;
pub mod input_dialog;
pub(crate) mod util;

pub use content::ContentView;
pub use context_menu::{menu_rect, ContextMenuView, MenuHit};
pub use explorer::ExplorerView;
pub use input_dialog::{input_dialog_cursor, render_input_dialog};
