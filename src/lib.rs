//! projtree - 远程项目文件树浏览器
//!
//! 模块结构：
//! - models: 数据模型（Project / Folder / File，扁平存储 + 父索引，派生节点树）
//! - kernel: 状态、Action、Effect 与 reducer；services 下为端口与适配器（HTTP、异步运行时、配置）
//! - tui / views / app: 终端前端（feature `tui`）

pub mod kernel;
pub mod models;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod tui;
#[cfg(feature = "tui")]
pub mod views;
