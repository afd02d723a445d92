//! 应用层：主题与工作台

pub mod theme;
pub mod workbench;

pub use workbench::{Focus, Workbench};
