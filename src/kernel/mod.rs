//! Headless application core (state/action/effect).

pub mod action;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use effect::{DeletePlan, Effect, RemoteOp};
pub use state::{
    AppState, ContextMenuItem, ContextMenuState, ExplorerState, FileSelection, InputDialogKind,
    InputDialogState, ProjectLoads, StatusLevel, StatusLine, UiState,
};
pub use store::{DispatchResult, Store};
