//! Service adapters: IO implementations (HTTP, async runtime, settings files).

pub mod http;
pub mod paths;
pub mod runtime;
pub mod settings;

pub use http::HttpProjectApi;
pub use paths::{ensure_log_dir, get_log_dir};
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{
    apply_base_url_override, ensure_settings_file, get_settings_path, load_settings,
    load_settings_from, resolve_settings,
};
