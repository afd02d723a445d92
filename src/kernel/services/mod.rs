//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app (kernel-facing).
//! - `adapters`: IO implementations (HTTP, tokio runtime, settings files).

pub mod adapters;
pub mod ports;
