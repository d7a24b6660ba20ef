//! Configuration module for vidscribe.
//!
//! Provides `AppConfig` (top-level settings), the `ServiceConfig` and
//! `UiConfig` sections, `AppPaths` for cross-platform config directories, and
//! TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ServiceConfig, UiConfig};
