//! # Atlas Audit Core
//!
//! Shared building blocks for the atlas-audit tool: configuration and
//! credential resolution, site URL normalization, and console output helpers.

pub mod config;
pub mod consts;
pub mod creds;
pub mod output;
pub mod text;
pub mod url;

pub use config::{AuditConfig, ConfigError, ConfigFile, ConfigOverrides, ConfigSources, default_config_path};
pub use output::ColorMode;
