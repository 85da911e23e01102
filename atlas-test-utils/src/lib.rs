//! Test utilities shared across the atlas-audit workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - HOME directory isolation ([`HomeEnvTestGuard`])
//! - Temporary `.netrc` files ([`NetrcGuard`])
//! - JSON bodies shaped like Jira and Confluence responses ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod home;
pub mod netrc;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use home::HomeEnvTestGuard;
pub use netrc::NetrcGuard;
