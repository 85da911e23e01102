//! # Client Creation
//!
//! Builds the runtime and the authenticated Jira and Confluence clients from
//! the resolved configuration.

use std::path::Path;

use anyhow::{Context, Result};
use atlas_client::{AtlassianClient, create_atlassian_client};
use atlas_core::{AuditConfig, ConfigOverrides};
use tokio::runtime::Runtime;
use tracing::debug;

/// Resolve and validate the configuration. Fails before any request is made.
pub fn load_config(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<AuditConfig> {
  let config = AuditConfig::load(overrides, config_path).context("Invalid configuration")?;
  debug!(site = %config.site_url, confluence = %config.confluence_url, "Configuration loaded");
  Ok(config)
}

/// Client for the Jira REST API at the site URL
pub fn create_jira_client(config: &AuditConfig) -> AtlassianClient {
  create_atlassian_client(&config.site_url, &config.email, &config.api_token)
}

/// Client for the Confluence REST API at the Confluence URL
pub fn create_confluence_client(config: &AuditConfig) -> AtlassianClient {
  create_atlassian_client(&config.confluence_url, &config.email, &config.api_token)
}

/// Creates a tokio runtime and an authenticated Jira client
pub fn create_jira_runtime_and_client(config: &AuditConfig) -> Result<(Runtime, AtlassianClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  Ok((rt, create_jira_client(config)))
}

/// Creates a tokio runtime and an authenticated Confluence client
pub fn create_confluence_runtime_and_client(config: &AuditConfig) -> Result<(Runtime, AtlassianClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  Ok((rt, create_confluence_client(config)))
}
