//! Constants for the atlas-client.

/// User-Agent header value for the Atlassian API client
pub const USER_AGENT: &str = concat!("atlas-audit/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Jira REST API prefix
pub const JIRA_API: &str = "rest/api/3";

/// Confluence REST API prefix, relative to the Confluence base URL
pub const CONFLUENCE_API: &str = "rest/api";
