//! # Atlassian REST Client
//!
//! Provides Jira and Confluence REST API access for the audit reports:
//! authenticated requests, both pagination idioms used by Atlassian listings,
//! and typed models for spaces, content, permission schemes, projects, roles
//! and issue types.

mod client;
mod consts;
mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;

// Re-export the client
pub use client::{AtlassianClient, create_atlassian_client};
pub use endpoints::confluence::latest_pages_cql;
pub use endpoints::projects::role_id_from_url;
pub use error::ApiError;
// Re-export models
pub use models::{
  AtlassianAuth, CurrentUser, Holder, IssueType, LatestPage, PermissionGrant, PermissionScheme,
  PermissionSchemeSummary, ProjectDetail, ProjectRoleDetail, ProjectRoles, ProjectSummary, RoleActor, Space,
};
pub use pagination::OffsetCursor;
