//! # Atlassian API Endpoints
//!
//! Endpoint implementations grouped by resource: Confluence spaces and
//! content, Jira permission schemes, projects and roles, issue types, and the
//! current user.

pub mod confluence;
pub mod issue_types;
pub mod myself;
pub mod permissions;
pub mod projects;
