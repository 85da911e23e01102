//! Constants for the atlas-audit CLI
//!
//! Default values used when neither a flag nor the config file sets them.

/// Spaces requested per page when listing Confluence spaces
pub const DEFAULT_SPACE_PAGE_SIZE: u32 = 100;

/// Projects requested per page when listing Jira projects
pub const DEFAULT_JIRA_PAGE_SIZE: u32 = 50;
