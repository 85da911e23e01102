//! Constants shared across the atlas-audit crates.

/// Application name, used for the config directory
pub const APP_NAME: &str = "atlas-audit";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding the Atlassian site URL
pub const ENV_SITE: &str = "ATLASSIAN_SITE";

/// Older environment variable name for the site URL, still honored
pub const ENV_SITE_LEGACY: &str = "JIRA_URL";

/// Environment variable holding the account email
pub const ENV_EMAIL: &str = "ATLASSIAN_EMAIL";

/// Environment variable holding the API token
pub const ENV_API_TOKEN: &str = "ATLASSIAN_API_TOKEN";

/// Environment variable overriding the Confluence base URL
pub const ENV_CONFLUENCE_URL: &str = "CONFLUENCE_URL";

/// Token value shipped in sample configs; never a real token
pub const PLACEHOLDER_API_TOKEN: &str = "YOUR_API_TOKEN_HERE";

/// Catch-all `.netrc` machine for Atlassian Cloud sites
pub const NETRC_FALLBACK_MACHINE: &str = "atlassian.net";

/// Path of Confluence under a Cloud site
pub const CONFLUENCE_PATH: &str = "wiki";
