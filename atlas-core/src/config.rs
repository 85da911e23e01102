//! # Configuration Management
//!
//! Resolves the site URL, Confluence URL, account email and API token from
//! CLI flags, the environment, an optional TOML config file and `.netrc`, and
//! validates them once before any request is made.
//!
//! Precedence, highest first: flags, environment, config file, `.netrc`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{
  APP_NAME, CONFIG_FILE_NAME, CONFLUENCE_PATH, ENV_API_TOKEN, ENV_CONFLUENCE_URL, ENV_EMAIL, ENV_SITE,
  ENV_SITE_LEGACY, PLACEHOLDER_API_TOKEN,
};
use crate::creds::netrc::{get_netrc_path, lookup_credentials};
use crate::url::{host_of, normalize_base_url};

/// Errors raised while building the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("No Atlassian site configured. Set {} or pass --site (e.g. https://your-site.atlassian.net)", ENV_SITE)]
  MissingSite,

  #[error("No account email configured. Set {} or pass --email, or add a .netrc entry for the site", ENV_EMAIL)]
  MissingEmail,

  #[error("No API token configured. Set {} or add a .netrc entry for the site", ENV_API_TOKEN)]
  MissingToken,

  #[error("The API token is still the placeholder '{}'. Set {} to a real API token", PLACEHOLDER_API_TOKEN, ENV_API_TOKEN)]
  PlaceholderToken,

  #[error("Invalid URL '{value}': {reason}")]
  InvalidUrl { value: String, reason: String },

  #[error("Failed to read config file {}", .path.display())]
  ReadFile {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse config file {}", .path.display())]
  ParseFile {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("Failed to read {}", .path.display())]
  Netrc {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub site: Option<String>,
  pub email: Option<String>,
  pub api_token: Option<String>,
  pub confluence_url: Option<String>,
  pub page_size: Option<u32>,
}

impl ConfigFile {
  /// Load a config file that must exist
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
      path: path.to_path_buf(),
      source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::ParseFile {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load a config file if it exists, otherwise return the defaults
  pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
    if path.exists() {
      Self::load(path)
    } else {
      debug!(path = %path.display(), "No config file, using defaults");
      Ok(Self::default())
    }
  }
}

/// Values passed explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub site: Option<String>,
  pub email: Option<String>,
  pub confluence_url: Option<String>,
}

/// Everything configuration is resolved from
pub struct ConfigSources<'a> {
  pub overrides: &'a ConfigOverrides,
  pub file: &'a ConfigFile,
  pub env: &'a dyn Fn(&str) -> Option<String>,
  /// Home directory holding `.netrc`, if known
  pub home: Option<&'a Path>,
}

/// Validated configuration for one run
#[derive(Clone)]
pub struct AuditConfig {
  /// Jira base URL, e.g. `https://acme.atlassian.net`
  pub site_url: String,
  /// Confluence base URL, e.g. `https://acme.atlassian.net/wiki`
  pub confluence_url: String,
  pub email: String,
  pub api_token: String,
  /// Page size from the config file, if set
  pub page_size: Option<u32>,
}

impl std::fmt::Debug for AuditConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AuditConfig")
      .field("site_url", &self.site_url)
      .field("confluence_url", &self.confluence_url)
      .field("email", &self.email)
      .field("api_token", &"<redacted>")
      .field("page_size", &self.page_size)
      .finish()
  }
}

/// First non-blank value
fn first_set<I>(candidates: I) -> Option<String>
where
  I: IntoIterator<Item = Option<String>>,
{
  candidates
    .into_iter()
    .flatten()
    .map(|v| v.trim().to_string())
    .find(|v| !v.is_empty())
}

impl AuditConfig {
  /// Resolve and validate the configuration from explicit sources.
  pub fn resolve(sources: ConfigSources<'_>) -> Result<Self, ConfigError> {
    let ConfigSources {
      overrides,
      file,
      env,
      home,
    } = sources;

    let site = first_set([
      overrides.site.clone(),
      env(ENV_SITE),
      env(ENV_SITE_LEGACY),
      file.site.clone(),
    ])
    .ok_or(ConfigError::MissingSite)?;
    let site_url = normalize_base_url(&site)?;

    let confluence_url = match first_set([
      overrides.confluence_url.clone(),
      env(ENV_CONFLUENCE_URL),
      file.confluence_url.clone(),
    ]) {
      Some(url) => normalize_base_url(&url)?,
      None => format!("{site_url}/{CONFLUENCE_PATH}"),
    };

    let mut email = first_set([overrides.email.clone(), env(ENV_EMAIL), file.email.clone()]);
    let mut api_token = first_set([env(ENV_API_TOKEN), file.api_token.clone()]);

    if (email.is_none() || api_token.is_none())
      && let (Some(home), Some(host)) = (home, host_of(&site_url))
    {
      let netrc = lookup_credentials(home, &host).map_err(|source| ConfigError::Netrc {
        path: get_netrc_path(home),
        source,
      })?;
      if let Some(creds) = netrc {
        email = email.or(Some(creds.username));
        api_token = api_token.or(Some(creds.password));
      }
    }

    let config = Self {
      site_url,
      confluence_url,
      email: email.ok_or(ConfigError::MissingEmail)?,
      api_token: api_token.ok_or(ConfigError::MissingToken)?,
      page_size: file.page_size,
    };
    config.validate()?;

    debug!(?config, "Resolved configuration");
    Ok(config)
  }

  /// Resolve from the process environment, the config file (explicit path
  /// or the default location) and `~/.netrc`.
  pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>) -> Result<Self, ConfigError> {
    let file = match config_path {
      Some(path) => ConfigFile::load(path)?,
      None => match default_config_path() {
        Some(path) => ConfigFile::load_optional(&path)?,
        None => ConfigFile::default(),
      },
    };

    let base_dirs = BaseDirs::new();
    let env = |name: &str| std::env::var(name).ok();

    Self::resolve(ConfigSources {
      overrides,
      file: &file,
      env: &env,
      home: base_dirs.as_ref().map(BaseDirs::home_dir),
    })
  }

  /// Check the resolved values before any request is made
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.email.trim().is_empty() {
      return Err(ConfigError::MissingEmail);
    }

    let token = self.api_token.trim();
    if token.is_empty() {
      return Err(ConfigError::MissingToken);
    }
    if token.eq_ignore_ascii_case(PLACEHOLDER_API_TOKEN) {
      return Err(ConfigError::PlaceholderToken);
    }

    Ok(())
  }
}

/// Default location of `config.toml`, if a config directory can be determined
pub fn default_config_path() -> Option<PathBuf> {
  ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
