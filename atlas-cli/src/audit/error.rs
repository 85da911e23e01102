//! Error categories for the audit pipelines.
//!
//! [`AuditError`] aborts a run. [`EntityError`] is scoped to a single space,
//! scheme, project or role and ends up as a placeholder row in the report.

use std::io;
use std::path::PathBuf;

use atlas_client::ApiError;
use atlas_core::ConfigError;
use thiserror::Error;

/// Failure that stops an audit run
#[derive(Debug, Error)]
pub enum AuditError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// A top-level listing could not be fetched
  #[error("Failed to list {what}")]
  Listing {
    what: &'static str,
    #[source]
    source: ApiError,
  },

  /// The connectivity probe was rejected
  #[error("Could not connect to the Atlassian site. Check the site URL, email and API token")]
  Connection {
    #[source]
    source: ApiError,
  },

  /// The site stopped responding while enriching an entity
  #[error("Lost connection while reading {entity}")]
  Transport {
    entity: String,
    #[source]
    source: ApiError,
  },

  #[error("Failed to write {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write CSV report {}", .path.display())]
  Csv {
    path: PathBuf,
    #[source]
    source: csv::Error,
  },
}

/// Request failure scoped to one entity
#[derive(Debug, Error)]
#[error("Could not read {entity}")]
pub struct EntityError {
  pub entity: String,
  #[source]
  pub source: ApiError,
}

impl EntityError {
  /// Short reason used in report placeholders, e.g. `HTTP 403`
  pub fn reason(&self) -> String {
    match &self.source {
      ApiError::Status { status, .. } => format!("HTTP {}", status.as_u16()),
      ApiError::Decode { .. } => "unreadable response".to_string(),
      ApiError::Transport { .. } => "no response".to_string(),
    }
  }

  /// Whether the failure was a 401/403
  pub fn is_access_denied(&self) -> bool {
    self.source.is_access_denied()
  }
}

/// Split a failed enrichment request into fatal and per-entity failures.
///
/// Transport failures mean the site is unreachable, so continuing would only
/// produce a report full of placeholders. Everything else is confined to the
/// entity that triggered it.
pub fn classify_entity_error(entity: impl Into<String>, error: ApiError) -> Result<EntityError, AuditError> {
  let entity = entity.into();
  if error.is_transport() {
    Err(AuditError::Transport { entity, source: error })
  } else {
    Ok(EntityError { entity, source: error })
  }
}
