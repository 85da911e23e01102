//! Errors returned by the Atlassian client.
//!
//! Every variant carries the URL that failed so callers can report which
//! endpoint broke without threading extra context around.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single request against the Atlassian REST API
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request never produced a response (DNS, TLS, connect, timeout)
  #[error("Request to {url} failed")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// The server answered with a non-success status
  #[error("HTTP {status} from {url}: {message}")]
  Status {
    url: String,
    status: StatusCode,
    message: String,
  },

  /// The server answered successfully but the body could not be decoded
  #[error("Failed to parse response from {url}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
}

/// Standard Jira error body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
  #[serde(default)]
  error_messages: Vec<String>,
}

impl ApiError {
  /// Build a status error, preferring Jira's `errorMessages` over the raw body
  pub fn status(url: &str, status: StatusCode, body: &str) -> Self {
    let message = match serde_json::from_str::<ErrorBody>(body) {
      Ok(parsed) if !parsed.error_messages.is_empty() => parsed.error_messages.join(", "),
      _ => body.trim().to_string(),
    };

    ApiError::Status {
      url: url.to_string(),
      status,
      message,
    }
  }

  /// The URL the failing request was sent to
  pub fn url(&self) -> &str {
    match self {
      ApiError::Transport { url, .. } | ApiError::Status { url, .. } | ApiError::Decode { url, .. } => url,
    }
  }

  /// HTTP status of the failure, if the server responded
  pub const fn status_code(&self) -> Option<StatusCode> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// True for 401 and 403 responses
  pub fn is_access_denied(&self) -> bool {
    matches!(
      self.status_code(),
      Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
    )
  }

  /// True when no response was received at all
  pub const fn is_transport(&self) -> bool {
    matches!(self, ApiError::Transport { .. })
  }
}
