//! # Credential Management
//!
//! Credentials for the Atlassian site: an account email and an API token.
//! Besides the environment and CLI flags, credentials can be read from a
//! `.netrc` entry for the site host (or the catch-all `atlassian.net`).

pub mod netrc;

/// Represents credentials for a service
#[derive(Clone)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}
