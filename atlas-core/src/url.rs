//! URL helpers for the configured Atlassian site.
//!
//! Users paste site URLs in every shape (`acme.atlassian.net`,
//! `https://acme.atlassian.net/`, `http:/acme.atlassian.net`); these helpers
//! turn them into a base URL the client can append REST paths to.

use url::Url;

use crate::config::ConfigError;

/// Parse a URL by prefixing it with the https:// scheme.
fn parse_with_https_prefix(input: &str) -> Option<Url> {
  let mut candidate = input;

  if let Some(colon_index) = input.find(':') {
    let potential_scheme = &input[..colon_index];
    if ["http", "https"]
      .iter()
      .any(|scheme| potential_scheme.eq_ignore_ascii_case(scheme))
    {
      let remainder = input[colon_index + 1..].trim_start_matches('/');
      if !remainder.is_empty() {
        candidate = remainder;
      }
    }
  }

  Url::parse(&format!("https://{candidate}")).ok()
}

/// Normalize a site or Confluence URL into a base URL.
///
/// Adds `https://` when no scheme is given, repairs malformed schemes like
/// `http:/example.com`, and drops the query, fragment and trailing slash.
pub fn normalize_base_url(input: &str) -> Result<String, ConfigError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(ConfigError::InvalidUrl {
      value: input.to_string(),
      reason: "URL cannot be empty".to_string(),
    });
  }

  let lowered = trimmed.to_ascii_lowercase();
  let parsed = if lowered.starts_with("http://") || lowered.starts_with("https://") {
    Url::parse(trimmed).ok()
  } else if lowered.starts_with("http:") {
    // Keep plain http when the user asked for it, just repair the slashes
    let remainder = trimmed.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    Url::parse(&format!("http://{}", remainder.trim_start_matches('/'))).ok()
  } else {
    parse_with_https_prefix(trimmed)
  };

  let Some(mut url) = parsed.filter(|url| url.host().is_some()) else {
    return Err(ConfigError::InvalidUrl {
      value: input.to_string(),
      reason: "expected a host such as https://your-site.atlassian.net".to_string(),
    });
  };

  url.set_query(None);
  url.set_fragment(None);

  Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Host (and port, if any) of a base URL, used to look up `.netrc` entries.
pub fn host_of(base_url: &str) -> Option<String> {
  let url = Url::parse(base_url).ok()?;
  let host = url.host_str()?;
  Some(match url.port() {
    Some(port) => format!("{host}:{port}"),
    None => host.to_string(),
  })
}
