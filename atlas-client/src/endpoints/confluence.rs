//! # Confluence Endpoints
//!
//! Space listing and content search against the Confluence REST API. The
//! client for these calls is bound to the Confluence base URL (usually the
//! site URL plus `/wiki`), since `_links` in Confluence responses are
//! relative to it.

use tracing::debug;

use crate::client::AtlassianClient;
use crate::consts::CONFLUENCE_API;
use crate::error::ApiError;
use crate::models::{ContentSearch, LatestPage, Space};

/// Title used when a page has none
const UNTITLED: &str = "No title";

/// CQL selecting the pages of one space, newest modification first
pub fn latest_pages_cql(space_key: &str) -> String {
  let escaped = space_key.replace('\\', "\\\\").replace('"', "\\\"");
  format!(r#"space="{escaped}" and type=page order by lastmodified desc"#)
}

impl AtlassianClient {
  /// List every global space, following `_links.next` until exhausted
  pub async fn list_spaces(&self, limit: u32) -> Result<Vec<Space>, ApiError> {
    let spaces: Vec<Space> = self
      .get_all_cursor(
        &format!("{CONFLUENCE_API}/space"),
        &[("limit", limit.to_string()), ("type", "global".to_string())],
      )
      .await?;

    debug!(count = spaces.len(), "Listed Confluence spaces");
    Ok(spaces)
  }

  /// Find the most recently modified page of a space.
  ///
  /// Returns `Ok(None)` when the space has no pages visible to the user.
  pub async fn latest_page_in_space(&self, space_key: &str) -> Result<Option<LatestPage>, ApiError> {
    let search: ContentSearch = self
      .get_json(
        &format!("{CONFLUENCE_API}/content/search"),
        &[
          ("cql", latest_pages_cql(space_key)),
          ("limit", "1".to_string()),
          ("expand", "version".to_string()),
        ],
      )
      .await?;

    let Some(page) = search.results.into_iter().next() else {
      return Ok(None);
    };

    let url = match page.links.webui.as_deref() {
      Some(webui) if !webui.is_empty() => self.url(webui),
      _ => String::new(),
    };

    Ok(Some(LatestPage {
      title: page
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string()),
      url,
      last_updated: page.version.and_then(|v| v.when),
    }))
  }
}
