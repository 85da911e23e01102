//! # Pagination
//!
//! Atlassian listings come in two flavours:
//!
//! - **Cursor links** (Confluence): each page carries `_links.next`, a path
//!   relative to the Confluence base URL. Fetching stops when it is absent.
//! - **Offsets** (Jira): each page carries `startAt`, `values` and `isLast`.
//!   The next `startAt` is advanced by the number of items actually received,
//!   since servers may cap the page size below what was requested.
//!
//! Both collectors return every item in listing order and abort on the first
//! failed page.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};
use url::Url;

use crate::client::AtlassianClient;
use crate::error::ApiError;

/// One page of a cursor-linked listing
#[derive(Debug, Deserialize)]
pub struct CursorPage<T> {
  #[serde(default = "Vec::new")]
  pub results: Vec<T>,
  #[serde(rename = "_links", default)]
  pub links: PageLinks,
}

/// Navigation links attached to a cursor page
#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
  pub next: Option<String>,
}

/// One page of an offset listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<T> {
  #[serde(default)]
  pub start_at: u64,
  #[serde(default)]
  pub is_last: Option<bool>,
  #[serde(default = "Vec::new")]
  pub values: Vec<T>,
}

/// Offset bookkeeping for `startAt`/`maxResults` listings.
///
/// A listing is finished once the server says `isLast`, returns nothing, or
/// returns a short page. The short-page rule keeps a server that never sets
/// `isLast` from looping forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetCursor {
  start_at: u64,
  page_size: u64,
  done: bool,
}

impl OffsetCursor {
  /// Start a listing at offset zero. A page size of zero is treated as one.
  pub fn new(page_size: u64) -> Self {
    Self {
      start_at: 0,
      page_size: page_size.max(1),
      done: false,
    }
  }

  /// Offset to request next
  pub const fn start_at(&self) -> u64 {
    self.start_at
  }

  /// Requested page size
  pub const fn page_size(&self) -> u64 {
    self.page_size
  }

  /// Whether the listing is exhausted
  pub const fn is_done(&self) -> bool {
    self.done
  }

  /// Record a received page
  pub fn advance(&mut self, received: usize, is_last: Option<bool>) {
    let received = received as u64;
    self.start_at += received;

    if is_last == Some(true) || received == 0 || received < self.page_size {
      self.done = true;
    }
  }
}

impl AtlassianClient {
  /// Collect every item of a cursor-linked listing.
  ///
  /// `path` and `query` describe the first page; later pages are fetched from
  /// the `_links.next` link resolved against the base URL.
  pub async fn get_all_cursor<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<Vec<T>, ApiError> {
    let mut items = Vec::new();
    let mut current = self.url(path);
    let mut page: CursorPage<T> = self.get_json(path, query).await?;

    loop {
      items.extend(page.results);
      trace!(url = %current, total = items.len(), "Fetched cursor page");

      let Some(next) = page.links.next else {
        break;
      };
      let Some(next_url) = self.resolve_link(&next) else {
        warn!(link = %next, "Ignoring next link outside of {}", self.base_url);
        break;
      };
      if next_url == current {
        warn!(url = %next_url, "Next link points at the current page, stopping");
        break;
      }

      page = self.get_json_url(&next_url).await?;
      current = next_url;
    }

    Ok(items)
  }

  /// Collect every item of an offset listing, `page_size` items at a time.
  pub async fn get_all_offset<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
    page_size: u64,
  ) -> Result<Vec<T>, ApiError> {
    let mut cursor = OffsetCursor::new(page_size);
    let mut items = Vec::new();

    while !cursor.is_done() {
      let mut params = query.to_vec();
      params.push(("startAt", cursor.start_at().to_string()));
      params.push(("maxResults", cursor.page_size().to_string()));

      let page: OffsetPage<T> = self.get_json(path, &params).await?;
      let received = page.values.len();
      items.extend(page.values);
      cursor.advance(received, page.is_last);

      trace!(
        path,
        start_at = page.start_at,
        received,
        total = items.len(),
        "Fetched offset page"
      );
    }

    Ok(items)
  }

  /// Resolve a pagination link against the base URL.
  ///
  /// Relative links are joined under the base path. The result is only
  /// returned when it keeps the base URL's scheme, host and port and stays
  /// under its path.
  pub(crate) fn resolve_link(&self, link: &str) -> Option<String> {
    let base = Url::parse(&format!("{}/", self.base_url)).ok()?;
    let resolved = match Url::parse(link) {
      Ok(absolute) => absolute,
      Err(url::ParseError::RelativeUrlWithoutBase) => base.join(link.trim_start_matches('/')).ok()?,
      Err(_) => return None,
    };

    let same_origin = resolved.scheme() == base.scheme()
      && resolved.host_str() == base.host_str()
      && resolved.port_or_known_default() == base.port_or_known_default();
    (same_origin && resolved.path().starts_with(base.path())).then(|| resolved.to_string())
  }
}
