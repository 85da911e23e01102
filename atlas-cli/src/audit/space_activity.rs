//! # Space Activity
//!
//! Lists every global Confluence space, looks up its most recently modified
//! page and orders the spaces newest first.

use atlas_client::{AtlassianClient, LatestPage, Space};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::error::{AuditError, classify_entity_error};
use super::progress::{ProgressEvent, ProgressObserver};

/// Outcome of looking up the latest page of a space
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup {
  Found(LatestPage),
  NoPages,
  Inaccessible { reason: String },
}

/// One row of the space activity report
#[derive(Debug, Clone)]
pub struct SpaceActivity {
  pub space: Space,
  pub lookup: PageLookup,
}

impl SpaceActivity {
  /// Space name, or `Unknown` when the listing had none
  pub fn space_name(&self) -> &str {
    if self.space.name.is_empty() {
      "Unknown"
    } else {
      &self.space.name
    }
  }

  pub fn last_updated(&self) -> Option<DateTime<Utc>> {
    match &self.lookup {
      PageLookup::Found(page) => page.last_updated,
      _ => None,
    }
  }

  /// Page title, or a placeholder describing why there is none
  pub fn page_title(&self) -> String {
    match &self.lookup {
      PageLookup::Found(page) => page.title.clone(),
      PageLookup::NoPages => "No pages".to_string(),
      PageLookup::Inaccessible { reason } => format!("No access ({reason})"),
    }
  }

  pub fn page_url(&self) -> &str {
    match &self.lookup {
      PageLookup::Found(page) => &page.url,
      _ => "",
    }
  }

  fn sort_key(&self) -> DateTime<Utc> {
    self.last_updated().unwrap_or(DateTime::<Utc>::MIN_UTC)
  }
}

/// Sort newest first. Rows without a timestamp go last, ties keep their order.
pub fn sort_by_activity(rows: &mut [SpaceActivity]) {
  rows.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

/// Build the space activity report
pub async fn run_space_activity(
  client: &AtlassianClient,
  page_size: u32,
  progress: &mut dyn ProgressObserver,
) -> Result<Vec<SpaceActivity>, AuditError> {
  progress.on_event(ProgressEvent::Fetching {
    what: "Confluence spaces",
  });
  let spaces = client
    .list_spaces(page_size)
    .await
    .map_err(|source| AuditError::Listing {
      what: "Confluence spaces",
      source,
    })?;
  progress.on_event(ProgressEvent::Listed {
    what: "spaces",
    count: spaces.len(),
  });

  let mut rows = Vec::with_capacity(spaces.len());
  for space in spaces {
    let label = format!("{} ({})", space.name, space.key);
    progress.on_event(ProgressEvent::Started { name: label.clone() });

    let lookup = if space.key.is_empty() {
      debug!(name = %space.name, "Space has no key, not searching");
      PageLookup::NoPages
    } else {
      match client.latest_page_in_space(&space.key).await {
        Ok(Some(page)) => PageLookup::Found(page),
        Ok(None) => PageLookup::NoPages,
        Err(err) => {
          let err = classify_entity_error(format!("space {}", space.key), err)?;
          let reason = err.reason();
          progress.on_event(ProgressEvent::Skipped {
            name: label,
            reason: reason.clone(),
          });
          PageLookup::Inaccessible { reason }
        }
      }
    };

    rows.push(SpaceActivity { space, lookup });
  }

  sort_by_activity(&mut rows);
  progress.on_event(ProgressEvent::Finished { rows: rows.len() });
  Ok(rows)
}

#[cfg(test)]
mod tests {
  use atlas_client::create_atlassian_client;
  use atlas_test_utils::fixtures;
  use chrono::TimeZone;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::audit::progress::RecordingProgress;

  fn row(key: &str, last_updated: Option<DateTime<Utc>>) -> SpaceActivity {
    SpaceActivity {
      space: Space {
        key: key.to_string(),
        name: key.to_string(),
      },
      lookup: match last_updated {
        Some(when) => PageLookup::Found(LatestPage {
          title: format!("{key} page"),
          url: String::new(),
          last_updated: Some(when),
        }),
        None => PageLookup::NoPages,
      },
    }
  }

  fn keys(rows: &[SpaceActivity]) -> Vec<&str> {
    rows.iter().map(|r| r.space.key.as_str()).collect()
  }

  #[test]
  fn test_missing_timestamps_sort_last() {
    let mut rows = vec![
      row("A", None),
      row("B", Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())),
      row("C", Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())),
    ];

    sort_by_activity(&mut rows);
    assert_eq!(keys(&rows), vec!["B", "C", "A"]);
  }

  #[test]
  fn test_sort_is_stable_for_ties() {
    let when = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let mut rows = vec![row("X", None), row("Y", Some(when)), row("Z", Some(when)), row("W", None)];

    sort_by_activity(&mut rows);
    assert_eq!(keys(&rows), vec!["Y", "Z", "X", "W"]);
  }

  #[test]
  fn test_placeholders() {
    let mut inaccessible = row("A", None);
    inaccessible.lookup = PageLookup::Inaccessible {
      reason: "HTTP 403".to_string(),
    };
    assert_eq!(inaccessible.page_title(), "No access (HTTP 403)");
    assert_eq!(inaccessible.page_url(), "");

    assert_eq!(row("B", None).page_title(), "No pages");

    let mut unnamed = row("C", None);
    unnamed.space.name.clear();
    assert_eq!(unnamed.space_name(), "Unknown");
  }

  #[tokio::test]
  async fn test_run_space_activity_keeps_every_space() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_atlassian_client(&format!("{}/wiki", mock_server.uri()), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/wiki/rest/api/space"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::cursor_page(
        vec![
          fixtures::space("OLD", "Archive"),
          fixtures::space("NEW", "Engineering"),
          fixtures::space("SEC", "Secret"),
          fixtures::space("", "Keyless"),
        ],
        None,
      )))
      .mount(&mock_server)
      .await;

    let search = |key: &str| {
      Mock::given(method("GET"))
        .and(path("/wiki/rest/api/content/search"))
        .and(query_param("cql", atlas_client::latest_pages_cql(key)))
    };

    search("OLD")
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::content_search(vec![
        fixtures::content_page("Old notes", "2023-02-01T09:00:00.000Z", "/spaces/OLD/pages/1"),
      ])))
      .mount(&mock_server)
      .await;

    search("NEW")
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::content_search(vec![
        fixtures::content_page("Roadmap", "2024-08-15T10:30:00.000Z", "/spaces/NEW/pages/2"),
      ])))
      .mount(&mock_server)
      .await;

    search("SEC")
      .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
      .mount(&mock_server)
      .await;

    let mut progress = RecordingProgress::default();
    let rows = run_space_activity(&client, 100, &mut progress).await?;

    assert_eq!(keys(&rows), vec!["NEW", "OLD", "SEC", ""]);
    assert_eq!(rows[0].page_title(), "Roadmap");
    assert_eq!(
      rows[0].page_url(),
      format!("{}/wiki/spaces/NEW/pages/2", mock_server.uri())
    );
    assert_eq!(
      rows[2].lookup,
      PageLookup::Inaccessible {
        reason: "HTTP 403".to_string()
      }
    );
    assert_eq!(rows[3].lookup, PageLookup::NoPages);
    assert_eq!(progress.skipped(), vec!["Secret (SEC)"]);
    assert!(progress.events.contains(&ProgressEvent::Finished { rows: 4 }));

    Ok(())
  }

  #[tokio::test]
  async fn test_space_listing_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let client = create_atlassian_client(&format!("{}/wiki", mock_server.uri()), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/wiki/rest/api/space"))
      .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
      .mount(&mock_server)
      .await;

    let err = run_space_activity(&client, 100, &mut RecordingProgress::default())
      .await
      .unwrap_err();

    assert!(matches!(err, AuditError::Listing { what: "Confluence spaces", .. }));
  }
}
