//! # Issue-Type Usage
//!
//! Maps every issue type of the instance to the projects that declare it and
//! reports the ones no project uses.

use std::collections::{BTreeMap, BTreeSet};

use atlas_client::AtlassianClient;
use tracing::debug;

use super::error::{AuditError, classify_entity_error};
use super::progress::{ProgressEvent, ProgressObserver};

/// Result of the issue-type usage audit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTypeUsage {
  /// Every issue type name of the instance
  pub all_types: BTreeSet<String>,
  /// Issue type name to the keys of the projects declaring it
  pub used: BTreeMap<String, BTreeSet<String>>,
  /// Types no project uses, when every project could be inspected
  pub unused: Vec<String>,
  /// Types no inspected project uses, when some projects could not be
  /// inspected
  pub possibly_unused: Vec<String>,
  /// Keys of the projects whose issue types could not be read
  pub unverified_projects: Vec<String>,
}

impl IssueTypeUsage {
  /// Derive the unused sets from the collected usage
  pub fn new(
    all_types: BTreeSet<String>,
    used: BTreeMap<String, BTreeSet<String>>,
    unverified_projects: Vec<String>,
  ) -> Self {
    let never_seen: Vec<String> = all_types
      .iter()
      .filter(|name| !used.contains_key(*name))
      .cloned()
      .collect();

    let (unused, possibly_unused) = if unverified_projects.is_empty() {
      (never_seen, Vec::new())
    } else {
      (Vec::new(), never_seen)
    };

    Self {
      all_types,
      used,
      unused,
      possibly_unused,
      unverified_projects,
    }
  }

  /// Every issue type with the sorted keys of the projects using it
  pub fn mapping(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
    self.all_types.iter().map(|name| {
      let projects = self
        .used
        .get(name)
        .map(|keys| keys.iter().map(String::as_str).collect())
        .unwrap_or_default();
      (name.as_str(), projects)
    })
  }

  /// True when every issue type is used by at least one project
  pub fn all_used(&self) -> bool {
    self.unused.is_empty() && self.possibly_unused.is_empty()
  }
}

/// Build the issue-type usage report
pub async fn run_issue_type_usage(
  client: &AtlassianClient,
  page_size: u64,
  progress: &mut dyn ProgressObserver,
) -> Result<IssueTypeUsage, AuditError> {
  let me = client
    .current_user()
    .await
    .map_err(|source| AuditError::Connection { source })?;
  progress.on_event(ProgressEvent::Note(format!(
    "Connected as {}",
    me.display_name.as_deref().unwrap_or("Unknown User")
  )));

  progress.on_event(ProgressEvent::Fetching { what: "issue types" });
  let issue_types = client
    .list_issue_types()
    .await
    .map_err(|source| AuditError::Listing {
      what: "issue types",
      source,
    })?;
  let all_types: BTreeSet<String> = issue_types
    .into_iter()
    .map(|t| t.name)
    .filter(|name| !name.is_empty())
    .collect();
  progress.on_event(ProgressEvent::Listed {
    what: "issue types",
    count: all_types.len(),
  });

  progress.on_event(ProgressEvent::Fetching { what: "projects" });
  let projects = client
    .list_projects(page_size)
    .await
    .map_err(|source| AuditError::Listing {
      what: "projects",
      source,
    })?;
  progress.on_event(ProgressEvent::Listed {
    what: "projects",
    count: projects.len(),
  });

  let mut used: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
  let mut unverified = Vec::new();

  for project in &projects {
    if project.key.is_empty() {
      progress.on_event(ProgressEvent::Warning(format!(
        "Found a project with no key ({}), skipping",
        project.name
      )));
      continue;
    }

    progress.on_event(ProgressEvent::Started {
      name: format!("{} ({})", project.key, project.name),
    });

    let detail = match client.project(&project.key).await {
      Ok(detail) => detail,
      Err(err) => {
        let err = classify_entity_error(format!("project {}", project.key), err)?;
        let reason = if err.is_access_denied() {
          format!("no permission to view project ({})", err.reason())
        } else {
          err.reason()
        };
        progress.on_event(ProgressEvent::Skipped {
          name: project.key.clone(),
          reason,
        });
        unverified.push(project.key.clone());
        continue;
      }
    };

    let Some(names) = detail.issue_type_names() else {
      progress.on_event(ProgressEvent::Skipped {
        name: project.key.clone(),
        reason: "issue types could not be read".to_string(),
      });
      unverified.push(project.key.clone());
      continue;
    };

    debug!(project = %project.key, count = names.len(), "Read project issue types");
    for name in names {
      used
        .entry(name.to_string())
        .or_default()
        .insert(project.key.clone());
    }
  }

  let usage = IssueTypeUsage::new(all_types, used, unverified);
  progress.on_event(ProgressEvent::Finished {
    rows: usage.all_types.len(),
  });
  Ok(usage)
}
