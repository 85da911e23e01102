//! # Permission Audit
//!
//! Flattens every permission scheme's grants and every project's role
//! membership into one list of rows. Every scheme and project contributes at
//! least one row, with a placeholder when it could not be read or was empty.

use atlas_client::{AtlassianClient, PermissionScheme, ProjectSummary, role_id_from_url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AuditError, classify_entity_error};
use super::progress::{ProgressEvent, ProgressObserver};

pub const NO_ACCESS: &str = "(no access)";
pub const EMPTY_ROLE: &str = "(empty)";
pub const NO_GRANTS: &str = "(no grants)";
pub const NO_ROLES: &str = "(no roles)";

/// Where a row's grant applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scope {
  Global,
  Project,
}

impl std::fmt::Display for Scope {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Scope::Global => f.write_str("GLOBAL"),
      Scope::Project => f.write_str("PROJECT"),
    }
  }
}

/// One row of the permission audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRow {
  #[serde(rename = "Scope")]
  pub scope: Scope,
  /// Scheme name, or `<project name> (<key>)`
  #[serde(rename = "Project/Scheme")]
  pub target: String,
  /// Permission key or role name
  #[serde(rename = "Permission/Role")]
  pub permission: String,
  /// User or group description
  #[serde(rename = "User/Group")]
  pub holder: String,
}

impl PermissionRow {
  fn new(scope: Scope, target: &str, permission: &str, holder: &str) -> Self {
    Self {
      scope,
      target: target.to_string(),
      permission: permission.to_string(),
      holder: holder.to_string(),
    }
  }
}

/// Label used for a project in the report
pub fn project_label(project: &ProjectSummary) -> String {
  format!("{} ({})", project.name, project.key)
}

/// Rows for one permission scheme
pub fn scheme_rows(scheme: &PermissionScheme) -> Vec<PermissionRow> {
  let mut rows: Vec<PermissionRow> = scheme
    .permissions
    .iter()
    .flat_map(|grant| {
      grant
        .holders()
        .into_iter()
        .map(|holder| PermissionRow::new(Scope::Global, &scheme.name, &grant.permission, &holder.describe()))
    })
    .collect();

  if rows.is_empty() {
    rows.push(PermissionRow::new(Scope::Global, &scheme.name, NO_GRANTS, ""));
  }
  rows
}

/// Rows for one project role; an empty role still yields a row
pub fn role_rows(label: &str, role_name: &str, members: &[String]) -> Vec<PermissionRow> {
  if members.is_empty() {
    return vec![PermissionRow::new(Scope::Project, label, role_name, EMPTY_ROLE)];
  }

  members
    .iter()
    .map(|member| PermissionRow::new(Scope::Project, label, role_name, member))
    .collect()
}

/// Build the permission audit
pub async fn run_permission_audit(
  client: &AtlassianClient,
  page_size: u64,
  progress: &mut dyn ProgressObserver,
) -> Result<Vec<PermissionRow>, AuditError> {
  let mut rows = global_permission_rows(client, progress).await?;
  rows.extend(project_permission_rows(client, page_size, progress).await?);

  progress.on_event(ProgressEvent::Finished { rows: rows.len() });
  Ok(rows)
}

async fn global_permission_rows(
  client: &AtlassianClient,
  progress: &mut dyn ProgressObserver,
) -> Result<Vec<PermissionRow>, AuditError> {
  progress.on_event(ProgressEvent::Fetching {
    what: "permission schemes",
  });
  let schemes = client
    .list_permission_schemes()
    .await
    .map_err(|source| AuditError::Listing {
      what: "permission schemes",
      source,
    })?;
  progress.on_event(ProgressEvent::Listed {
    what: "permission schemes",
    count: schemes.len(),
  });

  let mut rows = Vec::new();
  for summary in schemes {
    progress.on_event(ProgressEvent::Started {
      name: summary.name.clone(),
    });

    match client.permission_scheme(summary.id).await {
      Ok(scheme) => rows.extend(scheme_rows(&scheme)),
      Err(err) => {
        let err = classify_entity_error(format!("permission scheme {}", summary.name), err)?;
        let reason = err.reason();
        progress.on_event(ProgressEvent::Skipped {
          name: summary.name.clone(),
          reason: reason.clone(),
        });
        rows.push(PermissionRow::new(Scope::Global, &summary.name, NO_ACCESS, &reason));
      }
    }
  }

  Ok(rows)
}

async fn project_permission_rows(
  client: &AtlassianClient,
  page_size: u64,
  progress: &mut dyn ProgressObserver,
) -> Result<Vec<PermissionRow>, AuditError> {
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

  let mut rows = Vec::new();
  for project in &projects {
    let label = project_label(project);
    progress.on_event(ProgressEvent::Started { name: label.clone() });
    rows.extend(single_project_rows(client, project, &label, progress).await?);
  }

  Ok(rows)
}

async fn single_project_rows(
  client: &AtlassianClient,
  project: &ProjectSummary,
  label: &str,
  progress: &mut dyn ProgressObserver,
) -> Result<Vec<PermissionRow>, AuditError> {
  if project.key.is_empty() {
    progress.on_event(ProgressEvent::Skipped {
      name: label.to_string(),
      reason: "project has no key".to_string(),
    });
    return Ok(vec![PermissionRow::new(Scope::Project, label, NO_ACCESS, "project has no key")]);
  }

  let roles = match client.project_roles(&project.key).await {
    Ok(roles) => roles,
    Err(err) => {
      let err = classify_entity_error(format!("roles of {}", project.key), err)?;
      let reason = err.reason();
      progress.on_event(ProgressEvent::Skipped {
        name: label.to_string(),
        reason: reason.clone(),
      });
      return Ok(vec![PermissionRow::new(Scope::Project, label, NO_ACCESS, &reason)]);
    }
  };

  if roles.is_empty() {
    return Ok(vec![PermissionRow::new(Scope::Project, label, NO_ROLES, "")]);
  }

  let mut rows = Vec::new();
  for (role_name, role_url) in roles.iter() {
    let Some(role_id) = role_id_from_url(role_url) else {
      progress.on_event(ProgressEvent::Warning(format!(
        "Unrecognized role URL for {role_name} in {}: {role_url}",
        project.key
      )));
      rows.push(PermissionRow::new(Scope::Project, label, role_name, NO_ACCESS));
      continue;
    };

    match client.project_role(&project.key, role_id).await {
      Ok(role) => {
        let members = role.members();
        debug!(project = %project.key, role = %role_name, members = members.len(), "Read role");
        rows.extend(role_rows(label, role_name, &members));
      }
      Err(err) => {
        let err = classify_entity_error(format!("role {role_name} of {}", project.key), err)?;
        progress.on_event(ProgressEvent::Skipped {
          name: format!("{label} / {role_name}"),
          reason: err.reason(),
        });
        rows.push(PermissionRow::new(Scope::Project, label, role_name, NO_ACCESS));
      }
    }
  }

  Ok(rows)
}
