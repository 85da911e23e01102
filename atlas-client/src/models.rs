use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Represents Atlassian authentication credentials (account email + API token)
#[derive(Clone)]
pub struct AtlassianAuth {
  pub username: String,
  pub api_token: String,
}

impl std::fmt::Debug for AtlassianAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AtlassianAuth")
      .field("username", &self.username)
      .field("api_token", &"<redacted>")
      .finish()
  }
}

/// Treat empty strings the way missing values are treated
fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

/// The authenticated account, from `/myself`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
  pub account_id: Option<String>,
  pub display_name: Option<String>,
  pub email_address: Option<String>,
}

// ---------------------------------------------------------------------------
// Confluence
// ---------------------------------------------------------------------------

/// Represents a Confluence space
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub name: String,
}

/// Result of a content search
#[derive(Debug, Deserialize)]
pub(crate) struct ContentSearch {
  #[serde(default)]
  pub results: Vec<ContentItem>,
}

/// A single content search hit
#[derive(Debug, Deserialize)]
pub(crate) struct ContentItem {
  pub title: Option<String>,
  pub version: Option<ContentVersion>,
  #[serde(rename = "_links", default)]
  pub links: ContentLinks,
}

/// Version metadata of a content item
#[derive(Debug, Deserialize)]
pub(crate) struct ContentVersion {
  pub when: Option<DateTime<Utc>>,
}

/// Links attached to a content item
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContentLinks {
  pub webui: Option<String>,
}

/// The most recently modified page of a space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestPage {
  pub title: String,
  pub url: String,
  pub last_updated: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Jira permission schemes
// ---------------------------------------------------------------------------

/// Listing of permission schemes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PermissionSchemeList {
  #[serde(default, alias = "values")]
  pub permission_schemes: Vec<PermissionSchemeSummary>,
}

/// Represents a permission scheme in a listing
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionSchemeSummary {
  pub id: u64,
  pub name: String,
}

/// Represents a permission scheme with its grants
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionScheme {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub permissions: Vec<PermissionGrant>,
}

/// A permission granted to one holder (or, on some servers, a list of them)
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionGrant {
  pub permission: String,
  holder: Option<Holder>,
  holders: Option<Vec<Holder>>,
}

impl PermissionGrant {
  /// Holders of this grant: the `holders` list when present, otherwise the
  /// single `holder`, otherwise none.
  pub fn holders(&self) -> Vec<&Holder> {
    match (&self.holders, &self.holder) {
      (Some(holders), _) => holders.iter().collect(),
      (None, Some(holder)) => vec![holder],
      (None, None) => Vec::new(),
    }
  }
}

/// A named entity nested inside a holder or actor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamedEntity {
  display_name: Option<String>,
  name: Option<String>,
}

impl NamedEntity {
  fn label(&self) -> Option<String> {
    non_empty(self.display_name.as_deref())
      .or(non_empty(self.name.as_deref()))
      .map(str::to_string)
  }
}

/// Holder as it appears on the wire
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHolder {
  #[serde(rename = "type", default)]
  kind: String,
  parameter: Option<String>,
  display_name: Option<String>,
  user: Option<NamedEntity>,
  group: Option<NamedEntity>,
  project_role: Option<NamedEntity>,
}

/// Who a permission is granted to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawHolder")]
pub enum Holder {
  User {
    display_name: Option<String>,
    parameter: Option<String>,
  },
  Group {
    name: Option<String>,
    parameter: Option<String>,
  },
  ProjectRole {
    name: Option<String>,
    parameter: Option<String>,
  },
  /// Any other holder type (`anyone`, `reporter`, `applicationRole`, ...)
  Other {
    kind: String,
    display_name: Option<String>,
    parameter: Option<String>,
  },
}

impl From<RawHolder> for Holder {
  fn from(raw: RawHolder) -> Self {
    let top_level = non_empty(raw.display_name.as_deref()).map(str::to_string);
    let nested = |entity: &Option<NamedEntity>| entity.as_ref().and_then(NamedEntity::label);
    let parameter = non_empty(raw.parameter.as_deref()).map(str::to_string);

    match raw.kind.as_str() {
      "user" => Holder::User {
        display_name: top_level.or_else(|| nested(&raw.user)),
        parameter,
      },
      "group" => Holder::Group {
        name: top_level.or_else(|| nested(&raw.group)),
        parameter,
      },
      "projectRole" => Holder::ProjectRole {
        name: top_level.or_else(|| nested(&raw.project_role)),
        parameter,
      },
      _ => Holder::Other {
        kind: raw.kind,
        display_name: top_level,
        parameter,
      },
    }
  }
}

impl Holder {
  /// The holder's `type` tag
  pub fn kind(&self) -> &str {
    match self {
      Holder::User { .. } => "user",
      Holder::Group { .. } => "group",
      Holder::ProjectRole { .. } => "projectRole",
      Holder::Other { kind, .. } if kind.is_empty() => "unknown",
      Holder::Other { kind, .. } => kind,
    }
  }

  /// Human-readable description: display name, then parameter, then type
  pub fn describe(&self) -> String {
    let (label, parameter) = match self {
      Holder::User {
        display_name,
        parameter,
      } => (display_name, parameter),
      Holder::Group { name, parameter } | Holder::ProjectRole { name, parameter } => (name, parameter),
      Holder::Other {
        display_name,
        parameter,
        ..
      } => (display_name, parameter),
    };

    label
      .as_deref()
      .or(parameter.as_deref())
      .unwrap_or_else(|| self.kind())
      .to_string()
  }
}

// ---------------------------------------------------------------------------
// Jira projects and roles
// ---------------------------------------------------------------------------

/// Represents a project in a listing
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSummary {
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub name: String,
}

/// Represents a project with its configured issue types
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub name: String,
  /// `None` when the response did not include issue types at all
  pub issue_types: Option<Vec<IssueTypeRef>>,
}

impl ProjectDetail {
  /// Names of the issue types this project declares, if readable
  pub fn issue_type_names(&self) -> Option<Vec<&str>> {
    self
      .issue_types
      .as_ref()
      .map(|types| types.iter().filter_map(|t| non_empty(t.name.as_deref())).collect())
  }
}

/// Reference to an issue type inside a project
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTypeRef {
  pub id: Option<String>,
  pub name: Option<String>,
}

/// Represents an issue type of the instance
#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
  pub id: Option<String>,
  pub name: String,
  #[serde(default)]
  pub subtask: bool,
}

/// Role name to role URL pairs from `/project/{key}/role`, in response order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRoles(Vec<(String, String)>);

impl ProjectRoles {
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// `(name, url)` pairs in the order the server listed them
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(name, url)| (name.as_str(), url.as_str()))
  }

  /// URL of the role called `name`
  pub fn get(&self, name: &str) -> Option<&str> {
    self.iter().find(|(role, _)| *role == name).map(|(_, url)| url)
  }
}

impl<'de> Deserialize<'de> for ProjectRoles {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct RolesVisitor;

    impl<'de> Visitor<'de> for RolesVisitor {
      type Value = ProjectRoles;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of role names to role URLs")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut roles = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, url)) = map.next_entry::<String, String>()? {
          roles.push((name, url));
        }
        Ok(ProjectRoles(roles))
      }
    }

    deserializer.deserialize_map(RolesVisitor)
  }
}

/// Represents a project role with its actors
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRoleDetail {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub actors: Vec<RoleActor>,
}

impl ProjectRoleDetail {
  /// Member descriptions in API order
  pub fn members(&self) -> Vec<String> {
    self.actors.iter().map(RoleActor::describe).collect()
  }
}

/// Role actor as it appears on the wire
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActor {
  #[serde(rename = "type", default)]
  kind: String,
  display_name: Option<String>,
  name: Option<String>,
  actor_user: Option<ActorUser>,
  actor_group: Option<NamedEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActorUser {
  account_id: Option<String>,
}

/// A user or group assigned to a project role
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawActor")]
pub enum RoleActor {
  User {
    display_name: Option<String>,
    name: Option<String>,
    account_id: Option<String>,
  },
  Group {
    display_name: Option<String>,
    name: Option<String>,
  },
  Other {
    kind: String,
    display_name: Option<String>,
    name: Option<String>,
  },
}

impl From<RawActor> for RoleActor {
  fn from(raw: RawActor) -> Self {
    let display_name = non_empty(raw.display_name.as_deref()).map(str::to_string);
    let name = non_empty(raw.name.as_deref()).map(str::to_string);

    match raw.kind.as_str() {
      "atlassian-user-role-actor" => RoleActor::User {
        display_name,
        name,
        account_id: raw.actor_user.and_then(|u| u.account_id),
      },
      "atlassian-group-role-actor" => {
        let group = raw.actor_group.unwrap_or_default();
        RoleActor::Group {
          display_name: display_name.or_else(|| non_empty(group.display_name.as_deref()).map(str::to_string)),
          name: name.or_else(|| non_empty(group.name.as_deref()).map(str::to_string)),
        }
      }
      _ => RoleActor::Other {
        kind: raw.kind,
        display_name,
        name,
      },
    }
  }
}

impl RoleActor {
  /// The actor's `type` tag
  pub fn kind(&self) -> &str {
    match self {
      RoleActor::User { .. } => "atlassian-user-role-actor",
      RoleActor::Group { .. } => "atlassian-group-role-actor",
      RoleActor::Other { kind, .. } if kind.is_empty() => "unknown",
      RoleActor::Other { kind, .. } => kind,
    }
  }

  /// Human-readable description: display name, then name, then type
  pub fn describe(&self) -> String {
    let (display_name, fallback) = match self {
      RoleActor::User {
        display_name,
        name,
        account_id,
      } => (display_name, name.as_ref().or(account_id.as_ref())),
      RoleActor::Group { display_name, name } | RoleActor::Other { display_name, name, .. } => {
        (display_name, name.as_ref())
      }
    };

    display_name
      .as_deref()
      .or(fallback.map(String::as_str))
      .unwrap_or_else(|| self.kind())
      .to_string()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_auth_debug_redacts_token() {
    let auth = AtlassianAuth {
      username: "test_user".to_string(),
      api_token: "test_token".to_string(),
    };

    let rendered = format!("{auth:?}");
    assert!(rendered.contains("test_user"));
    assert!(!rendered.contains("test_token"));
  }

  #[test]
  fn test_holder_with_only_type_describes_as_type() {
    let holder: Holder = serde_json::from_value(json!({"type": "anyone"})).unwrap();

    assert_eq!(
      holder,
      Holder::Other {
        kind: "anyone".to_string(),
        display_name: None,
        parameter: None,
      }
    );
    assert_eq!(holder.describe(), "anyone");
  }

  #[test]
  fn test_holder_variants_prefer_display_name() {
    let user: Holder = serde_json::from_value(json!({
        "type": "user",
        "parameter": "5b10a2844c20165700ede21g",
        "user": {"accountId": "5b10a2844c20165700ede21g", "displayName": "Mia Krystof"}
    }))
    .unwrap();
    assert_eq!(user.describe(), "Mia Krystof");

    let group: Holder = serde_json::from_value(json!({
        "type": "group",
        "parameter": "jira-administrators",
        "value": "ca85fac0-d974-40ca-a615-7af99c48d24f"
    }))
    .unwrap();
    assert_eq!(group.kind(), "group");
    assert_eq!(group.describe(), "jira-administrators");

    let role: Holder = serde_json::from_value(json!({
        "type": "projectRole",
        "parameter": "10360",
        "projectRole": {"name": "Developers"}
    }))
    .unwrap();
    assert_eq!(role.describe(), "Developers");

    let top_level: Holder = serde_json::from_value(json!({
        "type": "applicationRole",
        "displayName": "Jira Software",
        "parameter": "jira-software"
    }))
    .unwrap();
    assert_eq!(top_level.describe(), "Jira Software");
  }

  #[test]
  fn test_holder_empty_strings_fall_through() {
    let holder: Holder = serde_json::from_value(json!({
        "type": "group",
        "displayName": "",
        "parameter": ""
    }))
    .unwrap();

    assert_eq!(holder.describe(), "group");
  }

  #[test]
  fn test_grant_holders_prefers_list() {
    let grant: PermissionGrant = serde_json::from_value(json!({
        "permission": "BROWSE_PROJECTS",
        "holder": {"type": "anyone"},
        "holders": [
            {"type": "group", "parameter": "devs"},
            {"type": "group", "parameter": "qa"}
        ]
    }))
    .unwrap();

    let described: Vec<String> = grant.holders().iter().map(|h| h.describe()).collect();
    assert_eq!(described, vec!["devs", "qa"]);

    let single: PermissionGrant = serde_json::from_value(json!({
        "permission": "ADMINISTER_PROJECTS",
        "holder": {"type": "projectLead"}
    }))
    .unwrap();
    assert_eq!(single.holders().len(), 1);

    let none: PermissionGrant = serde_json::from_value(json!({"permission": "CLOSE_ISSUES"})).unwrap();
    assert!(none.holders().is_empty());
  }

  #[test]
  fn test_role_actor_normalization() {
    let role: ProjectRoleDetail = serde_json::from_value(json!({
        "name": "Administrators",
        "id": 10002,
        "actors": [
            {
                "id": 10240,
                "displayName": "Mia Krystof",
                "type": "atlassian-user-role-actor",
                "actorUser": {"accountId": "5b10a2844c20165700ede21g"}
            },
            {
                "id": 10241,
                "type": "atlassian-group-role-actor",
                "name": "jira-developers",
                "actorGroup": {"name": "jira-developers", "displayName": "Jira Developers"}
            },
            {"type": "atlassian-user-role-actor", "actorUser": {"accountId": "abc123"}},
            {"type": "mystery-actor"}
        ]
    }))
    .unwrap();

    assert_eq!(
      role.members(),
      vec!["Mia Krystof", "Jira Developers", "abc123", "mystery-actor"]
    );
  }

  #[test]
  fn test_user_actor_prefers_name_over_account_id() {
    let role: ProjectRoleDetail = serde_json::from_value(json!({
        "name": "Developers",
        "actors": [
            {
                "type": "atlassian-user-role-actor",
                "name": "mkrystof",
                "actorUser": {"accountId": "5b10a2844c20165700ede21g"}
            }
        ]
    }))
    .unwrap();

    assert_eq!(role.members(), vec!["mkrystof"]);
  }

  #[test]
  fn test_project_roles_keep_response_order() {
    let body = r#"{
      "Viewers": "https://acme.atlassian.net/rest/api/3/project/P1/role/10002",
      "Administrators": "https://acme.atlassian.net/rest/api/3/project/P1/role/10001"
    }"#;
    let roles: ProjectRoles = serde_json::from_str(body).unwrap();

    let names: Vec<&str> = roles.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Viewers", "Administrators"]);
    assert_eq!(
      roles.get("Administrators"),
      Some("https://acme.atlassian.net/rest/api/3/project/P1/role/10001")
    );
    assert_eq!(roles.get("Developers"), None);
  }

  #[test]
  fn test_project_detail_issue_types() {
    let with_types: ProjectDetail = serde_json::from_value(json!({
        "key": "P1",
        "name": "One",
        "issueTypes": [{"id": "1", "name": "Bug"}, {"id": "2", "name": "Task"}, {"id": "3"}]
    }))
    .unwrap();
    assert_eq!(with_types.issue_type_names(), Some(vec!["Bug", "Task"]));

    let without: ProjectDetail = serde_json::from_value(json!({"key": "P2", "name": "Two"})).unwrap();
    assert_eq!(without.issue_type_names(), None);
  }

  #[test]
  fn test_permission_scheme_list_accepts_legacy_values() {
    let list: PermissionSchemeList = serde_json::from_value(json!({
        "values": [{"id": 10000, "name": "Default Permission Scheme"}]
    }))
    .unwrap();
    assert_eq!(list.permission_schemes.len(), 1);

    let list: PermissionSchemeList = serde_json::from_value(json!({
        "permissionSchemes": [{"id": 10000, "name": "Default"}, {"id": 10001, "name": "Restricted"}]
    }))
    .unwrap();
    assert_eq!(list.permission_schemes[1].name, "Restricted");
  }
}
