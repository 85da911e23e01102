//! # Jira Project Endpoints
//!
//! Project listing (offset paginated), project detail, and project role
//! membership.

use url::Url;

use crate::client::AtlassianClient;
use crate::consts::JIRA_API;
use crate::error::ApiError;
use crate::models::{ProjectDetail, ProjectRoleDetail, ProjectRoles, ProjectSummary};

/// Extract the numeric role id from a role URL such as
/// `https://site/rest/api/3/project/P1/role/10002`.
pub fn role_id_from_url(role_url: &str) -> Option<u64> {
  let url = Url::parse(role_url).ok()?;
  url.path_segments()?.filter(|s| !s.is_empty()).last()?.parse().ok()
}

impl AtlassianClient {
  /// List every project visible to the user
  pub async fn list_projects(&self, page_size: u64) -> Result<Vec<ProjectSummary>, ApiError> {
    self
      .get_all_offset(&format!("{JIRA_API}/project/search"), &[], page_size)
      .await
  }

  /// Get a project, including its issue types
  pub async fn project(&self, project_key: &str) -> Result<ProjectDetail, ApiError> {
    self.get_json(&format!("{JIRA_API}/project/{project_key}"), &[]).await
  }

  /// Get the roles of a project as role name and URL pairs, in response order
  pub async fn project_roles(&self, project_key: &str) -> Result<ProjectRoles, ApiError> {
    self.get_json(&format!("{JIRA_API}/project/{project_key}/role"), &[]).await
  }

  /// Get a project role with its actors.
  ///
  /// Always requested under the configured base URL rather than following the
  /// URL from [`Self::project_roles`], so credentials stay on this site.
  pub async fn project_role(&self, project_key: &str, role_id: u64) -> Result<ProjectRoleDetail, ApiError> {
    self
      .get_json(&format!("{JIRA_API}/project/{project_key}/role/{role_id}"), &[])
      .await
  }
}

#[cfg(test)]
mod tests {
  use atlas_test_utils::fixtures;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::create_atlassian_client;

  #[test]
  fn test_role_id_from_url() {
    assert_eq!(
      role_id_from_url("https://example.atlassian.net/rest/api/3/project/P1/role/10002"),
      Some(10002)
    );
    assert_eq!(role_id_from_url("https://example.atlassian.net/rest/api/3/project/P1/role/10002/"), Some(10002));
    assert_eq!(role_id_from_url("https://example.atlassian.net/rest/api/3/project/P1/role"), None);
    assert_eq!(role_id_from_url("not a url"), None);
  }

  #[tokio::test]
  async fn test_list_projects_paginates() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_atlassian_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project/search"))
      .and(query_param("startAt", "0"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::offset_page(
        vec![fixtures::project("P1", "One"), fixtures::project("P2", "Two")],
        0,
        Some(false),
      )))
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project/search"))
      .and(query_param("startAt", "2"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::offset_page(
        vec![fixtures::project("P3", "Three")],
        2,
        Some(true),
      )))
      .mount(&mock_server)
      .await;

    let projects = client.list_projects(2).await?;
    let keys: Vec<&str> = projects.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["P1", "P2", "P3"]);

    Ok(())
  }

  #[tokio::test]
  async fn test_project_roles_and_role_detail() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_atlassian_client(&mock_server.uri(), "test_user", "test_token");
    let base = mock_server.uri();

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project/P1/role"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::role_map(
        &base,
        "P1",
        &[("Administrators", 10002), ("Developers", 10001)],
      )))
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project/P1/role/10002"))
      .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::role(
        "Administrators",
        vec![fixtures::user_actor("Mia Krystof")],
      )))
      .mount(&mock_server)
      .await;

    let roles = client.project_roles("P1").await?;
    assert_eq!(roles.len(), 2);

    let role_id = role_id_from_url(roles.get("Administrators").expect("administrators role")).expect("role id");
    let role = client.project_role("P1", role_id).await?;
    assert_eq!(role.name, "Administrators");
    assert_eq!(role.members(), vec!["Mia Krystof"]);

    Ok(())
  }

  #[tokio::test]
  async fn test_project_roles_keep_server_order() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_atlassian_client(&mock_server.uri(), "test_user", "test_token");
    let base = mock_server.uri();
    let body = format!(
      r#"{{"Viewers": "{base}/rest/api/3/project/P1/role/10002", "Administrators": "{base}/rest/api/3/project/P1/role/10001"}}"#
    );

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project/P1/role"))
      .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
      .mount(&mock_server)
      .await;

    let roles = client.project_roles("P1").await?;
    let names: Vec<&str> = roles.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Viewers", "Administrators"]);

    Ok(())
  }

  #[tokio::test]
  async fn test_project_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_atlassian_client(&mock_server.uri(), "test_user", "test_token");

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project/NONEXISTENT"))
      .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
          "errorMessages": ["No project could be found with key 'NONEXISTENT'."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let err = client.project("NONEXISTENT").await.unwrap_err();
    assert_eq!(err.status_code().map(|s| s.as_u16()), Some(404));
    assert!(err.to_string().contains("No project could be found"));

    Ok(())
  }
}
