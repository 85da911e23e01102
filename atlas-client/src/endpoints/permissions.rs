use crate::client::AtlassianClient;
use crate::consts::JIRA_API;
use crate::error::ApiError;
use crate::models::{PermissionScheme, PermissionSchemeList, PermissionSchemeSummary};

impl AtlassianClient {
  /// List every permission scheme
  pub async fn list_permission_schemes(&self) -> Result<Vec<PermissionSchemeSummary>, ApiError> {
    let list: PermissionSchemeList = self.get_json(&format!("{JIRA_API}/permissionscheme"), &[]).await?;
    Ok(list.permission_schemes)
  }

  /// Get a permission scheme with its grants, holders expanded
  pub async fn permission_scheme(&self, scheme_id: u64) -> Result<PermissionScheme, ApiError> {
    self
      .get_json(
        &format!("{JIRA_API}/permissionscheme/{scheme_id}"),
        &[("expand", "user,group,projectRole".to_string())],
      )
      .await
  }
}
