use crate::client::AtlassianClient;
use crate::consts::JIRA_API;
use crate::error::ApiError;
use crate::models::IssueType;

impl AtlassianClient {
  /// List every issue type visible to the user
  pub async fn list_issue_types(&self) -> Result<Vec<IssueType>, ApiError> {
    self.get_json(&format!("{JIRA_API}/issuetype"), &[]).await
  }
}
