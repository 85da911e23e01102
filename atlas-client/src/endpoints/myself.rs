use tracing::{info, warn};

use crate::client::AtlassianClient;
use crate::consts::JIRA_API;
use crate::error::ApiError;
use crate::models::CurrentUser;

impl AtlassianClient {
  /// Fetch the authenticated user
  pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
    let user: CurrentUser = self.get_json(&format!("{JIRA_API}/myself"), &[]).await?;
    info!(account_id = ?user.account_id, "Authenticated");
    Ok(user)
  }

  /// Test the connection by fetching the current user.
  ///
  /// Transport failures are still returned as errors. `None` means the site
  /// answered but did not accept the credentials or the request.
  pub async fn test_connection(&self) -> Result<Option<CurrentUser>, ApiError> {
    match self.current_user().await {
      Ok(user) => Ok(Some(user)),
      Err(err) if err.is_transport() => Err(err),
      Err(err) => {
        warn!(error = %err, "Connection test failed");
        Ok(None)
      }
    }
  }
}
