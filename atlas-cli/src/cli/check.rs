//! # Check Command
//!
//! Shows the resolved configuration and probes the Jira `/myself` endpoint.

use anyhow::Result;
use atlas_core::output::{format_url, print_error, print_header, print_success};

use super::CommandContext;
use crate::audit::AuditError;
use crate::clients::create_jira_runtime_and_client;

pub(crate) fn handle_check_command(ctx: &CommandContext) -> Result<()> {
  let config = &ctx.config;

  print_header("Configuration");
  println!("  Site:        {}", format_url(&config.site_url));
  println!("  Confluence:  {}", format_url(&config.confluence_url));
  println!("  Email:       {}", config.email);
  println!("  API token:   set ({} characters)", config.api_token.chars().count());
  if let Some(page_size) = config.page_size {
    println!("  Page size:   {page_size}");
  }

  let (rt, client) = create_jira_runtime_and_client(config)?;
  let Some(me) = rt
    .block_on(client.test_connection())
    .map_err(|source| AuditError::Connection { source })?
  else {
    print_error(&format!(
      "{} did not accept the credentials for {}",
      config.site_url, config.email
    ));
    anyhow::bail!("Connection check failed");
  };

  print_success(&format!(
    "Connected as {}",
    me.display_name.as_deref().unwrap_or("Unknown User")
  ));
  Ok(())
}
