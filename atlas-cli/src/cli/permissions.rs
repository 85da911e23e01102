//! # Permissions Command
//!
//! Permission audit: grouped console listing plus a timestamped CSV.

use std::path::PathBuf;

use anyhow::Result;
use atlas_core::output::{format_path, print_success};
use chrono::Local;
use clap::Args;

use super::CommandContext;
use crate::audit::run_permission_audit;
use crate::clients::create_jira_runtime_and_client;
use crate::consts::DEFAULT_JIRA_PAGE_SIZE;
use crate::report::console::print_permission_report;
use crate::report::csv::{permission_report_file_name, write_permission_report};

/// Arguments for the permissions command
#[derive(Args)]
pub struct PermissionsArgs {
  /// Directory the timestamped CSV is written to
  #[arg(long, value_name = "DIR", default_value = ".")]
  pub output_dir: PathBuf,

  /// Projects requested per page (defaults to the config file value, then 50)
  #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
  pub page_size: Option<u32>,
}

pub(crate) fn handle_permissions_command(args: PermissionsArgs, ctx: &mut CommandContext) -> Result<()> {
  let page_size = args
    .page_size
    .or(ctx.config.page_size)
    .unwrap_or(DEFAULT_JIRA_PAGE_SIZE);
  let file_name = permission_report_file_name(&Local::now());

  let (rt, client) = create_jira_runtime_and_client(&ctx.config)?;
  let rows = rt.block_on(run_permission_audit(
    &client,
    u64::from(page_size),
    ctx.progress.as_mut(),
  ))?;

  print_permission_report(&rows);
  let path = write_permission_report(&args.output_dir, &file_name, &rows)?;
  print_success(&format!(
    "Export complete: {} rows written to {}",
    rows.len(),
    format_path(&path.display().to_string())
  ));

  Ok(())
}
