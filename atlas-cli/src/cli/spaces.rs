//! # Spaces Command
//!
//! Space activity report: console table plus CSV.

use std::path::PathBuf;

use anyhow::Result;
use atlas_core::output::{format_path, print_success};
use clap::Args;

use super::CommandContext;
use crate::audit::run_space_activity;
use crate::clients::create_confluence_runtime_and_client;
use crate::consts::DEFAULT_SPACE_PAGE_SIZE;
use crate::report::console::print_space_report;
use crate::report::csv::{SPACE_REPORT_FILE, write_space_report};

/// Arguments for the spaces command
#[derive(Args)]
pub struct SpacesArgs {
  /// CSV file to write the report to
  #[arg(long, short = 'o', value_name = "FILE", default_value = SPACE_REPORT_FILE)]
  pub output: PathBuf,

  /// Spaces requested per page (defaults to the config file value, then 100)
  #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
  pub page_size: Option<u32>,
}

pub(crate) fn handle_spaces_command(args: SpacesArgs, ctx: &mut CommandContext) -> Result<()> {
  let page_size = args
    .page_size
    .or(ctx.config.page_size)
    .unwrap_or(DEFAULT_SPACE_PAGE_SIZE);

  let (rt, client) = create_confluence_runtime_and_client(&ctx.config)?;
  let rows = rt.block_on(run_space_activity(&client, page_size, ctx.progress.as_mut()))?;

  print_space_report(&rows);
  write_space_report(&args.output, &rows)?;
  print_success(&format!(
    "Report saved to {}",
    format_path(&args.output.display().to_string())
  ));

  Ok(())
}
