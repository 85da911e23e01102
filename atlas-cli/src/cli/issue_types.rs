//! # Issue Types Command

use anyhow::Result;
use clap::Args;

use super::CommandContext;
use crate::audit::run_issue_type_usage;
use crate::clients::create_jira_runtime_and_client;
use crate::consts::DEFAULT_JIRA_PAGE_SIZE;
use crate::report::console::print_issue_type_report;

/// Arguments for the issue-types command
#[derive(Args)]
pub struct IssueTypesArgs {
  /// Projects requested per page (defaults to the config file value, then 50)
  #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
  pub page_size: Option<u32>,
}

pub(crate) fn handle_issue_types_command(args: IssueTypesArgs, ctx: &mut CommandContext) -> Result<()> {
  let page_size = args
    .page_size
    .or(ctx.config.page_size)
    .unwrap_or(DEFAULT_JIRA_PAGE_SIZE);

  let (rt, client) = create_jira_runtime_and_client(&ctx.config)?;
  let usage = rt.block_on(run_issue_type_usage(
    &client,
    u64::from(page_size),
    ctx.progress.as_mut(),
  ))?;

  print_issue_type_report(&usage);
  Ok(())
}
