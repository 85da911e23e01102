//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for atlas-audit: one
//! subcommand per report plus a configuration check.

mod check;
mod issue_types;
mod permissions;
mod spaces;

use std::path::PathBuf;

use anyhow::Result;
use atlas_core::{AuditConfig, ColorMode, ConfigOverrides};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

use crate::audit::{ConsoleProgress, ProgressObserver, TracingProgress};
use crate::clients;

/// Top-level CLI command for atlas-audit
#[derive(Parser)]
#[command(name = "atlas-audit")]
#[command(about = "Audit reports for Jira and Confluence")]
#[command(
  long_about = "Atlas Audit queries the Jira and Confluence REST APIs of an Atlassian Cloud site\n\
        and reports on space freshness, permission assignments and issue-type usage.\n\n\
        Credentials come from --site/--email, the ATLASSIAN_SITE, ATLASSIAN_EMAIL and\n\
        ATLASSIAN_API_TOKEN environment variables, the config file, or ~/.netrc."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightBlue.on_default().bold().underline())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::BrightBlue.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Only log progress through tracing instead of narrating it
  #[arg(short = 'q', long, global = true)]
  pub quiet: bool,

  /// Path to a config file (defaults to the user config directory)
  #[arg(long, global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Atlassian site URL, e.g. https://your-site.atlassian.net
  #[arg(long, global = true, value_name = "URL")]
  pub site: Option<String>,

  /// Account email used for API authentication
  #[arg(long, global = true, value_name = "EMAIL")]
  pub email: Option<String>,

  /// Confluence base URL (defaults to the site URL plus /wiki)
  #[arg(long, global = true, value_name = "URL")]
  pub confluence_url: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for atlas-audit
#[derive(Subcommand)]
pub enum Commands {
  /// Report the most recently updated page of every Confluence space
  #[command(long_about = "Report the most recently updated page of every global Confluence space.\n\n\
            Spaces are listed newest activity first. Spaces without pages or that\n\
            cannot be read are kept at the end of the report with a placeholder.\n\
            The report is printed and written to a CSV file.")]
  Spaces(spaces::SpacesArgs),

  /// Audit permission scheme grants and project role membership
  #[command(long_about = "Audit Jira permission scheme grants and project role membership.\n\n\
            Every grant of every permission scheme and every member of every project\n\
            role becomes one row. Schemes, projects and roles that cannot be read are\n\
            recorded as '(no access)' rows. The report is printed and written to a\n\
            timestamped CSV file.")]
  #[command(alias = "perms")]
  Permissions(permissions::PermissionsArgs),

  /// Find issue types that no project uses
  #[command(long_about = "Map every Jira issue type to the projects using it.\n\n\
            Issue types not declared by any project are reported as unused. When some\n\
            projects cannot be inspected, they are reported as possibly unused instead,\n\
            together with the projects that could not be read.")]
  #[command(alias = "types")]
  IssueTypes(issue_types::IssueTypesArgs),

  /// Validate the configuration and test the connection
  #[command(long_about = "Validate the configuration and test the connection.\n\n\
            Shows where the site, Confluence URL and account come from and calls the\n\
            Jira /myself endpoint to confirm the credentials are accepted.")]
  Check,
}

/// Shared state handed to every command
pub struct CommandContext {
  pub config: AuditConfig,
  pub progress: Box<dyn ProgressObserver>,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let overrides = ConfigOverrides {
    site: cli.site,
    email: cli.email,
    confluence_url: cli.confluence_url,
  };
  let config = clients::load_config(&overrides, cli.config.as_deref())?;

  let progress: Box<dyn ProgressObserver> = if cli.quiet {
    Box::new(TracingProgress)
  } else {
    Box::new(ConsoleProgress)
  };
  let mut ctx = CommandContext { config, progress };

  match cli.command {
    Commands::Spaces(args) => spaces::handle_spaces_command(args, &mut ctx),
    Commands::Permissions(args) => permissions::handle_permissions_command(args, &mut ctx),
    Commands::IssueTypes(args) => issue_types::handle_issue_types_command(args, &mut ctx),
    Commands::Check => check::handle_check_command(&ctx),
  }
}
