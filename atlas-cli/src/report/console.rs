//! Console rendering of the audit reports.

use atlas_core::output::{format_key, format_placeholder, print_bullet, print_header, print_info, print_success};
use atlas_core::text::fit_column;

use crate::audit::{IssueTypeUsage, PermissionRow, Scope, SpaceActivity};

const NAME_WIDTH: usize = 35;
const KEY_WIDTH: usize = 10;
const UPDATED_WIDTH: usize = 25;

/// Lines of the space activity table, header first
pub fn space_table_lines(rows: &[SpaceActivity]) -> Vec<String> {
  let mut lines = Vec::with_capacity(rows.len() + 2);
  lines.push(format!(
    "{} {} {} Page Title",
    fit_column("Space Name", NAME_WIDTH),
    fit_column("Key", KEY_WIDTH),
    fit_column("Last Updated", UPDATED_WIDTH)
  ));
  lines.push("-".repeat(110));

  for row in rows {
    let updated = row
      .last_updated()
      .map(|when| when.format("%Y-%m-%d %H:%M:%S UTC").to_string())
      .unwrap_or_else(|| "-".to_string());
    lines.push(format!(
      "{} {} {} {}",
      fit_column(row.space_name(), NAME_WIDTH),
      fit_column(&row.space.key, KEY_WIDTH),
      fit_column(&updated, UPDATED_WIDTH),
      row.page_title()
    ));
  }

  lines
}

pub fn print_space_report(rows: &[SpaceActivity]) {
  print_header("Space Activity Report");
  for line in space_table_lines(rows) {
    println!("{line}");
  }
}

/// One permission or role of a scheme or project, with all its holders
#[derive(Debug, PartialEq, Eq)]
pub struct PermissionGroup<'a> {
  pub scope: Scope,
  pub target: &'a str,
  pub permission: &'a str,
  pub holders: Vec<&'a str>,
}

/// Group consecutive rows sharing scope, target and permission
pub fn group_permission_rows(rows: &[PermissionRow]) -> Vec<PermissionGroup<'_>> {
  let mut groups: Vec<PermissionGroup<'_>> = Vec::new();
  for row in rows {
    let continues_last = groups.last_mut().filter(|g| {
      g.scope == row.scope && g.target == row.target && g.permission == row.permission
    });
    if let Some(group) = continues_last {
      group.holders.push(row.holder.as_str());
      continue;
    }

    groups.push(PermissionGroup {
      scope: row.scope,
      target: &row.target,
      permission: &row.permission,
      holders: vec![row.holder.as_str()],
    });
  }
  groups
}

pub fn print_permission_report(rows: &[PermissionRow]) {
  let mut current: Option<(Scope, &str)> = None;

  for group in group_permission_rows(rows) {
    if current.map(|(scope, _)| scope) != Some(group.scope) {
      match group.scope {
        Scope::Global => print_header("Global Permissions"),
        Scope::Project => print_header("Project Permissions"),
      }
    }
    if current != Some((group.scope, group.target)) {
      println!("\n  {}", format_key(group.target));
      current = Some((group.scope, group.target));
    }

    let holders: Vec<&str> = group.holders.into_iter().filter(|h| !h.is_empty()).collect();
    if holders.is_empty() {
      print_bullet(2, &format_placeholder(group.permission));
    } else {
      print_bullet(2, &format!("{}: {}", group.permission, holders.join(", ")));
    }
  }
}

pub fn print_issue_type_report(usage: &IssueTypeUsage) {
  print_header("Issue Type Usage");

  if usage.all_used() {
    print_success("All issue types are used by at least one project.");
  }

  if !usage.unused.is_empty() {
    print_info("These issue types are not used by any project:");
    for name in &usage.unused {
      print_bullet(1, name);
    }
  }

  if !usage.possibly_unused.is_empty() {
    print_info(&format!(
      "These issue types are not used by any project that could be inspected ({} could not):",
      usage.unverified_projects.len()
    ));
    for name in &usage.possibly_unused {
      print_bullet(1, name);
    }
  }

  if !usage.unverified_projects.is_empty() {
    print_info("Projects whose issue types could not be read:");
    for key in &usage.unverified_projects {
      print_bullet(1, &format_key(key));
    }
  }

  print_header("Issue Type to Project Mapping");
  for (name, projects) in usage.mapping() {
    match projects.len() {
      0 => println!("\n{name} (Used by 0 projects)"),
      n => {
        println!("\n{name} (Used by {n} project(s)):");
        println!("  > {}", projects.join(", "));
      }
    }
  }
}
