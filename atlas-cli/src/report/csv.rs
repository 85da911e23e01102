//! CSV export of the audit reports.
//!
//! Headers are written explicitly so an empty report still carries its
//! header row.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{AuditError, PermissionRow, SpaceActivity};

/// Default output file of the space activity report
pub const SPACE_REPORT_FILE: &str = "confluence_space_report.csv";

pub const SPACE_HEADERS: [&str; 5] = ["Space Name", "Space Key", "Last Updated", "Page Title", "Page URL"];
pub const PERMISSION_HEADERS: [&str; 4] = ["Scope", "Project/Scheme", "Permission/Role", "User/Group"];

/// Timestamp format of the `Last Updated` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File name of a permission audit started at `now`
pub fn permission_report_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
  Tz::Offset: std::fmt::Display,
{
  format!("jira_permissions_audit_{}.csv", now.format("%Y-%m-%d_%H-%M"))
}

/// A space activity row as written to CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceCsvRow {
  #[serde(rename = "Space Name")]
  pub space_name: String,
  #[serde(rename = "Space Key")]
  pub space_key: String,
  #[serde(rename = "Last Updated")]
  pub last_updated: String,
  #[serde(rename = "Page Title")]
  pub page_title: String,
  #[serde(rename = "Page URL")]
  pub page_url: String,
}

impl From<&SpaceActivity> for SpaceCsvRow {
  fn from(row: &SpaceActivity) -> Self {
    Self {
      space_name: row.space_name().to_string(),
      space_key: row.space.key.clone(),
      last_updated: row
        .last_updated()
        .map(|when| when.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default(),
      page_title: row.page_title(),
      page_url: row.page_url().to_string(),
    }
  }
}

/// Write a header row followed by the serialized records
pub fn write_records<W, R>(writer: W, headers: &[&str], records: impl IntoIterator<Item = R>) -> csv::Result<()>
where
  W: Write,
  R: Serialize,
{
  let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
  wtr.write_record(headers)?;
  for record in records {
    wtr.serialize(record)?;
  }
  wtr.flush()?;
  Ok(())
}

fn write_file<R: Serialize>(
  path: &Path,
  headers: &[&str],
  records: impl IntoIterator<Item = R>,
) -> Result<(), AuditError> {
  let file = File::create(path).map_err(|source| AuditError::Io {
    path: path.to_path_buf(),
    source,
  })?;

  write_records(file, headers, records).map_err(|source| AuditError::Csv {
    path: path.to_path_buf(),
    source,
  })?;

  info!(path = %path.display(), "Wrote CSV report");
  Ok(())
}

/// Write the space activity report to `path`
pub fn write_space_report(path: &Path, rows: &[SpaceActivity]) -> Result<(), AuditError> {
  write_file(path, &SPACE_HEADERS, rows.iter().map(SpaceCsvRow::from))
}

/// Write the permission audit into `dir`, returning the file written
pub fn write_permission_report(
  dir: &Path,
  file_name: &str,
  rows: &[PermissionRow],
) -> Result<PathBuf, AuditError> {
  let path = dir.join(file_name);
  write_file(&path, &PERMISSION_HEADERS, rows)?;
  Ok(path)
}
