//! Helpers for reading credentials stored in `.netrc` files.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::NETRC_FALLBACK_MACHINE;
use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use atlas_core::creds::netrc::get_netrc_path;
///
/// let home = Path::new("/home/user");
/// let path = get_netrc_path(home);
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// The parser supports both single-line (`machine host login user password pass`)
/// and multi-line formats. If the target machine is not present or has missing
/// `login`/`password` values, `Ok(None)` is returned.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> io::Result<Option<Credentials>> {
  let file = File::open(path)?;
  let reader = BufReader::new(file);

  let mut current_machine = String::new();
  let mut username = String::new();
  let mut password = String::new();

  for line in reader.lines() {
    let line = line?;
    let parts: Vec<&str> = line.split_whitespace().collect();

    for i in 0..parts.len() {
      match parts[i] {
        "machine" if i + 1 < parts.len() => {
          // Finish the previous machine before starting the next one
          if current_machine == target_machine && !username.is_empty() && !password.is_empty() {
            return Ok(Some(Credentials { username, password }));
          }
          username.clear();
          password.clear();
          current_machine = parts[i + 1].to_string();
        }
        "login" if i + 1 < parts.len() => {
          username = parts[i + 1].to_string();
        }
        "password" if i + 1 < parts.len() => {
          password = parts[i + 1].to_string();
        }
        _ => {}
      }
    }
  }

  // Check the last machine in the file
  if current_machine == target_machine && !username.is_empty() && !password.is_empty() {
    return Ok(Some(Credentials { username, password }));
  }

  Ok(None)
}

/// Strip scheme and trailing slash from a host string.
pub fn normalize_host(raw_host: &str) -> String {
  raw_host
    .trim_start_matches("https://")
    .trim_start_matches("http://")
    .trim_end_matches('/')
    .to_string()
}

/// Look up credentials for `host` in `<home>/.netrc`, falling back to the
/// `atlassian.net` entry. A missing `.netrc` is not an error.
pub fn lookup_credentials(home: &Path, host: &str) -> io::Result<Option<Credentials>> {
  let path = get_netrc_path(home);
  if !path.exists() {
    return Ok(None);
  }

  let host = normalize_host(host);
  for machine in [host.as_str(), NETRC_FALLBACK_MACHINE] {
    if let Some(creds) = parse_netrc_file(&path, machine)? {
      debug!(machine, "Using credentials from .netrc");
      return Ok(Some(creds));
    }
  }

  Ok(None)
}
