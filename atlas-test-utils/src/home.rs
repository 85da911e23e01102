//! HOME directory management for testing
//!
//! This module provides utilities for isolating HOME directory during testing
//! to prevent tests from reading the user's real `.netrc` or config files.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A test environment that overrides the HOME directory to use a temporary
/// directory
pub struct HomeEnvTestGuard {
  /// The temporary directory that will be used as HOME
  pub temp_dir: TempDir,
  /// The original HOME value
  original_home: Option<OsString>,
}

impl Default for HomeEnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl HomeEnvTestGuard {
  /// Create a new test environment with a temporary HOME directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let original_home = env::var_os("HOME");

    unsafe {
      env::set_var("HOME", temp_dir.path());
    }

    Self {
      temp_dir,
      original_home,
    }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to a file in the temporary HOME directory
  pub fn home_path(&self, relative_path: &str) -> PathBuf {
    self.temp_dir.path().join(relative_path)
  }
}

impl Drop for HomeEnvTestGuard {
  fn drop(&mut self) {
    match &self.original_home {
      Some(home) => unsafe {
        env::set_var("HOME", home);
      },
      None => unsafe {
        env::remove_var("HOME");
      },
    }
  }
}
