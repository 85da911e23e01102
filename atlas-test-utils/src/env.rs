//! Environment variable management for testing
//!
//! Tests that read configuration from the environment use [`EnvVarGuard`] so
//! that the previous value is restored when the test finishes.

use std::env;
use std::ffi::OsString;

/// Saves one environment variable and restores it on drop
pub struct EnvVarGuard {
  name: String,
  original: Option<OsString>,
}

impl EnvVarGuard {
  /// Start guarding `name`. The variable keeps its current value until
  /// [`EnvVarGuard::set`] or [`EnvVarGuard::remove`] is called.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var_os(name),
    }
  }

  /// Set the guarded variable
  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the guarded variable
  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}
