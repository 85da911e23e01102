//! Progress reporting for the audit pipelines.
//!
//! Pipelines never print. They emit [`ProgressEvent`]s to an injected
//! [`ProgressObserver`], and the command decides whether those become console
//! narration, `tracing` events, or a recorded list in tests.

use atlas_core::output::{format_key, print_info, print_success, print_warning};
use tracing::{info, warn};

/// Something worth telling the user while an audit runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
  /// A listing phase is about to start
  Fetching { what: &'static str },
  /// A listing phase finished
  Listed { what: &'static str, count: usize },
  /// Enrichment of one entity started
  Started { name: String },
  /// An entity could not be read and was recorded as a placeholder
  Skipped { name: String, reason: String },
  /// Informational note
  Note(String),
  /// Something the user should look at, the run continues
  Warning(String),
  /// The pipeline produced its result
  Finished { rows: usize },
}

/// Receiver of [`ProgressEvent`]s
pub trait ProgressObserver {
  /// Handle one event
  fn on_event(&mut self, event: ProgressEvent);
}

/// Narrates progress on the console
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
  fn on_event(&mut self, event: ProgressEvent) {
    match event {
      ProgressEvent::Fetching { what } => print_info(&format!("Fetching {what}...")),
      ProgressEvent::Listed { what, count } => print_success(&format!("Found {count} {what}.")),
      ProgressEvent::Started { name } => println!("  Scanning {}", format_key(&name)),
      ProgressEvent::Skipped { name, reason } => print_warning(&format!("Skipping {name}: {reason}")),
      ProgressEvent::Note(message) => print_info(&message),
      ProgressEvent::Warning(message) => print_warning(&message),
      ProgressEvent::Finished { .. } => {}
    }
  }
}

/// Emits progress as structured `tracing` events
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
  fn on_event(&mut self, event: ProgressEvent) {
    match event {
      ProgressEvent::Fetching { what } => info!(what, "Fetching listing"),
      ProgressEvent::Listed { what, count } => info!(what, count, "Listing complete"),
      ProgressEvent::Started { name } => info!(entity = %name, "Reading entity"),
      ProgressEvent::Skipped { name, reason } => warn!(entity = %name, %reason, "Entity skipped"),
      ProgressEvent::Note(message) => info!("{message}"),
      ProgressEvent::Warning(message) => warn!("{message}"),
      ProgressEvent::Finished { rows } => info!(rows, "Audit finished"),
    }
  }
}

/// Keeps every event, for assertions
#[derive(Debug, Default)]
pub struct RecordingProgress {
  pub events: Vec<ProgressEvent>,
}

impl RecordingProgress {
  /// Names of the skipped entities, in order
  pub fn skipped(&self) -> Vec<&str> {
    self
      .events
      .iter()
      .filter_map(|e| match e {
        ProgressEvent::Skipped { name, .. } => Some(name.as_str()),
        _ => None,
      })
      .collect()
  }
}

impl ProgressObserver for RecordingProgress {
  fn on_event(&mut self, event: ProgressEvent) {
    self.events.push(event);
  }
}
