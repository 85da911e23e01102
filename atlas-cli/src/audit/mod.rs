//! # Audits
//!
//! The three report pipelines. Each one lists top-level entities, enriches
//! them one request at a time and returns report data; rendering and file
//! output live in [`crate::report`].

pub mod error;
pub mod issue_types;
pub mod permissions;
pub mod progress;
pub mod space_activity;

pub use error::{AuditError, EntityError, classify_entity_error};
pub use issue_types::{IssueTypeUsage, run_issue_type_usage};
pub use permissions::{PermissionRow, Scope, run_permission_audit};
pub use progress::{ConsoleProgress, ProgressEvent, ProgressObserver, RecordingProgress, TracingProgress};
pub use space_activity::{PageLookup, SpaceActivity, run_space_activity};
