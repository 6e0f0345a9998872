//! Daily attendance records.
//!
//! A record is keyed by (member, date). A member without a record for a date
//! is *pending*; that status is derived at query time and never stored.
//!
//! # Modules
//!
//! - `types` - Attendance status and record types
//! - `error` - Attendance-specific error types
//! - `service` - Manual marking, batch marking, and record edits

pub mod error;
pub mod service;
pub mod types;

pub use error::AttendanceError;
pub use service::{AttendanceEntry, AttendanceService, BatchOutcome, TimeField};
pub use types::{AttendanceRecord, AttendanceStatus, PENDING_LABEL, status_label};
