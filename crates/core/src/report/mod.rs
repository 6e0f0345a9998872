//! Read-only views over the ledger: daily statistics, CSV exports, and the
//! spreadsheet sync payload.
//!
//! Everything here is a pure function of roster, records, and balances.
//!
//! # Modules
//!
//! - `stats` - Daily counts, drill-down, per-member summaries
//! - `export` - Attendance and balance CSV
//! - `sheet` - Spreadsheet webhook payload

pub mod export;
pub mod sheet;
pub mod stats;

#[cfg(test)]
mod stats_props;

pub use export::{ATTENDANCE_HEADER, BALANCE_HEADER, attendance_csv, balance_csv, to_tsv};
pub use sheet::{SheetPayload, SheetRow, sheet_payload};
pub use stats::{DailyStats, MemberSummary, ReportService};
