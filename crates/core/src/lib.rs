//! Core business logic for Attendo.
//!
//! This crate holds the attendance and leave-approval domain with no file,
//! network, or terminal dependencies. Storage is reached through the traits in
//! `store`.
//!
//! # Modules
//!
//! - `calendar` - Business-day rules
//! - `roster` - Members, default roster, CSV import
//! - `attendance` - Daily records and manual entry
//! - `leave` - Vacation requests, approval chain, balances
//! - `report` - Statistics, CSV export, spreadsheet payload
//! - `store` - Storage traits and the in-memory store

pub mod attendance;
pub mod calendar;
pub mod leave;
pub mod report;
pub mod roster;
pub mod store;
