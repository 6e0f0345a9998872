//! Shared identifiers, errors, and configuration for Attendo.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for members and vacation requests
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LeaveConfig, SheetConfig, StorageConfig};
pub use error::{AppError, AppResult};
