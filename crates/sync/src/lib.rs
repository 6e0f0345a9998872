//! Pushes a day's attendance to a spreadsheet webhook.
//!
//! The webhook is a script endpoint that accepts `{"records": [...]}` as a
//! `text/plain` POST and answers with JSON or plain text.

mod client;
mod error;

pub use client::{SheetClient, SyncReceipt, interpret_response, resolve_url};
pub use error::SyncError;
