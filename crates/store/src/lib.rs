//! Durable storage for the Attendo ledger.
//!
//! Each collection is one JSON document in the data directory, named after
//! its collection key. Writes go to a temporary file first and are renamed
//! into place, so a crash never leaves a half-written collection.

mod file;
pub mod keys;

pub use file::FileStore;
