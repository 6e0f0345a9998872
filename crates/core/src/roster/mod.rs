//! Member roster: reference data for identity and labeling.
//!
//! # Modules
//!
//! - `types` - The `Member` record
//! - `defaults` - Built-in roster used on first run and by reset
//! - `import` - Roster CSV import and template
//! - `error` - Roster-specific error types

pub mod defaults;
pub mod error;
pub mod import;
pub mod types;

pub use defaults::default_roster;
pub use error::RosterError;
pub use import::{RosterImport, template_csv};
pub use types::Member;
