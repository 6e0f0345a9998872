//! Vacation-request lifecycle and leave-balance ledger.
//!
//! Requests move through a two-stage approval chain. Final approval writes
//! EXCUSED attendance for every business day of the leave and debits the
//! member's balance when the leave type is a deducting one.
//!
//! # Modules
//!
//! - `types` - Request, status, and balance types
//! - `error` - Ledger error types
//! - `policy` - Which leave types deduct, and by how much
//! - `workflow` - Approval-chain transition table
//! - `ledger` - Submission, approval, and balance administration

pub mod error;
pub mod ledger;
pub mod policy;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod ledger_props;
#[cfg(test)]
mod workflow_props;

pub use error::LeaveError;
pub use ledger::{
    AdvanceOutcome, AppliedLeave, BalanceWarning, LeaveApplication, LeaveLedger, Submission,
};
pub use policy::{Deduction, LeavePolicy};
pub use types::{VacationBalance, VacationRequest, VacationStatus};
pub use workflow::{LeaveWorkflow, TransitionEffect};
