//! Approval-chain transition table.
//!
//! Legal edges are listed once, in `TRANSITIONS`. Anything not in the table
//! is rejected, which also makes `FinalApproved` and `Rejected` terminal.

use crate::leave::error::LeaveError;
use crate::leave::types::VacationStatus;

/// What a legal transition does besides changing the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Only the status changes.
    StatusOnly,
    /// Write EXCUSED attendance and debit the balance.
    ApplyLeave,
}

/// (from, to, effect)
const TRANSITIONS: [(VacationStatus, VacationStatus, TransitionEffect); 4] = [
    (
        VacationStatus::PendingSecretary,
        VacationStatus::SecretaryApproved,
        TransitionEffect::StatusOnly,
    ),
    (
        VacationStatus::SecretaryApproved,
        VacationStatus::FinalApproved,
        TransitionEffect::ApplyLeave,
    ),
    (
        VacationStatus::PendingSecretary,
        VacationStatus::Rejected,
        TransitionEffect::StatusOnly,
    ),
    (
        VacationStatus::SecretaryApproved,
        VacationStatus::Rejected,
        TransitionEffect::StatusOnly,
    ),
];

/// Stateless lookup over the transition table.
pub struct LeaveWorkflow;

impl LeaveWorkflow {
    /// Validates a transition and returns its effect.
    ///
    /// # Returns
    /// * `Ok(effect)` if `from → to` is a legal edge
    /// * `Err(LeaveError::InvalidTransition)` otherwise
    pub fn transition(
        from: VacationStatus,
        to: VacationStatus,
    ) -> Result<TransitionEffect, LeaveError> {
        TRANSITIONS
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map(|(_, _, effect)| *effect)
            .ok_or(LeaveError::InvalidTransition { from, to })
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: VacationStatus, to: VacationStatus) -> bool {
        Self::transition(from, to).is_ok()
    }

    /// Statuses reachable from `from` in one step.
    #[must_use]
    pub fn next_statuses(from: VacationStatus) -> Vec<VacationStatus> {
        TRANSITIONS
            .iter()
            .filter(|(f, _, _)| *f == from)
            .map(|(_, t, _)| *t)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secretary_approval_is_status_only() {
        assert_eq!(
            LeaveWorkflow::transition(
                VacationStatus::PendingSecretary,
                VacationStatus::SecretaryApproved
            )
            .unwrap(),
            TransitionEffect::StatusOnly
        );
    }

    #[test]
    fn test_final_approval_applies_leave() {
        assert_eq!(
            LeaveWorkflow::transition(
                VacationStatus::SecretaryApproved,
                VacationStatus::FinalApproved
            )
            .unwrap(),
            TransitionEffect::ApplyLeave
        );
    }

    #[test]
    fn test_skipping_secretary_fails() {
        let result = LeaveWorkflow::transition(
            VacationStatus::PendingSecretary,
            VacationStatus::FinalApproved,
        );
        assert!(matches!(
            result,
            Err(LeaveError::InvalidTransition {
                from: VacationStatus::PendingSecretary,
                to: VacationStatus::FinalApproved,
            })
        ));
    }

    #[test]
    fn test_final_approved_twice_fails() {
        assert!(!LeaveWorkflow::is_valid_transition(
            VacationStatus::FinalApproved,
            VacationStatus::FinalApproved
        ));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        assert!(LeaveWorkflow::next_statuses(VacationStatus::FinalApproved).is_empty());
        assert!(LeaveWorkflow::next_statuses(VacationStatus::Rejected).is_empty());
        assert_eq!(
            LeaveWorkflow::next_statuses(VacationStatus::PendingSecretary),
            vec![VacationStatus::SecretaryApproved, VacationStatus::Rejected]
        );
    }
}
