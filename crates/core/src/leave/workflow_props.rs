//! Property-based tests for the approval-chain transition table.

use proptest::prelude::*;

use crate::leave::error::LeaveError;
use crate::leave::types::VacationStatus;
use crate::leave::workflow::{LeaveWorkflow, TransitionEffect};

/// Strategy for generating random VacationStatus values.
fn arb_status() -> impl Strategy<Value = VacationStatus> {
    prop_oneof![
        Just(VacationStatus::PendingSecretary),
        Just(VacationStatus::SecretaryApproved),
        Just(VacationStatus::FinalApproved),
        Just(VacationStatus::Rejected),
    ]
}

/// Reference definition of the legal edges.
fn is_legal(from: VacationStatus, to: VacationStatus) -> bool {
    matches!(
        (from, to),
        (
            VacationStatus::PendingSecretary,
            VacationStatus::SecretaryApproved | VacationStatus::Rejected
        ) | (
            VacationStatus::SecretaryApproved,
            VacationStatus::FinalApproved | VacationStatus::Rejected
        )
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A transition succeeds exactly when it is a legal edge.
    #[test]
    fn prop_only_legal_edges_succeed(from in arb_status(), to in arb_status()) {
        let result = LeaveWorkflow::transition(from, to);
        if is_legal(from, to) {
            prop_assert!(result.is_ok());
        } else {
            let is_invalid_transition = matches!(
                result,
                Err(LeaveError::InvalidTransition { from: f, to: t }) if f == from && t == to
            );
            prop_assert!(is_invalid_transition);
        }
    }

    /// Leave is applied only on entry into FinalApproved.
    #[test]
    fn prop_apply_only_on_final_approval(from in arb_status(), to in arb_status()) {
        if let Ok(effect) = LeaveWorkflow::transition(from, to) {
            let applies = effect == TransitionEffect::ApplyLeave;
            prop_assert_eq!(applies, to == VacationStatus::FinalApproved);
            prop_assert_ne!(from, VacationStatus::FinalApproved);
        }
    }

    /// Terminal statuses never transition.
    #[test]
    fn prop_terminal_statuses_are_final(to in arb_status()) {
        prop_assert!(!LeaveWorkflow::is_valid_transition(VacationStatus::FinalApproved, to));
        prop_assert!(!LeaveWorkflow::is_valid_transition(VacationStatus::Rejected, to));
    }
}
