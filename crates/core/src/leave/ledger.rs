//! Leave ledger: submission, approval, and balance administration.
//!
//! The ledger is stateless apart from its policy; every operation takes the
//! store it works on. Operations validate everything they can before the
//! first write, so a rejected call leaves the store untouched.

use attendo_shared::types::{MemberId, RequestId};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{info, warn};

use crate::attendance::{AttendanceRecord, AttendanceStatus};
use crate::calendar::business_dates;
use crate::leave::error::LeaveError;
use crate::leave::policy::LeavePolicy;
use crate::leave::types::{VacationBalance, VacationRequest, VacationStatus};
use crate::leave::workflow::{LeaveWorkflow, TransitionEffect};
use crate::store::{BalanceStore, LedgerStore, MemberDirectory, RequestStore};

/// A leave request as filled in by the member.
#[derive(Debug, Clone)]
pub struct LeaveApplication {
    /// The requesting member.
    pub member_id: MemberId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Leave type label.
    pub leave_type: String,
    /// Reason.
    pub reason: String,
}

/// Advisory raised when a deducting request needs more days than remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceWarning {
    /// The member.
    pub member_id: MemberId,
    /// Days the request would consume.
    pub required: Decimal,
    /// Days currently remaining.
    pub remaining: Decimal,
}

impl fmt::Display for BalanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient leave balance for {} (required {} / remaining {})",
            self.member_id,
            self.required.normalize(),
            self.remaining.normalize()
        )
    }
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The stored request, in `PendingSecretary`.
    pub request: VacationRequest,
    /// Present when the request over-draws the balance.
    pub warning: Option<BalanceWarning>,
}

/// Writes performed on final approval.
#[derive(Debug, Clone)]
pub struct AppliedLeave {
    /// Dates that received an EXCUSED record.
    pub dates: Vec<NaiveDate>,
    /// Days added to `used_days`, for deducting types.
    pub deducted: Option<Decimal>,
    /// The balance after deduction, for deducting types.
    pub balance: Option<VacationBalance>,
}

/// Result of a status transition.
#[derive(Debug, Clone)]
pub struct AdvanceOutcome {
    /// The request with its new status.
    pub request: VacationRequest,
    /// Present only for the transition into `FinalApproved`.
    pub applied: Option<AppliedLeave>,
}

/// Vacation-request state machine and balance accounting.
#[derive(Debug, Clone, Default)]
pub struct LeaveLedger {
    policy: LeavePolicy,
}

impl LeaveLedger {
    /// Creates a ledger with the given policy.
    #[must_use]
    pub fn new(policy: LeavePolicy) -> Self {
        Self { policy }
    }

    /// The deduction policy in force.
    #[must_use]
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    fn validate<S>(store: &S, application: &LeaveApplication) -> Result<(), LeaveError>
    where
        S: MemberDirectory,
    {
        if application.member_id.as_str().trim().is_empty() {
            return Err(LeaveError::MissingField("memberId"));
        }
        if application.leave_type.trim().is_empty() {
            return Err(LeaveError::MissingField("type"));
        }
        if application.start_date > application.end_date {
            return Err(LeaveError::InvalidDateRange {
                start: application.start_date,
                end: application.end_date,
            });
        }
        if store.member(&application.member_id)?.is_none() {
            return Err(LeaveError::MemberNotFound(application.member_id.clone()));
        }
        Ok(())
    }

    /// Validates an application and compares its cost with the balance.
    ///
    /// Reads only; a member without a stored balance is measured against the
    /// default allotment without creating one.
    ///
    /// # Returns
    /// * `Ok(None)` for non-deducting types or when the balance covers it
    /// * `Ok(Some(warning))` when the request would over-draw
    pub fn check_balance<S>(
        &self,
        store: &S,
        application: &LeaveApplication,
    ) -> Result<Option<BalanceWarning>, LeaveError>
    where
        S: MemberDirectory + BalanceStore,
    {
        Self::validate(store, application)?;

        let Some(required) = self.policy.days_required(
            &application.leave_type,
            application.start_date,
            application.end_date,
        ) else {
            return Ok(None);
        };

        let remaining = store
            .find_balance(&application.member_id)?
            .map_or(self.policy.default_total_days(), |b| b.remaining());

        Ok((required > remaining).then(|| BalanceWarning {
            member_id: application.member_id.clone(),
            required,
            remaining,
        }))
    }

    /// Submits a leave application.
    ///
    /// The balance check is advisory: an over-drawing request is stored and
    /// the warning is returned alongside it. Neither attendance nor balances
    /// are written.
    ///
    /// # Errors
    /// * `MissingField` / `InvalidDateRange` for bad input
    /// * `MemberNotFound` if the member is not on the roster
    pub fn submit<S>(
        &self,
        store: &mut S,
        application: LeaveApplication,
    ) -> Result<Submission, LeaveError>
    where
        S: LedgerStore,
    {
        let warning = self.check_balance(store, &application)?;

        let request = VacationRequest {
            id: RequestId::new(),
            member_id: application.member_id,
            start_date: application.start_date,
            end_date: application.end_date,
            leave_type: application.leave_type.trim().to_string(),
            reason: application.reason.trim().to_string(),
            status: VacationStatus::PendingSecretary,
            request_date: Utc::now(),
        };
        store.append_request(request.clone())?;

        if let Some(w) = &warning {
            warn!(
                request_id = %request.id,
                member_id = %w.member_id,
                required = %w.required,
                remaining = %w.remaining,
                "Vacation request over-draws leave balance"
            );
        }
        info!(
            request_id = %request.id,
            member_id = %request.member_id,
            leave_type = %request.leave_type,
            start = %request.start_date,
            end = %request.end_date,
            "Vacation request submitted"
        );

        Ok(Submission { request, warning })
    }

    /// Moves a request to `target`.
    ///
    /// On the transition into `FinalApproved` the leave is applied to
    /// attendance and balance. `FinalApproved` has no outgoing edge, so a
    /// repeated final approval fails with `InvalidTransition` and the leave is
    /// applied exactly once. This relies on a single writer.
    ///
    /// The status is written last. If a store write fails, the request keeps
    /// its previous status and the call can be retried; attendance upserts are
    /// idempotent and the balance is written after them.
    pub fn advance<S>(
        &self,
        store: &mut S,
        id: RequestId,
        target: VacationStatus,
    ) -> Result<AdvanceOutcome, LeaveError>
    where
        S: LedgerStore,
    {
        let mut request = store.request(id)?.ok_or(LeaveError::RequestNotFound(id))?;
        let from = request.status;
        let effect = LeaveWorkflow::transition(from, target)?;

        let applied = match effect {
            TransitionEffect::ApplyLeave => Some(self.apply_to_attendance(store, &request)?),
            TransitionEffect::StatusOnly => None,
        };

        store.update_request_status(id, target)?;
        request.status = target;
        info!(request_id = %id, from = %from, to = %target, "Vacation request status changed");

        Ok(AdvanceOutcome { request, applied })
    }

    /// Secretary approval: `PendingSecretary → SecretaryApproved`.
    pub fn approve_by_secretary<S>(
        &self,
        store: &mut S,
        id: RequestId,
    ) -> Result<AdvanceOutcome, LeaveError>
    where
        S: LedgerStore,
    {
        self.advance(store, id, VacationStatus::SecretaryApproved)
    }

    /// Director approval: `SecretaryApproved → FinalApproved`.
    pub fn approve_final<S>(
        &self,
        store: &mut S,
        id: RequestId,
    ) -> Result<AdvanceOutcome, LeaveError>
    where
        S: LedgerStore,
    {
        self.advance(store, id, VacationStatus::FinalApproved)
    }

    /// Rejection from either approval stage.
    pub fn reject<S>(&self, store: &mut S, id: RequestId) -> Result<AdvanceOutcome, LeaveError>
    where
        S: LedgerStore,
    {
        self.advance(store, id, VacationStatus::Rejected)
    }

    fn apply_to_attendance<S>(
        &self,
        store: &mut S,
        request: &VacationRequest,
    ) -> Result<AppliedLeave, LeaveError>
    where
        S: LedgerStore,
    {
        let note = request.attendance_note();
        let dates: Vec<NaiveDate> = business_dates(request.start_date, request.end_date).collect();
        let records: Vec<AttendanceRecord> = dates
            .iter()
            .map(|date| AttendanceRecord {
                note: Some(note.clone()),
                ..AttendanceRecord::new(request.member_id.clone(), *date, AttendanceStatus::Excused)
            })
            .collect();

        let deducted = self.policy.days_required(
            &request.leave_type,
            request.start_date,
            request.end_date,
        );
        let balance = match deducted {
            Some(days) => {
                let mut balance = store.find_balance(&request.member_id)?.unwrap_or_else(|| {
                    VacationBalance::new(
                        request.member_id.clone(),
                        self.policy.default_total_days(),
                    )
                });
                balance.used_days += days;
                Some(balance)
            }
            None => None,
        };

        // Reads are done; writes follow.
        store.upsert_attendance_batch(records)?;
        if let Some(balance) = &balance {
            store.save_balance(balance.clone())?;
        }

        info!(
            request_id = %request.id,
            member_id = %request.member_id,
            days = dates.len(),
            deducted = %deducted.unwrap_or(Decimal::ZERO),
            "Leave applied to attendance"
        );

        Ok(AppliedLeave {
            dates,
            deducted,
            balance,
        })
    }

    /// Every member's balance, creating default entries for members that
    /// have none yet.
    pub fn balances<S>(&self, store: &mut S) -> Result<Vec<VacationBalance>, LeaveError>
    where
        S: MemberDirectory + BalanceStore,
    {
        let members = store.members()?;
        let mut balances = store.balances()?;
        let before = balances.len();

        for member in &members {
            if !balances.iter().any(|b| b.member_id == member.id) {
                balances.push(VacationBalance::new(
                    member.id.clone(),
                    self.policy.default_total_days(),
                ));
            }
        }

        if balances.len() != before {
            store.save_balances(balances.clone())?;
        }
        Ok(balances)
    }

    /// Sets a member's allotment. Usage is left as is.
    pub fn set_total_days<S>(
        &self,
        store: &mut S,
        member_id: &MemberId,
        total_days: Decimal,
    ) -> Result<VacationBalance, LeaveError>
    where
        S: MemberDirectory + BalanceStore,
    {
        if total_days < Decimal::ZERO {
            return Err(LeaveError::NegativeAllotment(total_days));
        }
        if store.member(member_id)?.is_none() {
            return Err(LeaveError::MemberNotFound(member_id.clone()));
        }

        let mut balance = store.balance(member_id, self.policy.default_total_days())?;
        balance.total_days = total_days;
        store.save_balance(balance.clone())?;
        info!(member_id = %member_id, total_days = %total_days, "Leave allotment updated");
        Ok(balance)
    }

    /// All requests, newest submission first.
    pub fn requests_newest_first<S>(store: &S) -> Result<Vec<VacationRequest>, LeaveError>
    where
        S: RequestStore,
    {
        let mut requests = store.requests()?;
        requests.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        Ok(requests)
    }

    /// Requests still waiting on an approver, newest first.
    pub fn awaiting_approval<S>(store: &S) -> Result<Vec<VacationRequest>, LeaveError>
    where
        S: RequestStore,
    {
        Ok(Self::requests_newest_first(store)?
            .into_iter()
            .filter(|r| r.status.is_awaiting_approval())
            .collect())
    }
}
