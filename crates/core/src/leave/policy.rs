//! Leave deduction policy.
//!
//! The set of deducting leave types is an explicit list taken from
//! configuration. A label is matched exactly (after trimming); anything not
//! listed, such as `공가` or `병가`, never touches a balance.

use attendo_shared::LeaveConfig;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calendar::business_day_count;

/// How a deducting leave type consumes balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deduction {
    /// One day per business day in the range.
    BusinessDays,
    /// Half a day regardless of the range.
    HalfDay,
}

/// Leave deduction policy.
#[derive(Debug, Clone)]
pub struct LeavePolicy {
    default_total_days: Decimal,
    annual_types: Vec<String>,
    half_day_types: Vec<String>,
}

impl LeavePolicy {
    /// Creates a policy from explicit type lists.
    #[must_use]
    pub fn new(
        default_total_days: Decimal,
        annual_types: Vec<String>,
        half_day_types: Vec<String>,
    ) -> Self {
        Self {
            default_total_days,
            annual_types,
            half_day_types,
        }
    }

    /// Creates a policy from the `[leave]` configuration section.
    #[must_use]
    pub fn from_config(config: &LeaveConfig) -> Self {
        Self::new(
            config.default_total_days,
            config.annual_types.clone(),
            config.half_day_types.clone(),
        )
    }

    /// Allotment for a lazily created balance.
    #[must_use]
    pub fn default_total_days(&self) -> Decimal {
        self.default_total_days
    }

    /// Classifies a leave type label.
    #[must_use]
    pub fn deduction(&self, leave_type: &str) -> Option<Deduction> {
        let leave_type = leave_type.trim();
        if self.half_day_types.iter().any(|t| t == leave_type) {
            Some(Deduction::HalfDay)
        } else if self.annual_types.iter().any(|t| t == leave_type) {
            Some(Deduction::BusinessDays)
        } else {
            None
        }
    }

    /// Days a request of this type and range consumes, or `None` for
    /// non-deducting types.
    ///
    /// Used both for the advisory estimate at submission and for the actual
    /// deduction at final approval.
    #[must_use]
    pub fn days_required(
        &self,
        leave_type: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<Decimal> {
        self.deduction(leave_type).map(|deduction| match deduction {
            Deduction::HalfDay => Decimal::new(5, 1),
            Deduction::BusinessDays => Decimal::from(business_day_count(start, end)),
        })
    }
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self::from_config(&LeaveConfig::default())
    }
}
