//! Business-day calendar arithmetic.
//!
//! A business day is Monday through Friday. Ranges are inclusive of both
//! endpoints. The same iterator backs the leave estimate shown at submission
//! and the deduction applied at final approval, so the two cannot drift.

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns true if the date falls on Monday through Friday.
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Iterates over the business days in `[start, end]`.
///
/// Yields nothing when `start > end`.
pub fn business_dates(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |day| *day <= end)
        .filter(|day| is_business_day(*day))
}

/// Counts the business days in `[start, end]`.
#[must_use]
pub fn business_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    business_dates(start, end).fold(0, |count, _| count + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    // Monday..Friday
    #[case(date(2024, 3, 4), date(2024, 3, 8), 5)]
    // Single weekday
    #[case(date(2024, 3, 6), date(2024, 3, 6), 1)]
    // Saturday only
    #[case(date(2024, 3, 9), date(2024, 3, 9), 0)]
    // Weekend pair
    #[case(date(2024, 3, 9), date(2024, 3, 10), 0)]
    // Friday..Monday spans a weekend
    #[case(date(2024, 3, 8), date(2024, 3, 11), 2)]
    // Two full weeks
    #[case(date(2024, 3, 4), date(2024, 3, 17), 10)]
    // Across a month boundary (leap year)
    #[case(date(2024, 2, 28), date(2024, 3, 1), 3)]
    // Reversed range
    #[case(date(2024, 3, 8), date(2024, 3, 4), 0)]
    fn test_business_day_count(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: u32,
    ) {
        assert_eq!(business_day_count(start, end), expected);
    }

    #[test]
    fn test_business_dates_skip_weekend() {
        let dates: Vec<_> = business_dates(date(2024, 3, 8), date(2024, 3, 11)).collect();
        assert_eq!(dates, vec![date(2024, 3, 8), date(2024, 3, 11)]);
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|offset| date(2020, 1, 1) + chrono::Duration::days(offset))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any 7 consecutive days contain exactly 5 business days.
        #[test]
        fn prop_full_week_has_five_business_days(start in arb_date()) {
            let end = start + chrono::Duration::days(6);
            prop_assert_eq!(business_day_count(start, end), 5);
        }

        /// Count never exceeds the number of calendar days in the range.
        #[test]
        fn prop_count_bounded_by_calendar_days(start in arb_date(), len in 0i64..60) {
            let end = start + chrono::Duration::days(len);
            let calendar_days = u32::try_from(len + 1).unwrap();
            prop_assert!(business_day_count(start, end) <= calendar_days);
        }

        /// Splitting a range at any point preserves the total count.
        #[test]
        fn prop_count_is_additive(start in arb_date(), a in 0i64..30, b in 1i64..30) {
            let mid = start + chrono::Duration::days(a);
            let end = mid + chrono::Duration::days(b);
            let left = business_day_count(start, mid);
            let right = business_day_count(mid + chrono::Duration::days(1), end);
            prop_assert_eq!(business_day_count(start, end), left + right);
        }
    }
}
