//! Per-sentence calculation working state.

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

/// Working state for one sentence (or chain) calculation.
///
/// Holds the unadjusted expiry/release day counts and dates produced by the
/// unadjusted calculator, plus three running totals (deducted, added and
/// awarded days) that adjustment application accumulates. This is the only
/// entity mutated incrementally during the pipeline; once adjustment
/// application finishes it is treated as immutable and only the adjusted-date
/// accessors are used.
///
/// The combination policy is fixed:
///
/// - adjusted expiry = unadjusted expiry − min(deducted, days to release) + added
/// - adjusted release = unadjusted release − deducted + added + awarded
///
/// Deductions are capped at the unadjusted days-to-release for the expiry
/// date (a sentence cannot be deducted into negative licence time) but are
/// deliberately uncapped for the release date. No ordering between the
/// adjusted release and expiry dates is guaranteed; awards can push release
/// past expiry under certain recall rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceCalculation {
    /// Expiry date before any adjustments.
    pub unadjusted_expiry_date: NaiveDate,
    /// Release date before any adjustments.
    pub unadjusted_release_date: NaiveDate,
    /// Parole eligibility date before any adjustments, when applicable.
    pub unadjusted_parole_eligibility_date: Option<NaiveDate>,
    /// Post-recall release date before any adjustments, for recalls.
    pub unadjusted_post_recall_release_date: Option<NaiveDate>,
    /// Days from sentence start to nominal expiry (inclusive count).
    pub days_to_expiry: i64,
    /// Days from sentence start to nominal release (rounded up).
    pub days_to_release: i64,
    deducted_days: i64,
    added_days: i64,
    awarded_days: i64,
}

impl SentenceCalculation {
    /// Creates working state from the unadjusted calculator's outputs, with
    /// all adjustment totals at zero.
    pub fn new(
        unadjusted_expiry_date: NaiveDate,
        unadjusted_release_date: NaiveDate,
        unadjusted_parole_eligibility_date: Option<NaiveDate>,
        unadjusted_post_recall_release_date: Option<NaiveDate>,
        days_to_expiry: i64,
        days_to_release: i64,
    ) -> Self {
        Self {
            unadjusted_expiry_date,
            unadjusted_release_date,
            unadjusted_parole_eligibility_date,
            unadjusted_post_recall_release_date,
            days_to_expiry,
            days_to_release,
            deducted_days: 0,
            added_days: 0,
            awarded_days: 0,
        }
    }

    /// Accumulates deducted days (remand, tagged bail).
    pub fn apply_deducted_days(&mut self, days: i64) {
        self.deducted_days += days;
    }

    /// Accumulates added days (unlawfully at large).
    pub fn apply_added_days(&mut self, days: i64) {
        self.added_days += days;
    }

    /// Accumulates awarded days (additional days awarded, net of
    /// restorations).
    pub fn apply_awarded_days(&mut self, days: i64) {
        self.awarded_days += days;
    }

    /// Total deducted days applied so far.
    pub fn deducted_days(&self) -> i64 {
        self.deducted_days
    }

    /// Total added days applied so far.
    pub fn added_days(&self) -> i64 {
        self.added_days
    }

    /// Total awarded days applied so far.
    pub fn awarded_days(&self) -> i64 {
        self.awarded_days
    }

    /// The adjusted expiry date. Deductions are capped at the unadjusted
    /// days-to-release; awarded days never move expiry.
    pub fn adjusted_expiry_date(&self) -> NaiveDate {
        let capped_deduction = self.deducted_days.min(self.days_to_release);
        self.unadjusted_expiry_date + TimeDelta::days(self.added_days - capped_deduction)
    }

    /// The adjusted release date. Deductions are uncapped here.
    pub fn adjusted_release_date(&self) -> NaiveDate {
        self.unadjusted_release_date
            + TimeDelta::days(self.added_days + self.awarded_days - self.deducted_days)
    }

    /// The adjusted parole eligibility date, when one applies.
    pub fn adjusted_parole_eligibility_date(&self) -> Option<NaiveDate> {
        self.unadjusted_parole_eligibility_date
            .map(|d| d + TimeDelta::days(self.added_days + self.awarded_days - self.deducted_days))
    }

    /// The adjusted post-recall release date, when one applies.
    ///
    /// Remand and tagged bail are time served before the original sentence
    /// and do not move a post-recall release; added and awarded days do.
    pub fn adjusted_post_recall_release_date(&self) -> Option<NaiveDate> {
        self.unadjusted_post_recall_release_date
            .map(|d| d + TimeDelta::days(self.added_days + self.awarded_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn calculation() -> SentenceCalculation {
        // The example-13 shape: 20 months from 2015-03-17.
        SentenceCalculation::new(date("2016-11-16"), date("2016-01-16"), None, None, 611, 306)
    }

    /// SC-001: ten deducted days move both dates back ten days
    #[test]
    fn test_deductions_move_both_dates() {
        let mut calc = calculation();
        calc.apply_deducted_days(10);
        assert_eq!(calc.adjusted_expiry_date(), date("2016-11-06"));
        assert_eq!(calc.adjusted_release_date(), date("2016-01-06"));
    }

    /// SC-002: deductions beyond days-to-release are capped for expiry only
    #[test]
    fn test_deduction_cap_asymmetry() {
        let mut calc = calculation();
        calc.apply_deducted_days(400);
        // expiry deduction capped at days_to_release = 306
        assert_eq!(
            calc.adjusted_expiry_date(),
            date("2016-11-16") - TimeDelta::days(306)
        );
        // release deduction uncapped
        assert_eq!(
            calc.adjusted_release_date(),
            date("2016-01-16") - TimeDelta::days(400)
        );
    }

    /// SC-003: awarded days move release but never expiry
    #[test]
    fn test_awarded_days_move_release_only() {
        let mut calc = calculation();
        calc.apply_awarded_days(14);
        assert_eq!(calc.adjusted_expiry_date(), date("2016-11-16"));
        assert_eq!(calc.adjusted_release_date(), date("2016-01-30"));
    }

    /// SC-004: added days move both dates forward
    #[test]
    fn test_added_days_move_both_dates() {
        let mut calc = calculation();
        calc.apply_added_days(5);
        assert_eq!(calc.adjusted_expiry_date(), date("2016-11-21"));
        assert_eq!(calc.adjusted_release_date(), date("2016-01-21"));
    }

    /// SC-005: totals accumulate across repeated application
    #[test]
    fn test_totals_accumulate() {
        let mut calc = calculation();
        calc.apply_deducted_days(4);
        calc.apply_deducted_days(6);
        assert_eq!(calc.deducted_days(), 10);
        assert_eq!(calc.adjusted_release_date(), date("2016-01-06"));
    }

    /// SC-006: post-recall release ignores deductions
    #[test]
    fn test_post_recall_release_ignores_deductions() {
        let mut calc = SentenceCalculation::new(
            date("2016-11-16"),
            date("2016-01-16"),
            None,
            Some(date("2016-05-14")),
            611,
            306,
        );
        calc.apply_deducted_days(10);
        calc.apply_awarded_days(3);
        assert_eq!(
            calc.adjusted_post_recall_release_date(),
            Some(date("2016-05-17"))
        );
    }
}
