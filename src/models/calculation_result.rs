//! Calculation result models.
//!
//! The [`CalculationResult`] captures everything a calculation run produces:
//! one [`SentenceResult`] per single sentence or consecutive chain, each with
//! its typed date map and a day-count breakdown suitable for an audit or
//! breakdown view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::ReleaseDateType;

/// Day-count breakdown for one sentence or chain.
///
/// Records the unadjusted dates the calculator produced and the adjustment
/// totals that were applied to reach the final dates, so a reviewer can
/// reconstruct the arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBreakdown {
    /// Days from sentence start to nominal expiry.
    pub days_to_expiry: i64,
    /// Days from sentence start to nominal release.
    pub days_to_release: i64,
    /// Expiry date before adjustments.
    pub unadjusted_expiry_date: NaiveDate,
    /// Release date before adjustments.
    pub unadjusted_release_date: NaiveDate,
    /// Total deducted days (remand, tagged bail).
    pub deducted_days: i64,
    /// Total added days (unlawfully at large).
    pub added_days: i64,
    /// Total awarded days (additional days awarded, net of restorations).
    pub awarded_days: i64,
}

/// The dates produced for one single sentence or consecutive chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceResult {
    /// The IDs of the sentences this result covers, in served order. A
    /// single sentence yields one ID; a chain yields the member IDs.
    pub sentence_ids: Vec<String>,
    /// The externally visible dates, keyed by release-date type.
    pub dates: BTreeMap<ReleaseDateType, NaiveDate>,
    /// The day-count breakdown behind the dates.
    pub breakdown: DateBreakdown,
}

/// The complete result of a booking calculation.
///
/// # Example
///
/// ```
/// use sentence_engine::models::CalculationResult;
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = CalculationResult {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: env!("CARGO_PKG_VERSION").to_string(),
///     offender_reference: "A1234BC".to_string(),
///     results: vec![],
/// };
/// assert!(result.results.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation run.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The offender the calculation is for.
    pub offender_reference: String,
    /// One result per single sentence or consecutive chain.
    pub results: Vec<SentenceResult>,
}
