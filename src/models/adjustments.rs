//! Adjustment records and aggregation.
//!
//! Adjustments are day-count corrections sourced from an external
//! adjustments service: time on remand or tagged bail is deducted from a
//! sentence, time unlawfully at large is added, and additional days can be
//! awarded (and later restored) for disciplinary matters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The type of a day-count adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    /// Time held on remand before sentencing.
    Remand,
    /// Time on qualifying tagged bail before sentencing.
    TaggedBail,
    /// Time unlawfully at large after sentencing.
    UnlawfullyAtLarge,
    /// Additional days awarded under prison discipline.
    AdditionalDaysAwarded,
    /// Restoration of previously awarded additional days.
    RestorationOfAdditionalDaysAwarded,
}

/// A single adjustment record.
///
/// `number_of_days` is always non-negative; the record's direction comes
/// from its [`AdjustmentType`], not its sign. Overlapping records are
/// summed, not deduplicated; the caller is responsible for ensuring
/// records represent non-duplicated days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// The date the adjustment period starts (its qualifying date).
    pub from_date: NaiveDate,
    /// The date the adjustment period ends, if recorded.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    /// The number of days the record contributes.
    pub number_of_days: u32,
}

/// All adjustment records for a booking, keyed by type.
///
/// # Example
///
/// ```
/// use sentence_engine::models::{Adjustment, Adjustments, AdjustmentType};
/// use chrono::NaiveDate;
///
/// let mut adjustments = Adjustments::default();
/// adjustments.add(
///     AdjustmentType::Remand,
///     Adjustment {
///         from_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
///         to_date: Some(NaiveDate::from_ymd_opt(2021, 1, 10).unwrap()),
///         number_of_days: 10,
///     },
/// );
/// let cutoff = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
/// assert_eq!(adjustments.get_or_zero(&[AdjustmentType::Remand], cutoff, None), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Adjustments {
    adjustments: HashMap<AdjustmentType, Vec<Adjustment>>,
}

impl Adjustments {
    /// Creates an adjustments set from a prepared map.
    pub fn new(adjustments: HashMap<AdjustmentType, Vec<Adjustment>>) -> Self {
        Self { adjustments }
    }

    /// Appends a record under the given type.
    pub fn add(&mut self, adjustment_type: AdjustmentType, record: Adjustment) {
        self.adjustments
            .entry(adjustment_type)
            .or_default()
            .push(record);
    }

    /// Sums the days of all records of the given types whose qualifying date
    /// falls at or before `before` and, when `after` is supplied, strictly
    /// after it.
    ///
    /// A requested type with no records contributes zero; this is
    /// indistinguishable from "records present but all excluded by the date
    /// window", which downstream code does not currently need to tell apart.
    pub fn get_or_zero(
        &self,
        types: &[AdjustmentType],
        before: NaiveDate,
        after: Option<NaiveDate>,
    ) -> i64 {
        types
            .iter()
            .filter_map(|t| self.adjustments.get(t))
            .flatten()
            .filter(|record| record.from_date <= before)
            .filter(|record| after.is_none_or(|a| record.from_date > a))
            .map(|record| i64::from(record.number_of_days))
            .sum()
    }
}
