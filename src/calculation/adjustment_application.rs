//! Application of adjustment totals to a calculated sentence.
//!
//! Remand and tagged bail qualifying at or before the sentencing date are
//! deducted; time unlawfully at large after sentencing is added; additional
//! days awarded after sentencing (net of restorations) are awarded. The
//! arithmetic combining the totals with the unadjusted dates lives on
//! [`SentenceCalculation`](crate::models::SentenceCalculation); this module
//! only derives the totals and feeds them in.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AdjustmentType, Adjustments};

use super::consecutive::CalculableSentence;

/// Derives the three adjustment totals for a sentence and applies them to
/// its calculation. The calculation must already be initialised.
pub fn apply_adjustments(
    sentence: &mut CalculableSentence,
    adjustments: &Adjustments,
) -> EngineResult<()> {
    let sentenced_at = sentence.sentenced_at();

    let deducted = adjustments.get_or_zero(
        &[AdjustmentType::Remand, AdjustmentType::TaggedBail],
        sentenced_at,
        None,
    );
    let added = adjustments.get_or_zero(
        &[AdjustmentType::UnlawfullyAtLarge],
        NaiveDate::MAX,
        Some(sentenced_at),
    );
    let awarded_gross = adjustments.get_or_zero(
        &[AdjustmentType::AdditionalDaysAwarded],
        NaiveDate::MAX,
        Some(sentenced_at),
    );
    let restored = adjustments.get_or_zero(
        &[AdjustmentType::RestorationOfAdditionalDaysAwarded],
        NaiveDate::MAX,
        Some(sentenced_at),
    );
    let awarded = (awarded_gross - restored).max(0);

    debug!(
        sentence_id = %sentence.primary_id(),
        deducted,
        added,
        awarded,
        "applying adjustment totals"
    );

    let calculation = sentence.calculation_mut()?;
    calculation.apply_deducted_days(deducted);
    calculation.apply_added_days(added);
    calculation.apply_awarded_days(awarded);
    Ok(())
}
