//! The booking calculation pipeline.
//!
//! Orchestrates one calculation run end-to-end: attach the external
//! classifier's track assignments, derive enhanced-release facts, assemble
//! consecutive chains, compute unadjusted dates, apply adjustments, and
//! select the externally visible dates per sentence. A failure for any
//! sentence fails the whole booking; the engine never emits a partial date
//! set for a sentence.

use chrono::{TimeDelta, Utc};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::config::EligibilityConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Booking, CalculationResult, DateBreakdown, Offender, ReleaseDateType, SentenceResult,
};

use super::adjustment_application::apply_adjustments;
use super::consecutive::{CalculableSentence, assemble};
use super::eligibility::classify_sds_plus;
use super::multiplier::ReleasePointPolicy;
use super::unadjusted::{build_sentence_calculation, calculate_unadjusted};

/// Days before the adjusted release date at which home detention curfew
/// eligibility opens.
const HDC_WINDOW_DAYS: i64 = 180;

/// The statutory minimum days in custody before curfew eligibility.
const HDC_MINIMUM_CUSTODY_DAYS: i64 = 28;

/// Runs a full calculation for one booking.
///
/// The policy is the one swappable dependency: to honour a rules change,
/// call this again with the new policy. Recomputation is explicit, never
/// implicit.
///
/// # Example
///
/// ```no_run
/// use sentence_engine::calculation::{ReleasePointPolicy, calculate_booking};
/// use sentence_engine::config::ConfigLoader;
/// # fn booking() -> sentence_engine::models::Booking { unimplemented!() }
///
/// let config = ConfigLoader::load("./config/sds_plus")?;
/// let result = calculate_booking(booking(), config.eligibility(), &ReleasePointPolicy::standard())?;
/// for sentence in &result.results {
///     println!("{:?}: {:?}", sentence.sentence_ids, sentence.dates);
/// }
/// # Ok::<(), sentence_engine::error::EngineError>(())
/// ```
pub fn calculate_booking(
    mut booking: Booking,
    config: &EligibilityConfig,
    policy: &ReleasePointPolicy,
) -> EngineResult<CalculationResult> {
    debug!(
        offender = %booking.offender.reference,
        sentence_count = booking.sentences.len(),
        "starting booking calculation"
    );

    for sentence in &mut booking.sentences {
        let classification = booking.classifications.get(&sentence.id).ok_or_else(|| {
            EngineError::MissingClassification {
                sentence_id: sentence.id.clone(),
            }
        })?;
        sentence.initialise_track(
            classification.track,
            classification.release_date_types.clone(),
        )?;
        let facts = classify_sds_plus(sentence, config);
        sentence.set_sds_plus_eligibility(facts)?;
    }

    let offender = booking.offender.clone();
    let calculables = assemble(booking.sentences)?;

    let mut results = Vec::with_capacity(calculables.len());
    for mut calculable in calculables {
        let unadjusted = calculate_unadjusted(&calculable, policy)?;
        let calculation =
            build_sentence_calculation(&calculable, &unadjusted, booking.return_to_custody_date)?;
        calculable.initialise_calculation(calculation)?;
        apply_adjustments(&mut calculable, &booking.adjustments)?;
        results.push(visible_dates(&calculable, &offender)?);
    }

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        offender_reference: offender.reference,
        results,
    })
}

/// Selects the externally visible dates for one calculated sentence.
///
/// Visibility is a presence query over the sentence's release-date-type
/// set: SLED wins over SED/LED for expiry, CRD over ARD for release, and
/// PED/PRRD/HDCED appear only when both typed and applicable, so the
/// output always agrees with the classified set.
fn visible_dates(
    calculable: &CalculableSentence,
    offender: &Offender,
) -> EngineResult<SentenceResult> {
    let types = calculable.release_date_types()?;
    let calculation = calculable.calculation()?;

    let mut dates = BTreeMap::new();
    let expiry = calculation.adjusted_expiry_date();
    if types.contains(&ReleaseDateType::Sled) {
        dates.insert(ReleaseDateType::Sled, expiry);
    } else {
        if types.contains(&ReleaseDateType::Sed) {
            dates.insert(ReleaseDateType::Sed, expiry);
        }
        if types.contains(&ReleaseDateType::Led) {
            dates.insert(ReleaseDateType::Led, expiry);
        }
    }

    let release = calculation.adjusted_release_date();
    if types.contains(&ReleaseDateType::Crd) {
        dates.insert(ReleaseDateType::Crd, release);
    } else if types.contains(&ReleaseDateType::Ard) {
        dates.insert(ReleaseDateType::Ard, release);
    }

    if types.contains(&ReleaseDateType::Ped) {
        if let Some(ped) = calculation.adjusted_parole_eligibility_date() {
            dates.insert(ReleaseDateType::Ped, ped);
        }
    }

    if types.contains(&ReleaseDateType::Prrd) {
        if let Some(post_recall) = calculation.adjusted_post_recall_release_date() {
            dates.insert(ReleaseDateType::Prrd, post_recall);
        }
    }

    if types.contains(&ReleaseDateType::Hdced) {
        if let Some(hdced) = home_detention_curfew_date(calculable, offender)? {
            dates.insert(ReleaseDateType::Hdced, hdced);
        }
    }

    Ok(SentenceResult {
        sentence_ids: calculable.sentence_ids(),
        dates,
        breakdown: DateBreakdown {
            days_to_expiry: calculation.days_to_expiry,
            days_to_release: calculation.days_to_release,
            unadjusted_expiry_date: calculation.unadjusted_expiry_date,
            unadjusted_release_date: calculation.unadjusted_release_date,
            deducted_days: calculation.deducted_days(),
            added_days: calculation.added_days(),
            awarded_days: calculation.awarded_days(),
        },
    })
}

/// Home detention curfew eligibility: 180 days before the adjusted release,
/// floored at 28 days into the sentence. Not produced for recalls, for
/// sentences with an extended or SOPC component, for offenders under 18 at
/// sentencing, or when it would not precede the adjusted release date.
fn home_detention_curfew_date(
    calculable: &CalculableSentence,
    offender: &Offender,
) -> EngineResult<Option<chrono::NaiveDate>> {
    if calculable.is_recall() || calculable.has_any_eds_or_sopc() {
        return Ok(None);
    }
    let sentenced_at = calculable.sentenced_at();
    if offender.age_on(sentenced_at) < 18 {
        return Ok(None);
    }
    let release = calculable.calculation()?.adjusted_release_date();
    let earliest = sentenced_at + TimeDelta::days(HDC_MINIMUM_CUSTODY_DAYS);
    let hdced = (release - TimeDelta::days(HDC_WINDOW_DAYS)).max(earliest);
    if hdced < release {
        Ok(Some(hdced))
    } else {
        Ok(None)
    }
}
