//! Unadjusted release date calculation.
//!
//! Computes, before any adjustments, the day counts from sentence start to
//! nominal expiry and nominal release, given a release-point multiplier
//! policy. Consecutive chains are processed group-by-group: members sharing
//! a multiplier are grouped in first-appearance order, and parole-bearing
//! members form a final group of their own. Every release-point rounding is
//! a ceiling; a fractional product never releases a day early.

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Duration, RecallType, ReleaseDateType, Sentence, SentenceCalculation,
};

use super::consecutive::{CalculableSentence, ConsecutiveSentence};
use super::multiplier::ReleasePointPolicy;

/// The unadjusted day counts for one sentence or chain.
///
/// A pure value: recompute it by calling [`calculate_unadjusted`] again
/// whenever its inputs (notably the release-point policy) change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseDateCalculation {
    /// Days from sentence start to nominal expiry (inclusive count).
    pub days_to_expiry: i64,
    /// The fractional multiplier product, before rounding.
    pub days_to_release_exact: f64,
    /// Days from sentence start to nominal release, rounded up.
    pub days_to_release: i64,
    /// Days from sentence start to parole eligibility, when applicable.
    pub days_to_parole_eligibility: Option<i64>,
}

/// Computes the unadjusted day counts for a sentence or chain.
pub fn calculate_unadjusted(
    sentence: &CalculableSentence,
    policy: &ReleasePointPolicy,
) -> EngineResult<ReleaseDateCalculation> {
    let requires_ped = sentence
        .release_date_types()?
        .contains(&ReleaseDateType::Ped);
    match sentence {
        CalculableSentence::Single(single) => calculate_single(single, policy, requires_ped),
        CalculableSentence::Consecutive(chain) => calculate_chain(chain, policy, requires_ped),
    }
}

fn calculate_single(
    sentence: &Sentence,
    policy: &ReleasePointPolicy,
    requires_ped: bool,
) -> EngineResult<ReleaseDateCalculation> {
    let days_to_expiry = sentence.length_in_days();
    let custodial_days = sentence.custodial_length_in_days();
    let multiplier = policy.multiplier_for(sentence)?;
    let exact = custodial_days as f64 * multiplier;
    let days_to_release = exact.ceil() as i64;

    // Recalls never carry parole eligibility; unsupported types are simply
    // omitted rather than failing.
    let days_to_parole_eligibility = if requires_ped && !sentence.is_recall() {
        ReleasePointPolicy::parole_eligibility_multiplier(sentence.track()?)
            .map(|ped_multiplier| (days_to_release as f64 * ped_multiplier).ceil() as i64)
    } else {
        None
    };

    debug!(
        sentence_id = %sentence.id,
        days_to_expiry,
        days_to_release,
        multiplier,
        "calculated unadjusted single sentence"
    );

    Ok(ReleaseDateCalculation {
        days_to_expiry,
        days_to_release_exact: exact,
        days_to_release,
        days_to_parole_eligibility,
    })
}

fn calculate_chain(
    chain: &ConsecutiveSentence,
    policy: &ReleasePointPolicy,
    requires_ped: bool,
) -> EngineResult<ReleaseDateCalculation> {
    let days_to_expiry = chain.length_in_days()?;

    // DTO-only chains release against the merged (and possibly capped)
    // single term, not against a fold of member durations.
    if chain.is_dto_only() {
        let multiplier = policy.multiplier_for(&chain.members()[0])?;
        let exact = days_to_expiry as f64 * multiplier;
        return Ok(ReleaseDateCalculation {
            days_to_expiry,
            days_to_release_exact: exact,
            days_to_release: exact.ceil() as i64,
            days_to_parole_eligibility: None,
        });
    }

    // Partition parole-bearing members (discretionary extended, SOPC) out;
    // group the rest by multiplier value in first-appearance order. The
    // grouping is stable, not sorted: [0.5, 0.667, 0.5] becomes the groups
    // [0.5, 0.5] then [0.667].
    let mut ped_members: Vec<&Sentence> = Vec::new();
    let mut groups: Vec<(f64, Vec<&Sentence>)> = Vec::new();
    for member in chain.members() {
        if member.track()?.has_parole_eligibility() {
            ped_members.push(member);
            continue;
        }
        let multiplier = policy.multiplier_for(member)?;
        match groups.iter_mut().find(|(m, _)| *m == multiplier) {
            Some((_, members)) => members.push(member),
            None => groups.push((multiplier, vec![member])),
        }
    }

    let mut start = chain.sentenced_at();
    let mut days_to_release = 0i64;
    let mut days_to_release_exact = 0f64;
    for (multiplier, members) in &groups {
        let group_days = group_custodial_days(start, members);
        let group_exact = group_days as f64 * multiplier;
        let group_release = group_exact.ceil() as i64;
        days_to_release += group_release;
        days_to_release_exact += group_exact;
        // The next group starts the day after this group's notional release.
        start += TimeDelta::days(group_release);
    }

    let mut days_to_parole_eligibility = None;
    if !ped_members.is_empty() {
        let multiplier = policy.multiplier_for(ped_members[0])?;
        let group_days = group_custodial_days(start, &ped_members);
        let group_exact = group_days as f64 * multiplier;
        let group_release = group_exact.ceil() as i64;
        if requires_ped && !chain.is_recall() {
            days_to_parole_eligibility =
                ReleasePointPolicy::parole_eligibility_multiplier(ped_members[0].track()?).map(
                    |ped_multiplier| {
                        days_to_release + (group_release as f64 * ped_multiplier).ceil() as i64
                    },
                );
        }
        days_to_release += group_release;
        days_to_release_exact += group_exact;
    }

    debug!(
        chain_start = %chain.sentenced_at(),
        member_count = chain.members().len(),
        group_count = groups.len(),
        days_to_expiry,
        days_to_release,
        "calculated unadjusted consecutive chain"
    );

    Ok(ReleaseDateCalculation {
        days_to_expiry,
        days_to_release_exact,
        days_to_release,
        days_to_parole_eligibility,
    })
}

/// The day count of a group's combined custodial duration from `start`.
fn group_custodial_days(start: NaiveDate, members: &[&Sentence]) -> i64 {
    let combined = members.iter().fold(Duration::default(), |acc, member| {
        acc.append_all(&member.custodial_duration())
    });
    combined.length_in_days(start)
}

/// Turns the unadjusted day counts into dated working state, resolving the
/// post-recall release date for recalled sentences.
///
/// Standard recalls release at the unadjusted expiry date. Fixed-term
/// recalls release `N - 1` days after the return-to-custody date, which must
/// be present. `STANDARD_RECALL_255` is explicitly unsupported and fails
/// rather than approximating; so does a recalled sentence with no recall
/// type.
pub fn build_sentence_calculation(
    sentence: &CalculableSentence,
    calculation: &ReleaseDateCalculation,
    return_to_custody_date: Option<NaiveDate>,
) -> EngineResult<SentenceCalculation> {
    let start = sentence.sentenced_at();
    let unadjusted_expiry_date = start + TimeDelta::days(calculation.days_to_expiry - 1);
    let unadjusted_release_date = start + TimeDelta::days(calculation.days_to_release - 1);
    let unadjusted_parole_eligibility_date = calculation
        .days_to_parole_eligibility
        .map(|days| start + TimeDelta::days(days - 1));

    let unadjusted_post_recall_release_date = if sentence.is_recall() {
        match sentence.recall() {
            None => {
                return Err(EngineError::MissingRecallType {
                    sentence_id: sentence.primary_id().to_string(),
                });
            }
            Some(RecallType::StandardRecall) => Some(unadjusted_expiry_date),
            Some(RecallType::StandardRecall255) => {
                return Err(EngineError::UnsupportedRecallType {
                    sentence_id: sentence.primary_id().to_string(),
                    recall: RecallType::StandardRecall255.to_string(),
                });
            }
            Some(fixed_term) => {
                let days = fixed_term.fixed_term_days().ok_or_else(|| {
                    EngineError::MissingRecallType {
                        sentence_id: sentence.primary_id().to_string(),
                    }
                })?;
                let returned = return_to_custody_date.ok_or_else(|| {
                    EngineError::MissingReturnToCustodyDate {
                        sentence_id: sentence.primary_id().to_string(),
                    }
                })?;
                Some(returned + TimeDelta::days(days - 1))
            }
        }
    } else {
        None
    };

    Ok(SentenceCalculation::new(
        unadjusted_expiry_date,
        unadjusted_release_date,
        unadjusted_parole_eligibility_date,
        unadjusted_post_recall_release_date,
        calculation.days_to_expiry,
        calculation.days_to_release,
    ))
}
