//! Release-point multiplier policy.
//!
//! The fraction of a custodial term served before release eligibility is
//! supplied by an external policy component and can change at runtime (for
//! example when tranche commencement moves a cohort from halfway to
//! two-thirds release). Rather than observing a mutable property, callers
//! hold a [`ReleasePointPolicy`] and explicitly recompute unadjusted dates
//! whenever they swap it; the unadjusted calculator is a pure function of
//! the policy, so recomputation points stay auditable.

use crate::error::EngineResult;
use crate::models::{IdentificationTrack, Sentence};

/// Two-thirds release point.
pub const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Halfway release point.
pub const HALFWAY: f64 = 0.5;

/// The multiplier function applied to a sentence's custodial term.
pub type MultiplierFn = dyn Fn(IdentificationTrack, &Sentence) -> f64 + Send + Sync;

/// A swappable release-point policy.
///
/// # Example
///
/// ```
/// use sentence_engine::calculation::ReleasePointPolicy;
///
/// let policy = ReleasePointPolicy::standard();
/// // A bespoke policy for a rules change:
/// let flat = ReleasePointPolicy::new(|_track, _sentence| 0.5);
/// ```
pub struct ReleasePointPolicy {
    multiplier: Box<MultiplierFn>,
}

impl ReleasePointPolicy {
    /// Wraps an arbitrary multiplier function.
    pub fn new(
        multiplier: impl Fn(IdentificationTrack, &Sentence) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            multiplier: Box::new(multiplier),
        }
    }

    /// The statutory default policy.
    ///
    /// Standard determinate sentences release at halfway unless classified
    /// enhanced (SDS+), which moves them to two-thirds. Automatic-release
    /// extended sentences release at two-thirds of the custodial term;
    /// discretionary extended and SOPC sentences serve the full custodial
    /// term with parole eligibility earlier. DTO and fine-default terms
    /// release at halfway.
    pub fn standard() -> Self {
        Self::new(|track, sentence| {
            if sentence.is_enhanced() {
                return TWO_THIRDS;
            }
            match track {
                IdentificationTrack::SdsBeforeCjaLaspo
                | IdentificationTrack::SdsStandardRelease => HALFWAY,
                IdentificationTrack::SdsPlusRelease => TWO_THIRDS,
                IdentificationTrack::EdsAutomaticRelease => TWO_THIRDS,
                IdentificationTrack::EdsDiscretionaryRelease => 1.0,
                IdentificationTrack::SopcPedAtHalfway
                | IdentificationTrack::SopcPedAtTwoThirds => 1.0,
                IdentificationTrack::Dto => HALFWAY,
                IdentificationTrack::AFine => HALFWAY,
                IdentificationTrack::Botus => 1.0,
            }
        })
    }

    /// The release-point multiplier for a classified sentence.
    pub fn multiplier_for(&self, sentence: &Sentence) -> EngineResult<f64> {
        let track = sentence.track()?;
        Ok((self.multiplier)(track, sentence))
    }

    /// The type-specific parole-eligibility multiplier, for tracks that
    /// carry one: two-thirds for discretionary extended and two-thirds SOPC
    /// tracks, halfway for the halfway SOPC track.
    pub fn parole_eligibility_multiplier(track: IdentificationTrack) -> Option<f64> {
        match track {
            IdentificationTrack::EdsDiscretionaryRelease
            | IdentificationTrack::SopcPedAtTwoThirds => Some(TWO_THIRDS),
            IdentificationTrack::SopcPedAtHalfway => Some(HALFWAY),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ReleasePointPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleasePointPolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Duration, Offence, SentenceKind};
    use chrono::NaiveDate;

    fn sentence_with_track(track: IdentificationTrack) -> Sentence {
        let mut sentence = Sentence::new(
            "sent_001",
            Offence {
                code: "COML025".to_string(),
                description: None,
                committed_at: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            },
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            SentenceKind::StandardDeterminate {
                duration: Duration::from_months(12),
                section_250: false,
            },
        );
        sentence.initialise_track(track, vec![]).unwrap();
        sentence
    }

    /// MU-001: the statutory default maps tracks to release points
    #[test]
    fn test_standard_policy_track_mapping() {
        let policy = ReleasePointPolicy::standard();
        let halfway = sentence_with_track(IdentificationTrack::SdsStandardRelease);
        assert_eq!(policy.multiplier_for(&halfway).unwrap(), HALFWAY);
        let plus = sentence_with_track(IdentificationTrack::SdsPlusRelease);
        assert_eq!(policy.multiplier_for(&plus).unwrap(), TWO_THIRDS);
        let eds = sentence_with_track(IdentificationTrack::EdsDiscretionaryRelease);
        assert_eq!(policy.multiplier_for(&eds).unwrap(), 1.0);
    }

    /// MU-002: enhanced classification overrides the track's default point
    #[test]
    fn test_enhanced_sentence_takes_two_thirds() {
        use crate::models::SdsPlusEligibility;
        let policy = ReleasePointPolicy::standard();
        let mut sentence = sentence_with_track(IdentificationTrack::SdsStandardRelease);
        sentence
            .set_sds_plus_eligibility(SdsPlusEligibility {
                eligible_type_length_and_offence: true,
                offence_in_qualifying_period: true,
                is_enhanced: true,
            })
            .unwrap();
        assert_eq!(policy.multiplier_for(&sentence).unwrap(), TWO_THIRDS);
    }

    /// MU-003: an unclassified sentence cannot be given a multiplier
    #[test]
    fn test_multiplier_requires_initialised_track() {
        let policy = ReleasePointPolicy::standard();
        let sentence = Sentence::new(
            "sent_002",
            Offence {
                code: "COML025".to_string(),
                description: None,
                committed_at: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            },
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            SentenceKind::StandardDeterminate {
                duration: Duration::from_months(12),
                section_250: false,
            },
        );
        assert!(policy.multiplier_for(&sentence).is_err());
    }

    /// MU-004: parole-eligibility multipliers are fixed per track
    #[test]
    fn test_parole_eligibility_multipliers() {
        assert_eq!(
            ReleasePointPolicy::parole_eligibility_multiplier(
                IdentificationTrack::EdsDiscretionaryRelease
            ),
            Some(TWO_THIRDS)
        );
        assert_eq!(
            ReleasePointPolicy::parole_eligibility_multiplier(
                IdentificationTrack::SopcPedAtHalfway
            ),
            Some(HALFWAY)
        );
        assert_eq!(
            ReleasePointPolicy::parole_eligibility_multiplier(
                IdentificationTrack::SdsStandardRelease
            ),
            None
        );
    }

    /// MU-005: a swapped policy yields different multipliers for the same input
    #[test]
    fn test_policy_swap_changes_multiplier() {
        let sentence = sentence_with_track(IdentificationTrack::SdsStandardRelease);
        let standard = ReleasePointPolicy::standard();
        let emergency = ReleasePointPolicy::new(|_track, _sentence| 0.4);
        assert_eq!(standard.multiplier_for(&sentence).unwrap(), 0.5);
        assert_eq!(emergency.multiplier_for(&sentence).unwrap(), 0.4);
    }
}
