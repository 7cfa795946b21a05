//! Sentence model and the tagged sentence-kind family.
//!
//! A [`Sentence`] couples identity data (offence, sentencing date, recall
//! status, consecutive chain link) with a [`SentenceKind`] variant that knows
//! how its own nominal length is measured. Computed state (the identification
//! track assigned by the external classifier, enhanced-release facts, and the
//! sentence calculation itself) is late-bound: it lives in an explicit
//! optional state record that is populated exactly once, and reading it
//! before population is a typed error.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{
    Duration, IdentificationTrack, Offence, RecallType, ReleaseDateType, SentenceCalculation,
};

/// The sentence-type variant, tagged for serde.
///
/// Each variant carries the duration data its length rule needs. Length
/// computation differs per variant; see [`Sentence::length_in_days_from`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentenceKind {
    /// A standard determinate sentence.
    StandardDeterminate {
        /// The imposed term.
        duration: Duration,
        /// True when imposed under the s.250 youth provision; feeds the
        /// enhanced-eligibility statutory category.
        #[serde(default)]
        section_250: bool,
    },
    /// An extended determinate sentence: custodial term plus an extension
    /// licence period served sequentially.
    ExtendedDeterminate {
        /// The custodial term.
        custodial: Duration,
        /// The extension period, beginning the day after the custodial term.
        extension: Duration,
        /// True for automatic conditional release, false for discretionary
        /// (parole board) release.
        automatic_release: bool,
    },
    /// A special custodial sentence for offenders of particular concern:
    /// custodial term and extension merged into one continuous period.
    Sopc {
        /// The custodial term.
        custodial: Duration,
        /// The extended licence period, merged unit-wise with the custodial
        /// term rather than sequenced after it.
        extension: Duration,
    },
    /// A term imposed in default of paying a fine.
    AFine {
        /// The default term.
        duration: Duration,
        /// The outstanding fine amount.
        fine_amount: Decimal,
    },
    /// A detention and training order.
    DetentionAndTraining {
        /// The imposed term.
        duration: Duration,
    },
    /// Breach of a top-up supervision order; bounds a licence/HDC horizon
    /// rather than a release date.
    Botus {
        /// The supervision term.
        duration: Duration,
    },
}

impl SentenceKind {
    /// Short variant name used in error payloads and logs.
    pub fn name(&self) -> &'static str {
        match self {
            SentenceKind::StandardDeterminate { .. } => "STANDARD_DETERMINATE",
            SentenceKind::ExtendedDeterminate { .. } => "EXTENDED_DETERMINATE",
            SentenceKind::Sopc { .. } => "SOPC",
            SentenceKind::AFine { .. } => "A_FINE",
            SentenceKind::DetentionAndTraining { .. } => "DETENTION_AND_TRAINING",
            SentenceKind::Botus { .. } => "BOTUS",
        }
    }

    /// True for the extended determinate variant.
    pub fn is_extended_determinate(&self) -> bool {
        matches!(self, SentenceKind::ExtendedDeterminate { .. })
    }

    /// True for the SOPC variant.
    pub fn is_sopc(&self) -> bool {
        matches!(self, SentenceKind::Sopc { .. })
    }

    /// True for the detention-and-training variant.
    pub fn is_dto(&self) -> bool {
        matches!(self, SentenceKind::DetentionAndTraining { .. })
    }

    /// True for the indeterminate family.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, SentenceKind::Botus { .. })
    }
}

/// Enhanced-release-point facts produced by the eligibility classifier.
///
/// Read-only once attached; `is_enhanced` is always the conjunction of the
/// other two flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdsPlusEligibility {
    /// The sentence's statutory category, length band and offence lists make
    /// it eligible.
    pub eligible_type_length_and_offence: bool,
    /// The sentencing date falls inside the qualifying legislative window.
    pub offence_in_qualifying_period: bool,
    /// Both of the above hold: the sentence takes the enhanced release point.
    pub is_enhanced: bool,
}

/// Late-bound computed state attached to a sentence after classification and
/// calculation. "Not yet computed" is an explicit absent state checked via
/// predicates, never an exception-on-access pattern.
#[derive(Debug, Clone, Default, PartialEq)]
struct ComputedState {
    track: Option<IdentificationTrack>,
    release_date_types: Option<Vec<ReleaseDateType>>,
    sds_plus: Option<SdsPlusEligibility>,
    calculation: Option<SentenceCalculation>,
}

/// One imposed sentence.
///
/// Constructed once from source records and read-only thereafter, except for
/// the late-bound computed state populated through
/// [`Sentence::initialise_track`], [`Sentence::set_sds_plus_eligibility`] and
/// [`Sentence::initialise_calculation`].
///
/// # Example
///
/// ```
/// use sentence_engine::models::{Duration, Offence, Sentence, SentenceKind};
/// use chrono::NaiveDate;
///
/// let sentence = Sentence::new(
///     "sent_001",
///     Offence {
///         code: "COML025".to_string(),
///         description: None,
///         committed_at: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
///     },
///     NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
///     SentenceKind::StandardDeterminate {
///         duration: Duration::from_months(12),
///         section_250: false,
///     },
/// );
/// assert!(!sentence.is_identification_track_initialised());
/// assert_eq!(sentence.length_in_days(), 365);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Unique identifier for the sentence within its booking.
    pub id: String,
    /// The offence the sentence was imposed for.
    pub offence: Offence,
    /// The date the sentence was imposed.
    pub sentenced_at: NaiveDate,
    /// True when the offender has been recalled on this sentence.
    #[serde(default)]
    pub recalled: bool,
    /// The recall regime, when recalled.
    #[serde(default)]
    pub recall: Option<RecallType>,
    /// The ID of the sentence this one is served consecutively to, if any.
    #[serde(default)]
    pub consecutive_to: Option<String>,
    /// The sentence-type variant.
    #[serde(flatten)]
    pub kind: SentenceKind,
    #[serde(skip)]
    state: ComputedState,
}

impl Sentence {
    /// Creates a sentence with no recall, no chain link and empty computed
    /// state.
    pub fn new(
        id: impl Into<String>,
        offence: Offence,
        sentenced_at: NaiveDate,
        kind: SentenceKind,
    ) -> Self {
        Self {
            id: id.into(),
            offence,
            sentenced_at,
            recalled: false,
            recall: None,
            consecutive_to: None,
            kind,
            state: ComputedState::default(),
        }
    }

    /// The nominal length in days measured from the sentencing date.
    pub fn length_in_days(&self) -> i64 {
        self.length_in_days_from(self.sentenced_at)
    }

    /// The nominal length in days measured from an arbitrary start date.
    ///
    /// Used by consecutive aggregation, where each member's term is measured
    /// from the rolled-forward date at which it notionally begins. The
    /// per-variant rules:
    ///
    /// - standard determinate, A-Fine, DTO, BOTUS: the term measured from
    ///   `start`;
    /// - extended determinate: custodial term from `start`, plus the
    ///   extension measured from `start + custodial_length + 1` (the
    ///   extension begins the day after the custodial period ends);
    /// - SOPC: custodial and extension merged unit-wise and measured once
    ///   from `start`.
    ///
    /// The extended/SOPC asymmetry reflects distinct statutory regimes and
    /// is pinned by tests.
    pub fn length_in_days_from(&self, start: NaiveDate) -> i64 {
        match &self.kind {
            SentenceKind::StandardDeterminate { duration, .. }
            | SentenceKind::AFine { duration, .. }
            | SentenceKind::DetentionAndTraining { duration }
            | SentenceKind::Botus { duration } => duration.length_in_days(start),
            SentenceKind::ExtendedDeterminate {
                custodial,
                extension,
                ..
            } => {
                let custodial_days = custodial.length_in_days(start);
                let extension_start = start + Days::new(custodial_days.unsigned_abs() + 1);
                custodial_days + extension.length_in_days(extension_start)
            }
            SentenceKind::Sopc {
                custodial,
                extension,
            } => custodial.append_all(extension).length_in_days(start),
        }
    }

    /// The duration the release-point multiplier applies to: the custodial
    /// term for extended determinate and SOPC sentences, the whole term
    /// otherwise.
    pub fn custodial_duration(&self) -> Duration {
        match &self.kind {
            SentenceKind::StandardDeterminate { duration, .. }
            | SentenceKind::AFine { duration, .. }
            | SentenceKind::DetentionAndTraining { duration }
            | SentenceKind::Botus { duration } => *duration,
            SentenceKind::ExtendedDeterminate { custodial, .. }
            | SentenceKind::Sopc { custodial, .. } => *custodial,
        }
    }

    /// The custodial term's length in days from the sentencing date.
    pub fn custodial_length_in_days(&self) -> i64 {
        self.custodial_duration().length_in_days(self.sentenced_at)
    }

    /// True when the sentence carries an extended determinate or SOPC
    /// component.
    pub fn has_any_eds_or_sopc(&self) -> bool {
        self.kind.is_extended_determinate() || self.kind.is_sopc()
    }

    /// True when the offender has been recalled on this sentence.
    pub fn is_recall(&self) -> bool {
        self.recalled
    }

    /// Attaches the externally classified identification track and
    /// release-date-type set. May be called exactly once.
    pub fn initialise_track(
        &mut self,
        track: IdentificationTrack,
        release_date_types: Vec<ReleaseDateType>,
    ) -> EngineResult<()> {
        if self.state.track.is_some() {
            return Err(EngineError::AlreadyInitialised {
                sentence_id: self.id.clone(),
                field: "identification_track".to_string(),
            });
        }
        self.state.track = Some(track);
        self.state.release_date_types = Some(release_date_types);
        Ok(())
    }

    /// True once [`Sentence::initialise_track`] has been called.
    pub fn is_identification_track_initialised(&self) -> bool {
        self.state.track.is_some()
    }

    /// The classified identification track.
    pub fn track(&self) -> EngineResult<IdentificationTrack> {
        self.state
            .track
            .ok_or_else(|| EngineError::TrackNotInitialised {
                sentence_id: self.id.clone(),
            })
    }

    /// The release-date types that apply to this sentence.
    pub fn release_date_types(&self) -> EngineResult<&[ReleaseDateType]> {
        self.state
            .release_date_types
            .as_deref()
            .ok_or_else(|| EngineError::TrackNotInitialised {
                sentence_id: self.id.clone(),
            })
    }

    /// Whether the given release-date type applies to this sentence.
    pub fn requires_release_date_type(&self, date_type: ReleaseDateType) -> EngineResult<bool> {
        Ok(self.release_date_types()?.contains(&date_type))
    }

    /// Attaches the enhanced-release eligibility facts. May be called exactly
    /// once.
    pub fn set_sds_plus_eligibility(&mut self, facts: SdsPlusEligibility) -> EngineResult<()> {
        if self.state.sds_plus.is_some() {
            return Err(EngineError::AlreadyInitialised {
                sentence_id: self.id.clone(),
                field: "sds_plus_eligibility".to_string(),
            });
        }
        self.state.sds_plus = Some(facts);
        Ok(())
    }

    /// The enhanced-release eligibility facts, when classified.
    pub fn sds_plus_eligibility(&self) -> Option<SdsPlusEligibility> {
        self.state.sds_plus
    }

    /// True when the sentence has been classified as taking the enhanced
    /// release point. Unclassified sentences are not enhanced.
    pub fn is_enhanced(&self) -> bool {
        self.state.sds_plus.map(|e| e.is_enhanced).unwrap_or(false)
    }

    /// Attaches the completed sentence calculation. May be called exactly
    /// once.
    pub fn initialise_calculation(&mut self, calculation: SentenceCalculation) -> EngineResult<()> {
        if self.state.calculation.is_some() {
            return Err(EngineError::AlreadyInitialised {
                sentence_id: self.id.clone(),
                field: "sentence_calculation".to_string(),
            });
        }
        self.state.calculation = Some(calculation);
        Ok(())
    }

    /// True once [`Sentence::initialise_calculation`] has been called.
    pub fn is_calculation_initialised(&self) -> bool {
        self.state.calculation.is_some()
    }

    /// The completed sentence calculation.
    pub fn calculation(&self) -> EngineResult<&SentenceCalculation> {
        self.state
            .calculation
            .as_ref()
            .ok_or_else(|| EngineError::CalculationNotInitialised {
                sentence_id: self.id.clone(),
            })
    }

    /// Mutable access to the sentence calculation, for adjustment
    /// application.
    pub fn calculation_mut(&mut self) -> EngineResult<&mut SentenceCalculation> {
        self.state
            .calculation
            .as_mut()
            .ok_or_else(|| EngineError::CalculationNotInitialised {
                sentence_id: self.id.clone(),
            })
    }
}
