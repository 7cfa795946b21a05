//! Enhanced-release-point (SDS+) eligibility classification.
//!
//! Certain standard determinate sentences move from halfway to two-thirds
//! release when their statutory category, length band and offence-list
//! membership line up inside a legislative commencement window. This module
//! decides those facts. Classification is a pure, total function: it never
//! fails, and anything it cannot positively classify is simply not eligible.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::EligibilityConfig;
use crate::models::{SdsPlusEligibility, Sentence, SentenceKind};

/// The statutory category a sentence is assessed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityType {
    /// Adult standard determinate sentence.
    Sds,
    /// Youth standard determinate sentence imposed under s.250.
    Section250,
    /// Not assessable for enhanced release.
    None,
}

/// The sentence-length band, relative to whole years from the sentence date.
///
/// Band boundaries are legally defined in whole years, so banding compares
/// the term's nominal end date against `sentenced_at + N years` rather than
/// dividing raw day counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBand {
    /// Shorter than four years.
    UnderFour,
    /// Four years or longer, but shorter than seven.
    FourToUnderSeven,
    /// Seven years or longer.
    SevenPlus,
}

/// The statutory category for a sentence.
pub fn eligibility_type(sentence: &Sentence) -> EligibilityType {
    match &sentence.kind {
        SentenceKind::StandardDeterminate {
            section_250: false, ..
        } => EligibilityType::Sds,
        SentenceKind::StandardDeterminate {
            section_250: true, ..
        } => EligibilityType::Section250,
        _ => EligibilityType::None,
    }
}

/// Bands a sentence's first term by whole years from the sentence date.
pub fn length_band(sentence: &Sentence) -> LengthBand {
    let start = sentence.sentenced_at;
    // The day after the inclusive end date: an exactly-four-year term must
    // land in the four-to-seven band.
    let end_exclusive = sentence.custodial_duration().end_date(start) + Days::new(1);
    if end_exclusive < start + Months::new(48) {
        LengthBand::UnderFour
    } else if end_exclusive < start + Months::new(84) {
        LengthBand::FourToUnderSeven
    } else {
        LengthBand::SevenPlus
    }
}

/// Classifies a sentence against the enhanced-release decision table.
///
/// The table combines the statutory category, the length band, offence-list
/// membership and the commencement thresholds:
///
/// | category | band   | lists  | qualifying from        |
/// |----------|--------|--------|------------------------|
/// | SDS      | >=7y   | A or D | original window start  |
/// | SDS      | 4-<7y  | B or C | formal commencement    |
/// | SEC250   | >=7y   | A or D | formal commencement    |
///
/// Every other combination is not eligible. `is_enhanced` is the conjunction
/// of the eligibility and qualifying-period facts.
pub fn classify_sds_plus(sentence: &Sentence, config: &EligibilityConfig) -> SdsPlusEligibility {
    let category = eligibility_type(sentence);
    if category == EligibilityType::None {
        return SdsPlusEligibility::default();
    }

    let markers = config.markers_for(&sentence.offence.code);
    let band = length_band(sentence);

    let (eligible, qualifying_from): (bool, Option<NaiveDate>) = match (category, band) {
        (EligibilityType::Sds, LengthBand::SevenPlus) => (
            markers.in_list_a || markers.in_list_d,
            Some(config.windows().original_window_start),
        ),
        (EligibilityType::Sds, LengthBand::FourToUnderSeven) => (
            markers.in_list_b || markers.in_list_c,
            Some(config.windows().formal_commencement),
        ),
        (EligibilityType::Section250, LengthBand::SevenPlus) => (
            markers.in_list_a || markers.in_list_d,
            Some(config.windows().formal_commencement),
        ),
        _ => (false, None),
    };

    let in_period = qualifying_from
        .map(|threshold| sentence.sentenced_at >= threshold)
        .unwrap_or(false);

    SdsPlusEligibility {
        eligible_type_length_and_offence: eligible,
        offence_in_qualifying_period: in_period,
        is_enhanced: eligible && in_period,
    }
}
