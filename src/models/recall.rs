//! Recall types.

use serde::{Deserialize, Serialize};

/// The recall regime a sentence is subject to.
///
/// A standard recall returns the offender to custody until the sentence
/// expiry date. A fixed-term recall returns them for a statutorily fixed
/// number of days measured from the return-to-custody date.
/// `StandardRecall255` exists in source data but is not supported by this
/// engine and is rejected during calculation.
///
/// # Example
///
/// ```
/// use sentence_engine::models::RecallType;
///
/// assert_eq!(RecallType::FixedTermRecall28.fixed_term_days(), Some(28));
/// assert_eq!(RecallType::StandardRecall.fixed_term_days(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecallType {
    /// Recall to custody until the sentence expiry date.
    StandardRecall,
    /// Legacy s.255 standard recall variant; rejected by the engine.
    StandardRecall255,
    /// Fixed-term recall of 14 days.
    FixedTermRecall14,
    /// Fixed-term recall of 28 days.
    FixedTermRecall28,
    /// Fixed-term recall of 56 days.
    FixedTermRecall56,
}

impl RecallType {
    /// Returns true for the fixed-term recall variants.
    pub fn is_fixed_term(&self) -> bool {
        self.fixed_term_days().is_some()
    }

    /// The statutory day count of a fixed-term recall, if this is one.
    pub fn fixed_term_days(&self) -> Option<i64> {
        match self {
            RecallType::FixedTermRecall14 => Some(14),
            RecallType::FixedTermRecall28 => Some(28),
            RecallType::FixedTermRecall56 => Some(56),
            RecallType::StandardRecall | RecallType::StandardRecall255 => None,
        }
    }
}

impl std::fmt::Display for RecallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecallType::StandardRecall => "STANDARD_RECALL",
            RecallType::StandardRecall255 => "STANDARD_RECALL_255",
            RecallType::FixedTermRecall14 => "FIXED_TERM_RECALL_14",
            RecallType::FixedTermRecall28 => "FIXED_TERM_RECALL_28",
            RecallType::FixedTermRecall56 => "FIXED_TERM_RECALL_56",
        };
        write!(f, "{}", name)
    }
}
