//! Booking input aggregate.
//!
//! A booking is the unit of calculation: one offender, their sentences, the
//! day-count adjustments recorded against them, the classification the
//! external rules classifier assigned to each sentence, and recall metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Adjustments, IdentificationTrack, ReleaseDateType, Sentence};

/// The offender the booking belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offender {
    /// External reference for the offender.
    pub reference: String,
    /// Date of birth, used for age-based release-date-type overrides.
    pub date_of_birth: NaiveDate,
}

impl Offender {
    /// The offender's age in whole years on the given date.
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.date_of_birth).unwrap_or(0)
    }
}

/// The classification assigned to one sentence by the external rules
/// classifier: its identification track and the release-date types that
/// apply to it. The engine consumes this; it never derives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceClassification {
    /// The release regime the sentence follows.
    pub track: IdentificationTrack,
    /// The release-date types meaningful for the sentence.
    pub release_date_types: Vec<ReleaseDateType>,
}

/// A booking-equivalent input aggregate for one calculation run.
///
/// Assembled by external collaborators before invocation and treated as
/// immutable for the duration of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The offender.
    pub offender: Offender,
    /// All sentences on the booking, in imposition order.
    pub sentences: Vec<Sentence>,
    /// Day-count adjustments recorded against the booking.
    #[serde(default)]
    pub adjustments: Adjustments,
    /// Per-sentence classification, keyed by sentence ID.
    pub classifications: HashMap<String, SentenceClassification>,
    /// The date the offender was returned to custody, when recalled.
    #[serde(default)]
    pub return_to_custody_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_age_on() {
        let offender = Offender {
            reference: "A1234BC".to_string(),
            date_of_birth: date("2000-06-15"),
        };
        assert_eq!(offender.age_on(date("2018-06-14")), 17);
        assert_eq!(offender.age_on(date("2018-06-15")), 18);
        assert_eq!(offender.age_on(date("2018-06-16")), 18);
    }

    #[test]
    fn test_booking_deserialization() {
        let json = r#"{
            "offender": {"reference": "A1234BC", "date_of_birth": "1990-01-15"},
            "sentences": [{
                "id": "sent_001",
                "offence": {"code": "COML025", "committed_at": "2021-03-01"},
                "sentenced_at": "2021-06-01",
                "type": "STANDARD_DETERMINATE",
                "duration": {"months": 12}
            }],
            "classifications": {
                "sent_001": {
                    "track": "SDS_STANDARD_RELEASE",
                    "release_date_types": ["SLED", "CRD"]
                }
            }
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.sentences.len(), 1);
        assert!(booking.return_to_custody_date.is_none());
        assert_eq!(
            booking.classifications["sent_001"].track,
            IdentificationTrack::SdsStandardRelease
        );
    }
}
