//! Offence model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The offence a sentence was imposed for.
///
/// The engine only needs the identity data: the offence code drives list
/// membership lookups for enhanced-release-point eligibility, and the
/// committed date decides which offence is nominal for a consecutive chain.
///
/// # Example
///
/// ```
/// use sentence_engine::models::Offence;
/// use chrono::NaiveDate;
///
/// let offence = Offence {
///     code: "SX03001".to_string(),
///     description: Some("Rape of a person 16 or over".to_string()),
///     committed_at: NaiveDate::from_ymd_opt(2022, 3, 4).unwrap(),
/// };
/// assert_eq!(offence.code, "SX03001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offence {
    /// The offence code as held by the offence registry.
    pub code: String,
    /// Human-readable offence description, if supplied.
    #[serde(default)]
    pub description: Option<String>,
    /// The date the offence was committed.
    pub committed_at: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offence_deserialization_defaults_description() {
        let json = r#"{"code": "COML025", "committed_at": "2021-06-01"}"#;
        let offence: Offence = serde_json::from_str(json).unwrap();
        assert_eq!(offence.code, "COML025");
        assert!(offence.description.is_none());
    }

    #[test]
    fn test_offence_round_trips_through_json() {
        let offence = Offence {
            code: "SX03001".to_string(),
            description: Some("Rape of a person 16 or over".to_string()),
            committed_at: NaiveDate::from_ymd_opt(2022, 3, 4).unwrap(),
        };
        let json = serde_json::to_string(&offence).unwrap();
        let back: Offence = serde_json::from_str(&json).unwrap();
        assert_eq!(offence, back);
    }
}
