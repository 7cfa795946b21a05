//! Comprehensive integration tests for the sentence calculation engine.
//!
//! This test suite covers the calculation scenarios end to end:
//! - Standard determinate sentences with remand deductions
//! - Enhanced (SDS+) release points from the shipped offence schedule
//! - Consecutive chains with mixed release points
//! - DTO chains and the 24-month cap
//! - Extended determinate sentences with parole eligibility
//! - Standard and fixed-term recalls
//! - Adjustment precedence and the deduction cap asymmetry
//! - Error cases

use chrono::NaiveDate;
use serde_json::{Value, json};

use sentence_engine::calculation::{ReleasePointPolicy, calculate_booking};
use sentence_engine::config::{ConfigLoader, EligibilityConfig};
use sentence_engine::error::EngineError;
use sentence_engine::models::{Booking, CalculationResult, ReleaseDateType};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> EligibilityConfig {
    ConfigLoader::load("./config/sds_plus")
        .expect("Failed to load config")
        .eligibility()
        .clone()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn booking_from(value: Value) -> Booking {
    serde_json::from_value(value).expect("booking JSON should deserialize")
}

fn calculate(value: Value) -> Result<CalculationResult, EngineError> {
    calculate_booking(
        booking_from(value),
        &load_config(),
        &ReleasePointPolicy::standard(),
    )
}

fn offender() -> Value {
    json!({"reference": "A1234BC", "date_of_birth": "1985-04-02"})
}

fn standard_sentence(id: &str, code: &str, sentenced: &str, duration: Value) -> Value {
    json!({
        "id": id,
        "offence": {"code": code, "committed_at": "2019-06-01"},
        "sentenced_at": sentenced,
        "type": "STANDARD_DETERMINATE",
        "duration": duration
    })
}

fn sds_classification(types: Vec<&str>) -> Value {
    json!({"track": "SDS_STANDARD_RELEASE", "release_date_types": types})
}

// =============================================================================
// Standard determinate scenarios
// =============================================================================

/// IT-001: the reference scenario - 20 months from 2015-03-17 with 10 days
/// of remand produces SLED 2016-11-06 and CRD 2016-01-06.
#[test]
fn test_standard_sentence_with_remand() {
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}))],
        "adjustments": {
            "REMAND": [{"from_date": "2015-03-01", "to_date": "2015-03-10", "number_of_days": 10}]
        },
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();

    assert_eq!(result.results.len(), 1);
    let sentence = &result.results[0];
    assert_eq!(sentence.dates[&ReleaseDateType::Sled], date("2016-11-06"));
    assert_eq!(sentence.dates[&ReleaseDateType::Crd], date("2016-01-06"));
    assert_eq!(sentence.breakdown.days_to_expiry, 611);
    assert_eq!(sentence.breakdown.days_to_release, 306);
    assert_eq!(sentence.breakdown.unadjusted_expiry_date, date("2016-11-16"));
    assert_eq!(sentence.breakdown.unadjusted_release_date, date("2016-01-16"));
    assert_eq!(sentence.breakdown.deducted_days, 10);
}

/// IT-002: a deduction larger than days-to-release is capped for the expiry
/// date but applied in full to the release date.
#[test]
fn test_deduction_cap_asymmetry() {
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}))],
        "adjustments": {
            "REMAND": [{"from_date": "2014-01-01", "number_of_days": 400}]
        },
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();

    let sentence = &result.results[0];
    // Expiry: deduction capped at the 306 unadjusted days to release.
    assert_eq!(sentence.dates[&ReleaseDateType::Sled], date("2016-01-15"));
    // Release: the full 400 days come off.
    assert_eq!(sentence.dates[&ReleaseDateType::Crd], date("2014-12-12"));
}

/// IT-003: unlawfully-at-large time after sentencing pushes both dates out,
/// and awarded days push only the release date.
#[test]
fn test_added_and_awarded_days() {
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}))],
        "adjustments": {
            "UNLAWFULLY_AT_LARGE": [{"from_date": "2015-09-01", "number_of_days": 5}],
            "ADDITIONAL_DAYS_AWARDED": [{"from_date": "2015-10-01", "number_of_days": 14}],
            "RESTORATION_OF_ADDITIONAL_DAYS_AWARDED": [{"from_date": "2015-11-01", "number_of_days": 4}]
        },
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();

    let sentence = &result.results[0];
    // SLED moves by the 5 added days only.
    assert_eq!(sentence.dates[&ReleaseDateType::Sled], date("2016-11-21"));
    // CRD moves by 5 added plus 10 net awarded days.
    assert_eq!(sentence.dates[&ReleaseDateType::Crd], date("2016-01-31"));
    assert_eq!(sentence.breakdown.added_days, 5);
    assert_eq!(sentence.breakdown.awarded_days, 10);
}

// =============================================================================
// Enhanced release (SDS+)
// =============================================================================

/// IT-004: a seven-year sentence for a schedule offence inside the window
/// releases at two-thirds; the same shape for an unlisted offence releases
/// at halfway.
#[test]
fn test_enhanced_release_point_from_shipped_schedule() {
    let enhanced = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "SX03001", "2021-06-01", json!({"years": 8}))],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();
    let ordinary = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "COML025", "2021-06-01", json!({"years": 8}))],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();

    assert_eq!(enhanced.results[0].breakdown.days_to_expiry, 2922);
    assert_eq!(enhanced.results[0].breakdown.days_to_release, 1948);
    assert_eq!(ordinary.results[0].breakdown.days_to_release, 1461);
    assert!(
        enhanced.results[0].dates[&ReleaseDateType::Crd]
            > ordinary.results[0].dates[&ReleaseDateType::Crd]
    );
}

/// IT-005: the same schedule offence sentenced before the original window
/// stays at halfway.
#[test]
fn test_enhanced_release_requires_qualifying_period() {
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "SX03001", "2020-03-01", json!({"years": 8}))],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();
    // 8 years from 2020-03-01 = 2922 days, released at the halfway ceiling.
    assert_eq!(result.results[0].breakdown.days_to_release, 1461);
}

// =============================================================================
// Consecutive chains
// =============================================================================

/// IT-006: members grouped by multiplier in first-appearance order, not
/// sorted: [halfway, two-thirds, halfway] processes the two halfway members
/// first.
#[test]
fn test_consecutive_grouping_stability() {
    let mut second = standard_sentence("sent_002", "COML025", "2021-01-01", json!({"months": 12}));
    second["consecutive_to"] = json!("sent_001");
    let mut third = standard_sentence("sent_003", "COML025", "2021-01-01", json!({"months": 12}));
    third["consecutive_to"] = json!("sent_002");

    let result = calculate(json!({
        "offender": offender(),
        "sentences": [
            standard_sentence("sent_001", "COML025", "2021-01-01", json!({"months": 12})),
            second,
            third
        ],
        "classifications": {
            "sent_001": sds_classification(vec!["SLED", "CRD"]),
            "sent_002": {"track": "SDS_PLUS_RELEASE", "release_date_types": ["SLED", "CRD"]},
            "sent_003": sds_classification(vec!["SLED", "CRD"])
        }
    }))
    .unwrap();

    assert_eq!(result.results.len(), 1);
    let chain = &result.results[0];
    assert_eq!(
        chain.sentence_ids,
        vec!["sent_001", "sent_002", "sent_003"]
    );
    // Halfway group: 24 months = 730 days, releasing 365 days in. The
    // two-thirds member then runs 12 months from 2022-01-01: ceil of
    // 365 * 2/3 = 244 further days. Sorted processing would give 610.
    assert_eq!(chain.breakdown.days_to_release, 609);
}

/// IT-007: a DTO chain beyond two years is capped at exactly 24 months and
/// releases against the capped term.
#[test]
fn test_dto_chain_cap() {
    let mut second = json!({
        "id": "sent_002",
        "offence": {"code": "COML025", "committed_at": "2020-06-01"},
        "sentenced_at": "2022-01-01",
        "type": "DETENTION_AND_TRAINING",
        "duration": {"months": 24},
        "consecutive_to": "sent_001"
    });
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [
            {
                "id": "sent_001",
                "offence": {"code": "COML025", "committed_at": "2020-06-01"},
                "sentenced_at": "2021-01-01",
                "type": "DETENTION_AND_TRAINING",
                "duration": {"months": 18}
            },
            second.take()
        ],
        "classifications": {
            "sent_001": {"track": "DTO", "release_date_types": ["SED", "ARD"]},
            "sent_002": {"track": "DTO", "release_date_types": ["SED", "ARD"]}
        }
    }))
    .unwrap();

    let chain = &result.results[0];
    assert_eq!(chain.breakdown.days_to_expiry, 730);
    assert_eq!(chain.breakdown.days_to_release, 365);
    assert_eq!(chain.dates[&ReleaseDateType::Sed], date("2022-12-31"));
    assert_eq!(chain.dates[&ReleaseDateType::Ard], date("2021-12-31"));
}

// =============================================================================
// Extended determinate and SOPC sentences
// =============================================================================

/// IT-008: a discretionary extended sentence serves its custodial term in
/// full with parole eligibility at two-thirds.
#[test]
fn test_extended_determinate_parole_eligibility() {
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [{
            "id": "sent_001",
            "offence": {"code": "SX03001", "committed_at": "2019-06-01"},
            "sentenced_at": "2021-06-01",
            "type": "EXTENDED_DETERMINATE",
            "custodial": {"years": 4},
            "extension": {"years": 2},
            "automatic_release": false
        }],
        "classifications": {
            "sent_001": {"track": "EDS_DISCRETIONARY_RELEASE", "release_date_types": ["SLED", "PED"]}
        }
    }))
    .unwrap();

    let sentence = &result.results[0];
    // Custodial 1461 days served in full; the sequential extension runs the
    // expiry to 2027-06-01.
    assert_eq!(sentence.dates[&ReleaseDateType::Sled], date("2027-06-01"));
    assert_eq!(sentence.dates[&ReleaseDateType::Ped], date("2024-01-30"));
    assert_eq!(sentence.breakdown.days_to_release, 1461);
}

// =============================================================================
// Recalls
// =============================================================================

/// IT-009: a standard recall releases at the sentence expiry date.
#[test]
fn test_standard_recall() {
    let mut sentence = standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}));
    sentence["recalled"] = json!(true);
    sentence["recall"] = json!("STANDARD_RECALL");
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [sentence],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD", "PRRD"])}
    }))
    .unwrap();

    assert_eq!(
        result.results[0].dates[&ReleaseDateType::Prrd],
        date("2016-11-16")
    );
}

/// IT-010: a 28-day fixed-term recall releases 27 days after the return to
/// custody.
#[test]
fn test_fixed_term_recall_28() {
    let mut sentence = standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}));
    sentence["recalled"] = json!(true);
    sentence["recall"] = json!("FIXED_TERM_RECALL28");
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [sentence],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD", "PRRD"])},
        "return_to_custody_date": "2016-05-01"
    }))
    .unwrap();

    assert_eq!(
        result.results[0].dates[&ReleaseDateType::Prrd],
        date("2016-05-28")
    );
}

// =============================================================================
// Error cases
// =============================================================================

/// IT-011: a fixed-term recall without a return-to-custody date fails the
/// booking; no partial date set is produced.
#[test]
fn test_fixed_term_recall_without_return_date_fails() {
    let mut sentence = standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}));
    sentence["recalled"] = json!(true);
    sentence["recall"] = json!("FIXED_TERM_RECALL14");
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [sentence],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD", "PRRD"])}
    }));

    match result {
        Err(EngineError::MissingReturnToCustodyDate { sentence_id }) => {
            assert_eq!(sentence_id, "sent_001");
        }
        other => panic!("Expected MissingReturnToCustodyDate, got {:?}", other),
    }
}

/// IT-012: the legacy s.255 recall variant is rejected, not approximated.
#[test]
fn test_standard_recall_255_rejected() {
    let mut sentence = standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}));
    sentence["recalled"] = json!(true);
    sentence["recall"] = json!("STANDARD_RECALL255");
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [sentence],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD", "PRRD"])}
    }));

    assert!(matches!(
        result,
        Err(EngineError::UnsupportedRecallType { .. })
    ));
}

/// IT-013: a dangling consecutive reference fails the booking.
#[test]
fn test_dangling_consecutive_reference_fails() {
    let mut sentence = standard_sentence("sent_001", "COML025", "2021-01-01", json!({"months": 12}));
    sentence["consecutive_to"] = json!("missing");
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [sentence],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }));

    assert!(matches!(
        result,
        Err(EngineError::InvalidConsecutiveChain { .. })
    ));
}

// =============================================================================
// Output shape
// =============================================================================

/// IT-014: results serialize with typed date keys and a full breakdown.
#[test]
fn test_result_serialization_shape() {
    let result = calculate(json!({
        "offender": offender(),
        "sentences": [standard_sentence("sent_001", "COML025", "2015-03-17", json!({"months": 20}))],
        "classifications": {"sent_001": sds_classification(vec!["SLED", "CRD"])}
    }))
    .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["offender_reference"], "A1234BC");
    assert_eq!(json["results"][0]["dates"]["SLED"], "2016-11-16");
    assert_eq!(json["results"][0]["dates"]["CRD"], "2016-01-16");
    assert_eq!(json["results"][0]["breakdown"]["days_to_expiry"], 611);
    assert!(json["calculation_id"].is_string());
}
