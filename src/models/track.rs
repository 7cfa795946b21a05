//! Identification tracks and release date types.
//!
//! Both enums are assigned by an external rules classifier and consumed
//! read-only by this engine: the track tells the engine which release-point
//! regime a sentence follows, and the release-date-type set tells it which
//! output dates are meaningful for the sentence.

use serde::{Deserialize, Serialize};

/// The release regime a sentence was classified into.
///
/// Assigned by an external classifier before calculation; the engine never
/// derives a track itself. The predicates on this type are the single source
/// of truth for the track-based grouping queries used on consecutive chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentificationTrack {
    /// Standard determinate sentence imposed before the CJA/LASPO reforms.
    SdsBeforeCjaLaspo,
    /// Standard determinate sentence released at the standard point.
    SdsStandardRelease,
    /// Standard determinate sentence subject to the enhanced release point.
    SdsPlusRelease,
    /// Extended determinate sentence with automatic conditional release.
    EdsAutomaticRelease,
    /// Extended determinate sentence with discretionary (parole) release.
    EdsDiscretionaryRelease,
    /// Special-custodial-sentence (SOPC) with parole eligibility at halfway.
    SopcPedAtHalfway,
    /// Special-custodial-sentence (SOPC) with parole eligibility at two-thirds.
    SopcPedAtTwoThirds,
    /// Detention and training order.
    Dto,
    /// Term imposed in default of a fine.
    AFine,
    /// Breach of a top-up supervision order (indeterminate family).
    Botus,
}

impl IdentificationTrack {
    /// True for the post-ORA standard determinate regimes.
    pub fn is_ora(&self) -> bool {
        matches!(
            self,
            IdentificationTrack::SdsStandardRelease | IdentificationTrack::SdsPlusRelease
        )
    }

    /// True for any standard-determinate family track.
    pub fn is_sds_family(&self) -> bool {
        matches!(
            self,
            IdentificationTrack::SdsBeforeCjaLaspo
                | IdentificationTrack::SdsStandardRelease
                | IdentificationTrack::SdsPlusRelease
        )
    }

    /// True for the pre-CJA/LASPO standard determinate track.
    pub fn is_before_cja_laspo(&self) -> bool {
        matches!(self, IdentificationTrack::SdsBeforeCjaLaspo)
    }

    /// True for the enhanced (SDS+) release track.
    pub fn is_sds_plus(&self) -> bool {
        matches!(self, IdentificationTrack::SdsPlusRelease)
    }

    /// True for the tracks that carry a parole eligibility date.
    pub fn has_parole_eligibility(&self) -> bool {
        matches!(
            self,
            IdentificationTrack::EdsDiscretionaryRelease
                | IdentificationTrack::SopcPedAtHalfway
                | IdentificationTrack::SopcPedAtTwoThirds
        )
    }
}

/// The typed release and expiry dates the engine can produce.
///
/// Which of these apply to a sentence is decided by the external classifier;
/// the engine treats the set as a presence/absence query when deciding which
/// computed dates are externally visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseDateType {
    /// Sentence and licence expiry date (combined expiry marker).
    Sled,
    /// Sentence expiry date.
    Sed,
    /// Licence expiry date.
    Led,
    /// Conditional release date.
    Crd,
    /// Automatic release date.
    Ard,
    /// Parole eligibility date.
    Ped,
    /// Home detention curfew eligibility date.
    Hdced,
    /// Post recall release date.
    Prrd,
}

impl std::fmt::Display for ReleaseDateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReleaseDateType::Sled => "SLED",
            ReleaseDateType::Sed => "SED",
            ReleaseDateType::Led => "LED",
            ReleaseDateType::Crd => "CRD",
            ReleaseDateType::Ard => "ARD",
            ReleaseDateType::Ped => "PED",
            ReleaseDateType::Hdced => "HDCED",
            ReleaseDateType::Prrd => "PRRD",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ora_tracks() {
        assert!(IdentificationTrack::SdsStandardRelease.is_ora());
        assert!(IdentificationTrack::SdsPlusRelease.is_ora());
        assert!(!IdentificationTrack::SdsBeforeCjaLaspo.is_ora());
        assert!(!IdentificationTrack::EdsAutomaticRelease.is_ora());
    }

    #[test]
    fn test_parole_eligibility_tracks() {
        assert!(IdentificationTrack::EdsDiscretionaryRelease.has_parole_eligibility());
        assert!(IdentificationTrack::SopcPedAtHalfway.has_parole_eligibility());
        assert!(IdentificationTrack::SopcPedAtTwoThirds.has_parole_eligibility());
        assert!(!IdentificationTrack::EdsAutomaticRelease.has_parole_eligibility());
        assert!(!IdentificationTrack::SdsStandardRelease.has_parole_eligibility());
    }

    #[test]
    fn test_release_date_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ReleaseDateType::Sled).unwrap(),
            "\"SLED\""
        );
        assert_eq!(
            serde_json::to_string(&ReleaseDateType::Hdced).unwrap(),
            "\"HDCED\""
        );
    }

    #[test]
    fn test_release_date_type_orders_stably_as_map_key() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(ReleaseDateType::Crd, 1);
        map.insert(ReleaseDateType::Sled, 2);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![ReleaseDateType::Sled, ReleaseDateType::Crd]);
    }
}
