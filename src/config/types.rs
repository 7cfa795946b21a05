//! Configuration types for enhanced-release eligibility.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the offence lists the
//! eligibility classifier consults and the legislative commencement
//! windows.

use chrono::NaiveDate;
use serde::Deserialize;

/// Metadata about the shipped offence schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version or effective date of the schedule data.
    pub version: String,
    /// URL to the source legislation or registry export.
    pub source_url: String,
}

/// The named offence lists consulted by the eligibility decision table.
///
/// Lists A through D hold current offence codes. The legacy list holds
/// historical base codes matched with the suffix variants `A`, `B`, `C`
/// and `I`; a legacy match counts as list-A membership.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffenceLists {
    /// List A: offences qualifying seven-year-plus sentences.
    #[serde(default)]
    pub list_a: Vec<String>,
    /// List B: offences qualifying four-to-seven-year sentences.
    #[serde(default)]
    pub list_b: Vec<String>,
    /// List C: further offences qualifying four-to-seven-year sentences.
    #[serde(default)]
    pub list_c: Vec<String>,
    /// List D: further offences qualifying seven-year-plus sentences.
    #[serde(default)]
    pub list_d: Vec<String>,
    /// Historical offence codes, matched with suffix variants A/B/C/I.
    #[serde(default)]
    pub legacy: Vec<String>,
}

/// The legislative commencement thresholds for the qualifying window.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CommencementWindows {
    /// The start of the original qualifying window.
    pub original_window_start: NaiveDate,
    /// The formal commencement of the widened regime.
    pub formal_commencement: NaiveDate,
}

/// Offence-list membership for one offence code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffenceMarkers {
    /// The code appears in list A (or matched the legacy list).
    pub in_list_a: bool,
    /// The code appears in list B.
    pub in_list_b: bool,
    /// The code appears in list C.
    pub in_list_c: bool,
    /// The code appears in list D.
    pub in_list_d: bool,
}

/// The assembled eligibility configuration.
#[derive(Debug, Clone)]
pub struct EligibilityConfig {
    metadata: ScheduleMetadata,
    lists: OffenceLists,
    windows: CommencementWindows,
}

impl EligibilityConfig {
    /// Assembles a configuration from its parts.
    pub fn new(
        metadata: ScheduleMetadata,
        lists: OffenceLists,
        windows: CommencementWindows,
    ) -> Self {
        Self {
            metadata,
            lists,
            windows,
        }
    }

    /// The schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// The commencement windows.
    pub fn windows(&self) -> &CommencementWindows {
        &self.windows
    }

    /// Looks up the offence-list markers for a code.
    ///
    /// Unknown codes get empty markers; lookups never fail. A legacy match
    /// (base code, or base code plus one of the suffix variants A/B/C/I)
    /// counts as list-A membership.
    pub fn markers_for(&self, code: &str) -> OffenceMarkers {
        let contains = |list: &[String]| list.iter().any(|c| c == code);
        OffenceMarkers {
            in_list_a: contains(&self.lists.list_a) || self.matches_legacy(code),
            in_list_b: contains(&self.lists.list_b),
            in_list_c: contains(&self.lists.list_c),
            in_list_d: contains(&self.lists.list_d),
        }
    }

    fn matches_legacy(&self, code: &str) -> bool {
        self.lists.legacy.iter().any(|base| {
            code == base
                || code
                    .strip_prefix(base.as_str())
                    .is_some_and(|suffix| matches!(suffix, "A" | "B" | "C" | "I"))
        })
    }
}
