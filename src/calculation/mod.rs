//! Calculation logic for the sentence calculation engine.
//!
//! This module contains the calculation pipeline and its parts: consecutive
//! chain aggregation, enhanced-release eligibility classification, the
//! release-point multiplier policy, the unadjusted release date calculator,
//! adjustment application, and the booking pipeline that strings them
//! together.

mod adjustment_application;
mod consecutive;
mod eligibility;
mod multiplier;
mod pipeline;
mod unadjusted;

pub use adjustment_application::apply_adjustments;
pub use consecutive::{CalculableSentence, ConsecutiveSentence, assemble};
pub use eligibility::{EligibilityType, LengthBand, classify_sds_plus, eligibility_type, length_band};
pub use multiplier::{HALFWAY, MultiplierFn, ReleasePointPolicy, TWO_THIRDS};
pub use pipeline::calculate_booking;
pub use unadjusted::{ReleaseDateCalculation, build_sentence_calculation, calculate_unadjusted};
