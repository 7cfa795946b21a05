//! Core data models for the sentence calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustments;
mod booking;
mod calculation_result;
mod duration;
mod offence;
mod recall;
mod sentence;
mod sentence_calculation;
mod track;

pub use adjustments::{Adjustment, AdjustmentType, Adjustments};
pub use booking::{Booking, Offender, SentenceClassification};
pub use calculation_result::{CalculationResult, DateBreakdown, SentenceResult};
pub use duration::Duration;
pub use offence::Offence;
pub use recall::RecallType;
pub use sentence::{SdsPlusEligibility, Sentence, SentenceKind};
pub use sentence_calculation::SentenceCalculation;
pub use track::{IdentificationTrack, ReleaseDateType};
