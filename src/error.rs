//! Error types for the sentence calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a release date calculation.

use thiserror::Error;

/// The main error type for the sentence calculation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. Assumption
/// violations fail loudly rather than defaulting to a plausible-looking date:
/// a silently wrong release date has legal consequences.
///
/// # Example
///
/// ```
/// use sentence_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A sentence's identification track was read before the external
    /// classifier's assignment had been attached.
    #[error("Identification track not initialised for sentence '{sentence_id}'")]
    TrackNotInitialised {
        /// The ID of the sentence.
        sentence_id: String,
    },

    /// A sentence's computed dates were read before the calculation had run.
    #[error("Sentence calculation not initialised for sentence '{sentence_id}'")]
    CalculationNotInitialised {
        /// The ID of the sentence.
        sentence_id: String,
    },

    /// A late-bound field was populated a second time.
    #[error("Field '{field}' already initialised for sentence '{sentence_id}'")]
    AlreadyInitialised {
        /// The ID of the sentence.
        sentence_id: String,
        /// The late-bound field that was populated twice.
        field: String,
    },

    /// The booking carried no classification for one of its sentences.
    #[error("No classification supplied for sentence '{sentence_id}'")]
    MissingClassification {
        /// The ID of the unclassified sentence.
        sentence_id: String,
    },

    /// A sentence was flagged as recalled but carried no recall type.
    #[error("Sentence '{sentence_id}' is recalled but has no recall type")]
    MissingRecallType {
        /// The ID of the sentence.
        sentence_id: String,
    },

    /// A recall type the engine does not support.
    #[error("Unsupported recall type {recall} on sentence '{sentence_id}'")]
    UnsupportedRecallType {
        /// The ID of the sentence.
        sentence_id: String,
        /// The unsupported recall type, as displayed.
        recall: String,
    },

    /// A fixed-term recall release was requested without a return-to-custody
    /// date.
    #[error("No valid return-to-custody date for fixed-term recall on sentence '{sentence_id}'")]
    MissingReturnToCustodyDate {
        /// The ID of the sentence.
        sentence_id: String,
    },

    /// A sentence variant that cannot take part in a consecutive chain was
    /// encountered while combining durations.
    #[error("Sentence '{sentence_id}' of kind {kind} cannot be served consecutively")]
    UnsupportedConsecutiveMember {
        /// The ID of the offending member.
        sentence_id: String,
        /// The sentence kind, as displayed.
        kind: String,
    },

    /// A consecutive chain reference could not be resolved.
    #[error("Invalid consecutive chain: {message}")]
    InvalidConsecutiveChain {
        /// A description of the broken link.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
