//! Release date calculation engine for determinate custodial sentences.
//!
//! This crate turns structured sentence, offence, recall and adjustment data
//! into typed release and expiry dates: calendar-aware duration arithmetic,
//! a polymorphic sentence family, consecutive-chain aggregation,
//! enhanced-release (SDS+) eligibility classification, an unadjusted release
//! date calculator driven by a swappable release-point policy, and
//! adjustment application with fixed precedence rules.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
