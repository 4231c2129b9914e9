//! Scoring engine and recruiting workflows behind the JobSwipe service.

pub mod config;
pub mod error;
pub mod questionnaire;
pub mod recruiting;
pub mod scoring;
pub mod telemetry;
