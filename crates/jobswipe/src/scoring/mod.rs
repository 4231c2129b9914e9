//! Scoring engine: raw questionnaire answers to attribute scores, and attribute scores to
//! per-role fit scores. Everything here is pure and synchronous.

mod attribute;
mod engine;
mod fit;
pub mod normalize;
mod rules;
mod stats;
mod value;

pub use attribute::{Attribute, UnknownAttribute};
pub use engine::ScoringEngine;
pub use fit::{compute_fit_scores, fit_score, FitScoreSet, RoleWeightVector};
pub use normalize::{normalize, round_to_cents};
pub use rules::{AttributeDefinition, RuleSet, RuleSetError};
pub use stats::{attribute_score, compute_snapshot, StatsSnapshot};
pub use value::{AnswerValue, StructuredAnswer};
