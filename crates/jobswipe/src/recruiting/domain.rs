use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::questionnaire::SeekerId;
use crate::scoring::{FitScoreSet, RoleWeightVector, StatsSnapshot};

/// Identifier wrapper for role configurations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleConfigId(pub String);

/// Identifier wrapper for offerers (recruiters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OffererId(pub String);

/// Role an offerer can rank candidates for, with its attribute weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub id: RoleConfigId,
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weights: RoleWeightVector,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Last computed scores, cached on the seeker profile for feed ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsCard {
    pub stats: StatsSnapshot,
    pub fit_scores: FitScoreSet,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekerProfile {
    pub id: SeekerId,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub questionnaire_completed: bool,
    pub questionnaire_completed_at: Option<DateTime<Utc>>,
    pub stats_card: Option<StatsCard>,
    pub updated_at: DateTime<Utc>,
}

impl SeekerProfile {
    pub fn new(id: SeekerId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            headline: None,
            location: None,
            bio: None,
            questionnaire_completed: false,
            questionnaire_completed_at: None,
            stats_card: None,
            updated_at: now,
        }
    }

    /// Cached fit score for `role_name`, or 0.0 when nothing has been computed for it.
    pub fn cached_fit_score(&self, role_name: &str) -> f64 {
        self.stats_card
            .as_ref()
            .and_then(|card| card.fit_scores.get(role_name))
            .unwrap_or(0.0)
    }

    pub fn cached_stats(&self) -> StatsSnapshot {
        self.stats_card
            .as_ref()
            .map(|card| card.stats.clone())
            .unwrap_or_default()
    }
}

/// Optional free-text fields a seeker can edit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offerer {
    pub id: OffererId,
    pub company: String,
    pub role_config_id: Option<RoleConfigId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    Like,
    Pass,
}

impl SwipeAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "like" => Some(Self::Like),
            "pass" => Some(Self::Pass),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SwipeAction::Like => "like",
            SwipeAction::Pass => "pass",
        }
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One offerer's decision on one seeker. A liked seeker is on the offerer's shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeDecision {
    pub offerer_id: OffererId,
    pub seeker_id: SeekerId,
    pub action: SwipeAction,
    pub role_config_id: Option<RoleConfigId>,
    pub note: Option<String>,
    pub swiped_at: DateTime<Utc>,
}

/// Progress reported back after an answer batch is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub total_questions: usize,
    pub answered_questions: usize,
    pub completion_percent: f64,
    pub updated_answers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekerStatsView {
    pub seeker_id: SeekerId,
    pub stats: StatsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_scores: Option<FitScoreSet>,
    pub questionnaire_completed: bool,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSelection {
    pub role_config_id: RoleConfigId,
    pub role_name: String,
    pub message: String,
}

/// Feed entry without contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCard {
    pub seeker_id: SeekerId,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub stats: StatsSnapshot,
    pub fit_score: f64,
    pub questionnaire_completed: bool,
    pub stats_computed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub candidates: Vec<CandidateCard>,
    pub next_cursor: Option<SeekerId>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeReceipt {
    pub seeker_id: SeekerId,
    pub decision: SwipeAction,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub seeker_id: SeekerId,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub stats: StatsSnapshot,
    pub fit_score: f64,
    pub note: Option<String>,
    pub swiped_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortlist {
    pub candidates: Vec<ShortlistEntry>,
    pub total: usize,
}
