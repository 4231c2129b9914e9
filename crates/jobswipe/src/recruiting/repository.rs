use std::collections::BTreeSet;

use crate::questionnaire::{Answer, Question, QuestionId, Questionnaire, SeekerId};

use super::domain::{Offerer, OffererId, RoleConfig, RoleConfigId, SeekerProfile, SwipeDecision};

/// Page request for feed-eligible seekers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedQuery {
    /// Only seekers whose id sorts strictly after this one.
    pub after: Option<SeekerId>,
    pub limit: usize,
    pub exclude: BTreeSet<SeekerId>,
}

/// Storage abstraction so the service can be exercised without a database.
///
/// Implementations keep at most one answer per (seeker, question) and at most one swipe per
/// (offerer, seeker). Writes are plain overwrites.
pub trait RecruitingRepository: Send + Sync {
    fn active_questionnaire(&self) -> Result<Option<Questionnaire>, RepositoryError>;
    fn questions(&self, ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError>;

    fn upsert_answer(&self, answer: Answer) -> Result<(), RepositoryError>;
    fn answers_for(&self, seeker: &SeekerId) -> Result<Vec<Answer>, RepositoryError>;

    fn seeker(&self, id: &SeekerId) -> Result<Option<SeekerProfile>, RepositoryError>;
    fn save_seeker(&self, profile: SeekerProfile) -> Result<(), RepositoryError>;
    /// Seekers with a completed questionnaire and a stats card, ascending by id.
    fn feed_candidates(&self, query: &FeedQuery) -> Result<Vec<SeekerProfile>, RepositoryError>;

    fn role_configs(&self) -> Result<Vec<RoleConfig>, RepositoryError>;
    fn role_config(&self, id: &RoleConfigId) -> Result<Option<RoleConfig>, RepositoryError>;

    fn offerer(&self, id: &OffererId) -> Result<Option<Offerer>, RepositoryError>;
    fn insert_offerer(&self, offerer: Offerer) -> Result<Offerer, RepositoryError>;
    fn update_offerer(&self, offerer: Offerer) -> Result<(), RepositoryError>;

    fn swipes_for(&self, offerer: &OffererId) -> Result<Vec<SwipeDecision>, RepositoryError>;
    /// Fails with [`RepositoryError::Conflict`] when the pair was already swiped.
    fn insert_swipe(&self, swipe: SwipeDecision) -> Result<SwipeDecision, RepositoryError>;
    fn update_swipe(&self, swipe: SwipeDecision) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
