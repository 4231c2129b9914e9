//! Seeker questionnaire intake, cached stats cards, and the offerer swipe feed.

pub mod catalog;
pub mod domain;
pub mod feed;
pub mod import;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogError};
pub use domain::{
    CandidateCard, FeedPage, Offerer, OffererId, ProfileUpdate, RoleConfig, RoleConfigId,
    RoleSelection, SeekerProfile, SeekerStatsView, Shortlist, ShortlistEntry, StatsCard,
    SubmissionReceipt, SwipeAction, SwipeDecision, SwipeReceipt,
};
pub use feed::{rank_candidates, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT};
pub use import::{import_answers_from_path, parse_answers, AnswerImportError};
pub use memory::InMemoryRecruitingRepository;
pub use repository::{FeedQuery, RecruitingRepository, RepositoryError};
pub use router::recruiting_router;
pub use service::{RecruitingError, RecruitingService};
