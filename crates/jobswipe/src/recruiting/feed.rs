//! Offerer side: role selection, the ranked candidate feed, swipes, and the shortlist.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, info};

use crate::questionnaire::SeekerId;

use super::domain::{
    CandidateCard, FeedPage, Offerer, OffererId, RoleConfig, RoleConfigId, RoleSelection,
    SeekerProfile, Shortlist, ShortlistEntry, SwipeAction, SwipeDecision, SwipeReceipt,
};
use super::repository::{FeedQuery, RecruitingRepository, RepositoryError};
use super::service::{check_length, RecruitingError, RecruitingService};

pub const DEFAULT_FEED_LIMIT: usize = 10;
pub const MAX_FEED_LIMIT: usize = 50;
pub(crate) const COMPANY_MAX_CHARS: usize = 255;
pub(crate) const NOTE_MAX_CHARS: usize = 2000;

static OFFERER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_offerer_id() -> OffererId {
    let id = OFFERER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OffererId(format!("off-{id:06}"))
}

impl<R> RecruitingService<R>
where
    R: RecruitingRepository + 'static,
{
    pub fn register_offerer(&self, company: &str) -> Result<Offerer, RecruitingError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(RecruitingError::Validation(
                "company must not be empty".to_string(),
            ));
        }
        check_length("company", Some(company), COMPANY_MAX_CHARS)?;

        let offerer = self.repository.insert_offerer(Offerer {
            id: next_offerer_id(),
            company: company.to_string(),
            role_config_id: None,
            created_at: Utc::now(),
        })?;
        info!(offerer = %offerer.id.0, "offerer registered");
        Ok(offerer)
    }

    /// Active role configurations sorted by role name.
    pub fn role_configs(&self) -> Result<Vec<RoleConfig>, RecruitingError> {
        let mut roles: Vec<_> = self
            .repository
            .role_configs()?
            .into_iter()
            .filter(|role| role.is_active)
            .collect();
        roles.sort_by(|left, right| left.role_name.cmp(&right.role_name));
        Ok(roles)
    }

    pub fn select_role(
        &self,
        offerer_id: &OffererId,
        role_config_id: &RoleConfigId,
    ) -> Result<RoleSelection, RecruitingError> {
        let mut offerer = self.offerer(offerer_id)?;
        let role = self
            .repository
            .role_config(role_config_id)?
            .filter(|role| role.is_active)
            .ok_or_else(|| RecruitingError::RoleConfigNotFound(role_config_id.0.clone()))?;

        offerer.role_config_id = Some(role.id.clone());
        self.repository.update_offerer(offerer)?;
        info!(offerer = %offerer_id.0, role = %role.role_name, "role selected");

        Ok(RoleSelection {
            message: format!("Role configuration set to {}", role.role_name),
            role_config_id: role.id,
            role_name: role.role_name,
        })
    }

    /// One page of unswiped candidates for the offerer's selected role.
    ///
    /// Pages walk seekers in ascending id order; within a page candidates are ranked by
    /// their cached fit score, highest first.
    pub fn feed(
        &self,
        offerer_id: &OffererId,
        cursor: Option<SeekerId>,
        limit: Option<usize>,
    ) -> Result<FeedPage, RecruitingError> {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT);
        if !(1..=MAX_FEED_LIMIT).contains(&limit) {
            return Err(RecruitingError::Validation(format!(
                "limit must be between 1 and {MAX_FEED_LIMIT}"
            )));
        }

        let offerer = self.offerer(offerer_id)?;
        let role_config_id = offerer
            .role_config_id
            .ok_or(RecruitingError::RoleNotSelected)?;
        let role = self
            .repository
            .role_config(&role_config_id)?
            .ok_or_else(|| RecruitingError::RoleConfigNotFound(role_config_id.0.clone()))?;

        let exclude: BTreeSet<SeekerId> = self
            .repository
            .swipes_for(offerer_id)?
            .into_iter()
            .map(|swipe| swipe.seeker_id)
            .collect();
        let mut profiles = self.repository.feed_candidates(&FeedQuery {
            after: cursor,
            limit: limit + 1,
            exclude,
        })?;

        let has_more = profiles.len() > limit;
        profiles.truncate(limit);
        let next_cursor = if has_more {
            profiles.last().map(|profile| profile.id.clone())
        } else {
            None
        };

        debug!(
            offerer = %offerer_id.0,
            role = %role.role_name,
            candidates = profiles.len(),
            has_more,
            "feed page built"
        );

        Ok(FeedPage {
            candidates: rank_candidates(profiles, &role.role_name),
            next_cursor,
            has_more,
        })
    }

    pub fn swipe(
        &self,
        offerer_id: &OffererId,
        seeker_id: &SeekerId,
        decision: &str,
    ) -> Result<SwipeReceipt, RecruitingError> {
        let action = SwipeAction::parse(decision)
            .ok_or_else(|| RecruitingError::InvalidDecision(decision.to_string()))?;
        let offerer = self.offerer(offerer_id)?;
        if self.repository.seeker(seeker_id)?.is_none() {
            return Err(RecruitingError::SeekerNotFound(seeker_id.0.clone()));
        }

        let swipe = SwipeDecision {
            offerer_id: offerer_id.clone(),
            seeker_id: seeker_id.clone(),
            action,
            role_config_id: offerer.role_config_id,
            note: None,
            swiped_at: Utc::now(),
        };
        match self.repository.insert_swipe(swipe) {
            Ok(_) => {}
            Err(RepositoryError::Conflict) => {
                return Err(RecruitingError::AlreadySwiped(seeker_id.0.clone()))
            }
            Err(other) => return Err(other.into()),
        }
        info!(offerer = %offerer_id.0, seeker = %seeker_id.0, decision = %action, "swipe recorded");

        let message = match action {
            SwipeAction::Like => "Candidate added to shortlist",
            SwipeAction::Pass => "Candidate passed",
        };
        Ok(SwipeReceipt {
            seeker_id: seeker_id.clone(),
            decision: action,
            message: message.to_string(),
        })
    }

    /// Liked candidates, most recent swipe first.
    pub fn shortlist(&self, offerer_id: &OffererId) -> Result<Shortlist, RecruitingError> {
        let offerer = self.offerer(offerer_id)?;
        let role_name = match &offerer.role_config_id {
            Some(id) => self.repository.role_config(id)?.map(|role| role.role_name),
            None => None,
        };

        let mut likes: Vec<SwipeDecision> = self
            .repository
            .swipes_for(offerer_id)?
            .into_iter()
            .filter(|swipe| swipe.action == SwipeAction::Like)
            .collect();
        likes.sort_by(|left, right| right.swiped_at.cmp(&left.swiped_at));

        let mut candidates = Vec::with_capacity(likes.len());
        for swipe in likes {
            let Some(profile) = self.repository.seeker(&swipe.seeker_id)? else {
                continue;
            };
            let fit_score = role_name
                .as_deref()
                .map(|name| profile.cached_fit_score(name))
                .unwrap_or(0.0);
            candidates.push(ShortlistEntry {
                stats: profile.cached_stats(),
                seeker_id: profile.id,
                headline: profile.headline,
                location: profile.location,
                bio: profile.bio,
                fit_score,
                note: swipe.note,
                swiped_at: swipe.swiped_at,
            });
        }

        Ok(Shortlist {
            total: candidates.len(),
            candidates,
        })
    }

    /// Attaches a private note to a liked candidate, replacing any previous note.
    pub fn annotate(
        &self,
        offerer_id: &OffererId,
        seeker_id: &SeekerId,
        note: Option<String>,
    ) -> Result<SwipeDecision, RecruitingError> {
        check_length("note", note.as_deref(), NOTE_MAX_CHARS)?;
        self.offerer(offerer_id)?;

        let mut swipe = self
            .repository
            .swipes_for(offerer_id)?
            .into_iter()
            .find(|swipe| &swipe.seeker_id == seeker_id && swipe.action == SwipeAction::Like)
            .ok_or_else(|| RecruitingError::NotShortlisted(seeker_id.0.clone()))?;

        swipe.note = note;
        self.repository.update_swipe(swipe.clone())?;
        Ok(swipe)
    }

    fn offerer(&self, offerer_id: &OffererId) -> Result<Offerer, RecruitingError> {
        self.repository
            .offerer(offerer_id)?
            .ok_or_else(|| RecruitingError::OffererNotFound(offerer_id.0.clone()))
    }
}

/// Builds candidate cards ranked by cached fit score for `role_name`, highest first.
/// Equal scores keep their incoming order.
pub fn rank_candidates(profiles: Vec<SeekerProfile>, role_name: &str) -> Vec<CandidateCard> {
    let mut cards: Vec<CandidateCard> = profiles
        .into_iter()
        .map(|profile| CandidateCard {
            fit_score: profile.cached_fit_score(role_name),
            stats: profile.cached_stats(),
            stats_computed_at: profile.stats_card.as_ref().map(|card| card.computed_at),
            seeker_id: profile.id,
            headline: profile.headline,
            location: profile.location,
            bio: profile.bio,
            questionnaire_completed: profile.questionnaire_completed,
        })
        .collect();
    cards.sort_by(|left, right| right.fit_score.total_cmp(&left.fit_score));
    cards
}
