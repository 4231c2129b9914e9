use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::questionnaire::{Answer, Question, QuestionId, Questionnaire, SeekerId};

use super::catalog::Catalog;
use super::domain::{Offerer, OffererId, RoleConfig, RoleConfigId, SeekerProfile, SwipeDecision};
use super::repository::{FeedQuery, RecruitingRepository, RepositoryError};

/// Process-local repository. Suitable for demos, tests, and single-instance deployments.
#[derive(Default, Clone)]
pub struct InMemoryRecruitingRepository {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    questionnaires: Vec<Questionnaire>,
    answers: BTreeMap<(SeekerId, QuestionId), Answer>,
    seekers: BTreeMap<SeekerId, SeekerProfile>,
    roles: BTreeMap<RoleConfigId, RoleConfig>,
    offerers: HashMap<OffererId, Offerer>,
    swipes: BTreeMap<(OffererId, SeekerId), SwipeDecision>,
}

impl InMemoryRecruitingRepository {
    pub fn from_catalog(catalog: Catalog) -> Self {
        let repository = Self::default();
        repository.insert_questionnaire(catalog.questionnaire);
        for role in catalog.roles {
            repository.insert_role_config(role);
        }
        repository
    }

    /// Adds a questionnaire, replacing any stored one with the same id.
    pub fn insert_questionnaire(&self, questionnaire: Questionnaire) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .questionnaires
            .retain(|existing| existing.id != questionnaire.id);
        state.questionnaires.push(questionnaire);
    }

    pub fn insert_role_config(&self, role: RoleConfig) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.roles.insert(role.id.clone(), role);
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("in-memory store mutex poisoned".to_string()))
    }
}

impl RecruitingRepository for InMemoryRecruitingRepository {
    fn active_questionnaire(&self) -> Result<Option<Questionnaire>, RepositoryError> {
        let state = self.state()?;
        Ok(state
            .questionnaires
            .iter()
            .find(|questionnaire| questionnaire.is_active)
            .cloned())
    }

    fn questions(&self, ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError> {
        let state = self.state()?;
        Ok(state
            .questionnaires
            .iter()
            .flat_map(|questionnaire| questionnaire.questions.iter())
            .filter(|question| ids.contains(&question.id))
            .cloned()
            .collect())
    }

    fn upsert_answer(&self, answer: Answer) -> Result<(), RepositoryError> {
        let mut state = self.state()?;
        let key = (answer.seeker_id.clone(), answer.question_id.clone());
        state.answers.insert(key, answer);
        Ok(())
    }

    fn answers_for(&self, seeker: &SeekerId) -> Result<Vec<Answer>, RepositoryError> {
        let state = self.state()?;
        Ok(state
            .answers
            .iter()
            .filter(|((owner, _), _)| owner == seeker)
            .map(|(_, answer)| answer.clone())
            .collect())
    }

    fn seeker(&self, id: &SeekerId) -> Result<Option<SeekerProfile>, RepositoryError> {
        let state = self.state()?;
        Ok(state.seekers.get(id).cloned())
    }

    fn save_seeker(&self, profile: SeekerProfile) -> Result<(), RepositoryError> {
        let mut state = self.state()?;
        state.seekers.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn feed_candidates(&self, query: &FeedQuery) -> Result<Vec<SeekerProfile>, RepositoryError> {
        let state = self.state()?;
        Ok(state
            .seekers
            .values()
            .filter(|profile| profile.questionnaire_completed && profile.stats_card.is_some())
            .filter(|profile| !query.exclude.contains(&profile.id))
            .filter(|profile| {
                query
                    .after
                    .as_ref()
                    .map_or(true, |cursor| &profile.id > cursor)
            })
            .take(query.limit)
            .cloned()
            .collect())
    }

    fn role_configs(&self) -> Result<Vec<RoleConfig>, RepositoryError> {
        let state = self.state()?;
        Ok(state.roles.values().cloned().collect())
    }

    fn role_config(&self, id: &RoleConfigId) -> Result<Option<RoleConfig>, RepositoryError> {
        let state = self.state()?;
        Ok(state.roles.get(id).cloned())
    }

    fn offerer(&self, id: &OffererId) -> Result<Option<Offerer>, RepositoryError> {
        let state = self.state()?;
        Ok(state.offerers.get(id).cloned())
    }

    fn insert_offerer(&self, offerer: Offerer) -> Result<Offerer, RepositoryError> {
        let mut state = self.state()?;
        if state.offerers.contains_key(&offerer.id) {
            return Err(RepositoryError::Conflict);
        }
        state.offerers.insert(offerer.id.clone(), offerer.clone());
        Ok(offerer)
    }

    fn update_offerer(&self, offerer: Offerer) -> Result<(), RepositoryError> {
        let mut state = self.state()?;
        match state.offerers.get_mut(&offerer.id) {
            Some(existing) => {
                *existing = offerer;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn swipes_for(&self, offerer: &OffererId) -> Result<Vec<SwipeDecision>, RepositoryError> {
        let state = self.state()?;
        Ok(state
            .swipes
            .iter()
            .filter(|((owner, _), _)| owner == offerer)
            .map(|(_, swipe)| swipe.clone())
            .collect())
    }

    fn insert_swipe(&self, swipe: SwipeDecision) -> Result<SwipeDecision, RepositoryError> {
        let mut state = self.state()?;
        let key = (swipe.offerer_id.clone(), swipe.seeker_id.clone());
        if state.swipes.contains_key(&key) {
            return Err(RepositoryError::Conflict);
        }
        state.swipes.insert(key, swipe.clone());
        Ok(swipe)
    }

    fn update_swipe(&self, swipe: SwipeDecision) -> Result<(), RepositoryError> {
        let mut state = self.state()?;
        let key = (swipe.offerer_id.clone(), swipe.seeker_id.clone());
        match state.swipes.get_mut(&key) {
            Some(existing) => {
                *existing = swipe;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}
