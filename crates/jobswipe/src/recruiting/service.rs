use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info};

use crate::questionnaire::{Answer, AnswerSubmission, QuestionLookup, Questionnaire, SeekerId};
use crate::scoring::{round_to_cents, ScoringEngine};

use super::domain::{
    ProfileUpdate, SeekerProfile, SeekerStatsView, StatsCard, SubmissionReceipt,
};
use super::repository::{RecruitingRepository, RepositoryError};

pub(crate) const HEADLINE_MAX_CHARS: usize = 500;
pub(crate) const LOCATION_MAX_CHARS: usize = 255;
pub(crate) const BIO_MAX_CHARS: usize = 2000;

/// Service composing the repository with the scoring engine.
///
/// Offerer-side operations live in `feed.rs`.
pub struct RecruitingService<R> {
    pub(super) repository: Arc<R>,
    engine: Arc<ScoringEngine>,
    pub(super) recompute_locks: Mutex<HashMap<SeekerId, Arc<Mutex<()>>>>,
}

impl<R> RecruitingService<R>
where
    R: RecruitingRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<ScoringEngine>) -> Self {
        Self {
            repository,
            engine,
            recompute_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Active questionnaire with its active questions in display order.
    pub fn questionnaire(&self) -> Result<Questionnaire, RecruitingError> {
        let mut questionnaire = self.active_questionnaire()?;
        questionnaire.questions = questionnaire
            .ordered_questions()
            .into_iter()
            .filter(|question| question.is_active)
            .cloned()
            .collect();
        Ok(questionnaire)
    }

    /// Upserts a batch of answers and reports questionnaire progress.
    ///
    /// The batch is validated as a whole; one unknown question rejects it before any write.
    pub fn submit_answers(
        &self,
        seeker_id: &SeekerId,
        submissions: Vec<AnswerSubmission>,
    ) -> Result<SubmissionReceipt, RecruitingError> {
        let questionnaire = self.active_questionnaire()?;
        if let Some(invalid) = submissions
            .iter()
            .find(|submission| !questionnaire.contains(&submission.question_id))
        {
            return Err(RecruitingError::InvalidQuestion(invalid.question_id.0.clone()));
        }

        let now = Utc::now();
        let mut profile = self
            .repository
            .seeker(seeker_id)?
            .unwrap_or_else(|| SeekerProfile::new(seeker_id.clone(), now));

        let updated_answers = submissions.len();
        for submission in submissions {
            self.repository.upsert_answer(Answer {
                seeker_id: seeker_id.clone(),
                question_id: submission.question_id,
                value: submission.value,
                answered_at: now,
            })?;
        }

        let total_questions = questionnaire.questions.len();
        let answered_questions = self
            .repository
            .answers_for(seeker_id)?
            .iter()
            .filter(|answer| questionnaire.contains(&answer.question_id))
            .count();
        let completion_percent = if total_questions == 0 {
            0.0
        } else {
            round_to_cents(answered_questions as f64 / total_questions as f64 * 100.0)
        };

        if completion_percent >= 100.0 && !profile.questionnaire_completed {
            profile.questionnaire_completed = true;
            profile.questionnaire_completed_at = Some(now);
            info!(seeker = %seeker_id.0, "questionnaire completed");
        }
        profile.updated_at = now;
        self.repository.save_seeker(profile)?;

        debug!(
            seeker = %seeker_id.0,
            updated_answers,
            answered_questions,
            total_questions,
            "answers stored"
        );

        Ok(SubmissionReceipt {
            total_questions,
            answered_questions,
            completion_percent,
            updated_answers,
        })
    }

    pub fn update_profile(
        &self,
        seeker_id: &SeekerId,
        update: ProfileUpdate,
    ) -> Result<SeekerProfile, RecruitingError> {
        check_length("headline", update.headline.as_deref(), HEADLINE_MAX_CHARS)?;
        check_length("location", update.location.as_deref(), LOCATION_MAX_CHARS)?;
        check_length("bio", update.bio.as_deref(), BIO_MAX_CHARS)?;

        let now = Utc::now();
        let mut profile = self
            .repository
            .seeker(seeker_id)?
            .unwrap_or_else(|| SeekerProfile::new(seeker_id.clone(), now));

        if update.headline.is_some() {
            profile.headline = update.headline;
        }
        if update.location.is_some() {
            profile.location = update.location;
        }
        if update.bio.is_some() {
            profile.bio = update.bio;
        }
        profile.updated_at = now;

        self.repository.save_seeker(profile.clone())?;
        Ok(profile)
    }

    /// Recomputes the seeker's scores from every stored answer and overwrites the cached card.
    ///
    /// Fit scores are always cached so the feed can rank the seeker; `include_fit_scores` only
    /// controls whether they are returned.
    pub fn seeker_stats(
        &self,
        seeker_id: &SeekerId,
        include_fit_scores: bool,
    ) -> Result<SeekerStatsView, RecruitingError> {
        if self.repository.seeker(seeker_id)?.is_none() {
            return Err(RecruitingError::SeekerNotFound(seeker_id.0.clone()));
        }

        let lock = self.recompute_lock(seeker_id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.recompute(seeker_id, include_fit_scores)
        };
        self.release_recompute_lock(seeker_id, lock);
        result
    }

    fn recompute(
        &self,
        seeker_id: &SeekerId,
        include_fit_scores: bool,
    ) -> Result<SeekerStatsView, RecruitingError> {
        let mut profile = self
            .repository
            .seeker(seeker_id)?
            .ok_or_else(|| RecruitingError::SeekerNotFound(seeker_id.0.clone()))?;

        let answers = self.repository.answers_for(seeker_id)?;
        let question_ids: Vec<_> = answers
            .iter()
            .map(|answer| answer.question_id.clone())
            .collect();
        let questions: QuestionLookup = self
            .repository
            .questions(&question_ids)?
            .into_iter()
            .map(|question| (question.id.clone(), question))
            .collect();
        let roles: Vec<_> = self
            .repository
            .role_configs()?
            .into_iter()
            .filter(|role| role.is_active)
            .collect();

        let (stats, fit_scores) = self.engine.evaluate(
            &answers,
            &questions,
            roles
                .iter()
                .map(|role| (role.role_name.as_str(), &role.weights)),
        );

        let computed_at = Utc::now();
        profile.stats_card = Some(StatsCard {
            stats: stats.clone(),
            fit_scores: fit_scores.clone(),
            computed_at,
        });
        profile.updated_at = computed_at;
        let questionnaire_completed = profile.questionnaire_completed;
        self.repository.save_seeker(profile)?;

        info!(
            seeker = %seeker_id.0,
            answers = answers.len(),
            attributes = stats.len(),
            roles = fit_scores.len(),
            "seeker stats recomputed"
        );

        Ok(SeekerStatsView {
            seeker_id: seeker_id.clone(),
            stats,
            fit_scores: include_fit_scores.then_some(fit_scores),
            questionnaire_completed,
            computed_at,
        })
    }

    pub(super) fn active_questionnaire(&self) -> Result<Questionnaire, RecruitingError> {
        self.repository
            .active_questionnaire()?
            .ok_or(RecruitingError::NoActiveQuestionnaire)
    }

    fn recompute_lock(&self, seeker_id: &SeekerId) -> Arc<Mutex<()>> {
        let mut locks = self
            .recompute_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(seeker_id.clone()).or_default().clone()
    }

    /// Drops the seeker's entry once no other request holds or waits on it.
    fn release_recompute_lock(&self, seeker_id: &SeekerId, lock: Arc<Mutex<()>>) {
        let mut locks = self
            .recompute_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // One reference lives in the map, the other is `lock`.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(seeker_id);
        }
    }
}

pub(super) fn check_length(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), RecruitingError> {
    match value {
        Some(text) if text.chars().count() > max_chars => Err(RecruitingError::Validation(
            format!("{field} must be at most {max_chars} characters"),
        )),
        _ => Ok(()),
    }
}

/// Error raised by the recruiting service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingError {
    #[error("no active questionnaire found")]
    NoActiveQuestionnaire,
    #[error("invalid question_id: {0}")]
    InvalidQuestion(String),
    #[error("seeker profile '{0}' not found")]
    SeekerNotFound(String),
    #[error("offerer '{0}' not found")]
    OffererNotFound(String),
    #[error("role configuration '{0}' not found")]
    RoleConfigNotFound(String),
    #[error("select a role configuration before browsing the feed")]
    RoleNotSelected,
    #[error("decision must be 'like' or 'pass', got '{0}'")]
    InvalidDecision(String),
    #[error("candidate '{0}' was already swiped")]
    AlreadySwiped(String),
    #[error("candidate '{0}' is not on the shortlist")]
    NotShortlisted(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
