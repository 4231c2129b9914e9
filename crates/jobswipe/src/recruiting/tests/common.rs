use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::questionnaire::{
    AnswerSubmission, Question, QuestionId, QuestionOptions, QuestionType, Questionnaire,
    QuestionnaireId, ScoringRule, SeekerId,
};
use crate::recruiting::domain::{
    Offerer, OffererId, RoleConfig, RoleConfigId, SeekerProfile, SwipeDecision,
};
use crate::recruiting::memory::InMemoryRecruitingRepository;
use crate::recruiting::repository::{FeedQuery, RecruitingRepository, RepositoryError};
use crate::recruiting::service::RecruitingService;
use crate::scoring::{AnswerValue, Attribute, RoleWeightVector, RuleSet, ScoringEngine};

pub(super) const ENGINEER: &str = "Software Engineer";
pub(super) const TEAM_LEAD: &str = "Team Lead";

fn scale_question(id: &str, order: i32, attribute: Attribute) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        questionnaire_id: QuestionnaireId("general".to_string()),
        text: format!("Rate your {}", attribute.label()),
        question_type: QuestionType::Scale,
        order,
        options: Some(QuestionOptions::scale(1.0, 5.0)),
        scoring_config: Some(ScoringRule::new(attribute, 1.0)),
        is_active: true,
    }
}

/// Three 1-5 scale questions, stored out of display order.
pub(super) fn questionnaire() -> Questionnaire {
    Questionnaire {
        id: QuestionnaireId("general".to_string()),
        name: "General Assessment".to_string(),
        description: None,
        version: 1,
        is_active: true,
        questions: vec![
            scale_question("q-lead", 3, Attribute::Leadership),
            scale_question("q-tech", 1, Attribute::TechnicalSkills),
            scale_question("q-comm", 2, Attribute::Communication),
        ],
    }
}

pub(super) fn roles() -> Vec<RoleConfig> {
    vec![
        RoleConfig {
            id: RoleConfigId("role-lead".to_string()),
            role_name: TEAM_LEAD.to_string(),
            description: None,
            weights: RoleWeightVector::new()
                .with(Attribute::Leadership, 0.6)
                .with(Attribute::Communication, 0.4),
            is_active: true,
        },
        RoleConfig {
            id: RoleConfigId("role-eng".to_string()),
            role_name: ENGINEER.to_string(),
            description: Some("Builds and ships software".to_string()),
            weights: RoleWeightVector::new()
                .with(Attribute::TechnicalSkills, 0.7)
                .with(Attribute::Communication, 0.3),
            is_active: true,
        },
        RoleConfig {
            id: RoleConfigId("role-archived".to_string()),
            role_name: "Archived Role".to_string(),
            description: None,
            weights: RoleWeightVector::new().with(Attribute::Teamwork, 1.0),
            is_active: false,
        },
    ]
}

pub(super) fn seeded_repository() -> InMemoryRecruitingRepository {
    let repository = InMemoryRecruitingRepository::default();
    repository.insert_questionnaire(questionnaire());
    for role in roles() {
        repository.insert_role_config(role);
    }
    repository
}

pub(super) fn engine() -> Arc<ScoringEngine> {
    Arc::new(ScoringEngine::new(RuleSet::standard()))
}

pub(super) fn build_service() -> (
    RecruitingService<InMemoryRecruitingRepository>,
    Arc<InMemoryRecruitingRepository>,
) {
    let repository = Arc::new(seeded_repository());
    let service = RecruitingService::new(repository.clone(), engine());
    (service, repository)
}

pub(super) fn seeker(id: &str) -> SeekerId {
    SeekerId(id.to_string())
}

pub(super) fn answer(question_id: &str, value: f64) -> AnswerSubmission {
    AnswerSubmission {
        question_id: QuestionId(question_id.to_string()),
        value: AnswerValue::Number(value),
    }
}

/// Answers every question and refreshes the stats card so the seeker is feed-eligible.
pub(super) fn complete_seeker(
    service: &RecruitingService<InMemoryRecruitingRepository>,
    id: &str,
    technical: f64,
    communication: f64,
    leadership: f64,
) {
    let seeker_id = seeker(id);
    service
        .submit_answers(
            &seeker_id,
            vec![
                answer("q-tech", technical),
                answer("q-comm", communication),
                answer("q-lead", leadership),
            ],
        )
        .expect("answers stored");
    service
        .seeker_stats(&seeker_id, true)
        .expect("stats computed");
}

/// s-1 fits engineering best (85.0), s-2 leadership (100.0), s-3 sits between (75.0 / 30.0).
pub(super) fn seed_candidates(service: &RecruitingService<InMemoryRecruitingRepository>) {
    complete_seeker(service, "s-1", 5.0, 3.0, 2.0);
    complete_seeker(service, "s-2", 3.0, 5.0, 5.0);
    complete_seeker(service, "s-3", 4.0, 4.0, 1.0);
}

pub(super) fn offerer_with_role(
    service: &RecruitingService<InMemoryRecruitingRepository>,
    role: &str,
) -> OffererId {
    let offerer = service
        .register_offerer("Acme Corp")
        .expect("offerer registered");
    service
        .select_role(&offerer.id, &RoleConfigId(role.to_string()))
        .expect("role selected");
    offerer.id
}

pub(super) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) struct UnavailableRepository;

impl RecruitingRepository for UnavailableRepository {
    fn active_questionnaire(&self) -> Result<Option<Questionnaire>, RepositoryError> {
        Err(offline())
    }

    fn questions(&self, _ids: &[QuestionId]) -> Result<Vec<Question>, RepositoryError> {
        Err(offline())
    }

    fn upsert_answer(&self, _answer: crate::questionnaire::Answer) -> Result<(), RepositoryError> {
        Err(offline())
    }

    fn answers_for(
        &self,
        _seeker: &SeekerId,
    ) -> Result<Vec<crate::questionnaire::Answer>, RepositoryError> {
        Err(offline())
    }

    fn seeker(&self, _id: &SeekerId) -> Result<Option<SeekerProfile>, RepositoryError> {
        Err(offline())
    }

    fn save_seeker(&self, _profile: SeekerProfile) -> Result<(), RepositoryError> {
        Err(offline())
    }

    fn feed_candidates(&self, _query: &FeedQuery) -> Result<Vec<SeekerProfile>, RepositoryError> {
        Err(offline())
    }

    fn role_configs(&self) -> Result<Vec<RoleConfig>, RepositoryError> {
        Err(offline())
    }

    fn role_config(&self, _id: &RoleConfigId) -> Result<Option<RoleConfig>, RepositoryError> {
        Err(offline())
    }

    fn offerer(&self, _id: &OffererId) -> Result<Option<Offerer>, RepositoryError> {
        Err(offline())
    }

    fn insert_offerer(&self, _offerer: Offerer) -> Result<Offerer, RepositoryError> {
        Err(offline())
    }

    fn update_offerer(&self, _offerer: Offerer) -> Result<(), RepositoryError> {
        Err(offline())
    }

    fn swipes_for(&self, _offerer: &OffererId) -> Result<Vec<SwipeDecision>, RepositoryError> {
        Err(offline())
    }

    fn insert_swipe(&self, _swipe: SwipeDecision) -> Result<SwipeDecision, RepositoryError> {
        Err(offline())
    }

    fn update_swipe(&self, _swipe: SwipeDecision) -> Result<(), RepositoryError> {
        Err(offline())
    }
}

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}

pub(super) fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
