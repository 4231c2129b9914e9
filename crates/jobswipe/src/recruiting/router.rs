use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::questionnaire::{AnswerSubmission, SeekerId};

use super::domain::{OffererId, ProfileUpdate, RoleConfigId};
use super::repository::{RecruitingRepository, RepositoryError};
use super::service::{RecruitingError, RecruitingService};

/// Router builder exposing the seeker and offerer endpoints.
pub fn recruiting_router<R>(service: Arc<RecruitingService<R>>) -> Router
where
    R: RecruitingRepository + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler::<R>))
        .route(
            "/api/v1/seekers/:seeker_id/answers",
            post(submit_answers_handler::<R>),
        )
        .route(
            "/api/v1/seekers/:seeker_id/profile",
            put(update_profile_handler::<R>),
        )
        .route("/api/v1/seekers/:seeker_id/stats", get(stats_handler::<R>))
        .route("/api/v1/roles", get(roles_handler::<R>))
        .route("/api/v1/offerers", post(register_offerer_handler::<R>))
        .route(
            "/api/v1/offerers/:offerer_id/config",
            put(select_role_handler::<R>),
        )
        .route("/api/v1/offerers/:offerer_id/feed", get(feed_handler::<R>))
        .route(
            "/api/v1/offerers/:offerer_id/swipes",
            post(swipe_handler::<R>),
        )
        .route(
            "/api/v1/offerers/:offerer_id/shortlist",
            get(shortlist_handler::<R>),
        )
        .route(
            "/api/v1/offerers/:offerer_id/shortlist/:seeker_id/note",
            put(note_handler::<R>),
        )
        .with_state(service)
}

impl RecruitingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecruitingError::InvalidQuestion(_)
            | RecruitingError::RoleNotSelected
            | RecruitingError::InvalidDecision(_)
            | RecruitingError::Validation(_) => StatusCode::BAD_REQUEST,
            RecruitingError::NoActiveQuestionnaire
            | RecruitingError::SeekerNotFound(_)
            | RecruitingError::OffererNotFound(_)
            | RecruitingError::RoleConfigNotFound(_)
            | RecruitingError::NotShortlisted(_)
            | RecruitingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            RecruitingError::AlreadySwiped(_)
            | RecruitingError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            RecruitingError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RecruitingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "recruiting request failed");
        }
        let payload = json!({
            "error": self.to_string(),
        });
        (status, axum::Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswersRequest {
    pub(crate) answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsParams {
    #[serde(default = "default_include_fit_scores")]
    pub(crate) include_fit_scores: bool,
}

fn default_include_fit_scores() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterOffererRequest {
    pub(crate) company: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleSelectionRequest {
    pub(crate) role_config_id: RoleConfigId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FeedParams {
    #[serde(default)]
    pub(crate) cursor: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SwipeRequest {
    pub(crate) seeker_id: SeekerId,
    pub(crate) decision: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NoteRequest {
    #[serde(default)]
    pub(crate) note: Option<String>,
}

pub(crate) async fn questionnaire_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.questionnaire() {
        Ok(questionnaire) => (StatusCode::OK, axum::Json(questionnaire)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn submit_answers_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(seeker_id): Path<String>,
    axum::Json(request): axum::Json<AnswersRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.submit_answers(&SeekerId(seeker_id), request.answers) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn update_profile_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(seeker_id): Path<String>,
    axum::Json(update): axum::Json<ProfileUpdate>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.update_profile(&SeekerId(seeker_id), update) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(seeker_id): Path<String>,
    Query(params): Query<StatsParams>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.seeker_stats(&SeekerId(seeker_id), params.include_fit_scores) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn roles_handler<R>(State(service): State<Arc<RecruitingService<R>>>) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.role_configs() {
        Ok(roles) => (StatusCode::OK, axum::Json(roles)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn register_offerer_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    axum::Json(request): axum::Json<RegisterOffererRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.register_offerer(&request.company) {
        Ok(offerer) => (StatusCode::CREATED, axum::Json(offerer)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn select_role_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(offerer_id): Path<String>,
    axum::Json(request): axum::Json<RoleSelectionRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.select_role(&OffererId(offerer_id), &request.role_config_id) {
        Ok(selection) => (StatusCode::OK, axum::Json(selection)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn feed_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(offerer_id): Path<String>,
    Query(params): Query<FeedParams>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    let cursor = params
        .cursor
        .filter(|value| !value.trim().is_empty())
        .map(SeekerId);
    match service.feed(&OffererId(offerer_id), cursor, params.limit) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn swipe_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(offerer_id): Path<String>,
    axum::Json(request): axum::Json<SwipeRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.swipe(&OffererId(offerer_id), &request.seeker_id, &request.decision) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn shortlist_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path(offerer_id): Path<String>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.shortlist(&OffererId(offerer_id)) {
        Ok(shortlist) => (StatusCode::OK, axum::Json(shortlist)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn note_handler<R>(
    State(service): State<Arc<RecruitingService<R>>>,
    Path((offerer_id, seeker_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<NoteRequest>,
) -> Response
where
    R: RecruitingRepository + 'static,
{
    match service.annotate(&OffererId(offerer_id), &SeekerId(seeker_id), request.note) {
        Ok(swipe) => {
            let payload = json!({
                "seeker_id": swipe.seeker_id,
                "note": swipe.note,
                "message": "Note added successfully",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
