use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use jobswipe::questionnaire::{Answer, AnswerSubmission, Question, QuestionLookup, SeekerId};
use jobswipe::recruiting::{recruiting_router, RecruitingRepository, RecruitingService};
use jobswipe::scoring::{FitScoreSet, RoleWeightVector, StatsSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Ad-hoc scoring request: question metadata, answers, and role weights supplied inline.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoringPreviewRequest {
    pub(crate) questions: Vec<Question>,
    pub(crate) answers: Vec<AnswerSubmission>,
    #[serde(default)]
    pub(crate) roles: Vec<PreviewRole>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRole {
    pub(crate) role_name: String,
    pub(crate) weights: RoleWeightVector,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoringPreviewResponse {
    pub(crate) stats: StatsSnapshot,
    pub(crate) fit_scores: FitScoreSet,
}

pub(crate) fn with_recruiting_routes<R>(service: Arc<RecruitingService<R>>) -> axum::Router
where
    R: RecruitingRepository + 'static,
{
    recruiting_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/scoring/preview",
            axum::routing::post(scoring_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores the supplied answers without touching stored seekers.
pub(crate) async fn scoring_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoringPreviewRequest>,
) -> Json<ScoringPreviewResponse> {
    let ScoringPreviewRequest {
        questions,
        answers,
        roles,
    } = payload;

    let lookup: QuestionLookup = questions
        .into_iter()
        .map(|question| (question.id.clone(), question))
        .collect();
    let answered_at = Utc::now();
    let answers: Vec<Answer> = answers
        .into_iter()
        .map(|submission| Answer {
            seeker_id: SeekerId("preview".to_string()),
            question_id: submission.question_id,
            value: submission.value,
            answered_at,
        })
        .collect();

    let (stats, fit_scores) = state.engine.evaluate(
        &answers,
        &lookup,
        roles
            .iter()
            .map(|role| (role.role_name.as_str(), &role.weights)),
    );

    Json(ScoringPreviewResponse { stats, fit_scores })
}
