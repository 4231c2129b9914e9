use super::common::*;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::recruiting::router::{stats_handler, swipe_handler, StatsParams, SwipeRequest};
use crate::recruiting::{recruiting_router, RecruitingService};

#[tokio::test]
async fn questionnaire_route_returns_ordered_questions() {
    let (service, _) = build_service();
    let router = recruiting_router(Arc::new(service));

    let response = router
        .oneshot(get_request("/api/v1/questionnaire"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], "general");
    assert_eq!(payload["questions"][0]["id"], "q-tech");
    assert_eq!(payload["questions"][2]["id"], "q-lead");
}

#[tokio::test]
async fn answers_route_reports_completion_and_rejects_unknown_questions() {
    let (service, _) = build_service();
    let router = recruiting_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/seekers/s-1/answers",
            &json!({"answers": [
                {"question_id": "q-tech", "value": 4},
                {"question_id": "q-comm", "value": {"value": 3}},
                {"question_id": "q-lead", "value": "2"}
            ]}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["completion_percent"], 100.0);
    assert_eq!(payload["updated_answers"], 3);

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/seekers/s-1/answers",
            &json!({"answers": [{"question_id": "q-x", "value": 1}]}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "invalid question_id: q-x");
}

#[tokio::test]
async fn stats_route_can_omit_fit_scores() {
    let (service, _) = build_service();
    complete_seeker(&service, "s-1", 5.0, 3.0, 2.0);
    let router = recruiting_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(get_request(
            "/api/v1/seekers/s-1/stats?include_fit_scores=false",
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["stats"]["technical_skills"], 100.0);
    assert!(payload.get("fit_scores").is_none());

    let response = router
        .oneshot(get_request("/api/v1/seekers/s-1/stats"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload["fit_scores"][ENGINEER], 85.0);
}

#[tokio::test]
async fn offerer_flow_over_http() {
    let (service, _) = build_service();
    seed_candidates(&service);
    let router = recruiting_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/offerers",
            &json!({"company": "Acme Corp"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let offerer = read_json_body(response).await;
    let offerer_id = offerer["id"].as_str().expect("offerer id").to_string();

    let response = router
        .clone()
        .oneshot(get_request(&format!("/api/v1/offerers/{offerer_id}/feed")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/v1/offerers/{offerer_id}/config"),
            &json!({"role_config_id": "role-eng"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get_request(&format!(
            "/api/v1/offerers/{offerer_id}/feed?limit=2"
        )))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let page = read_json_body(response).await;
    assert_eq!(page["candidates"][0]["seeker_id"], "s-1");
    assert_eq!(page["has_more"], true);
    assert_eq!(page["next_cursor"], "s-2");

    let response = router
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/offerers/{offerer_id}/swipes"),
            &json!({"seeker_id": "s-1", "decision": "like"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/v1/offerers/{offerer_id}/shortlist/s-1/note"),
            &json!({"note": "Call back Monday"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["seeker_id"], "s-1");
    assert_eq!(payload["note"], "Call back Monday");
    assert!(payload.get("notes").is_none());

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/api/v1/offerers/{offerer_id}/shortlist/s-2/note"),
            &json!({"note": "Not liked"}),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(get_request(&format!(
            "/api/v1/offerers/{offerer_id}/shortlist"
        )))
        .await
        .expect("route executes");
    let shortlist = read_json_body(response).await;
    assert_eq!(shortlist["total"], 1);
    assert_eq!(shortlist["candidates"][0]["fit_score"], 85.0);
    assert_eq!(shortlist["candidates"][0]["note"], "Call back Monday");
}

#[tokio::test]
async fn swipe_handler_returns_conflict_on_duplicate() {
    let (service, _) = build_service();
    seed_candidates(&service);
    let offerer = offerer_with_role(&service, "role-eng");
    let service = Arc::new(service);

    let request = || SwipeRequest {
        seeker_id: seeker("s-2"),
        decision: "pass".to_string(),
    };
    let first = swipe_handler(
        State(service.clone()),
        Path(offerer.0.clone()),
        axum::Json(request()),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = swipe_handler(State(service), Path(offerer.0), axum::Json(request())).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn stats_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(RecruitingService::new(
        Arc::new(UnavailableRepository),
        engine(),
    ));

    let response = stats_handler::<UnavailableRepository>(
        State(service),
        Path("s-1".to_string()),
        Query(StatsParams {
            include_fit_scores: true,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: database offline");
}

#[tokio::test]
async fn unknown_seeker_stats_are_not_found() {
    let (service, _) = build_service();
    let router = recruiting_router(Arc::new(service));

    let response = router
        .oneshot(get_request("/api/v1/seekers/ghost/stats"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
