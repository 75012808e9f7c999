//! HTTP-level integration tests for the training endpoints.
//!
//! Covers authentication, progress fetch and submit, locking, server-side
//! quiz evaluation, the dashboard access grant, the catalog listing, and
//! playback source resolution.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, token_for};
use lucrum_core::memory_store::InMemoryProgressStore;
use lucrum_db::models::training::{CreateTrainingQuestion, CreateTrainingVideo, TrainingVideo};
use lucrum_db::models::user::{CreateUser, User};
use lucrum_db::repositories::{TrainingQuestionRepo, TrainingVideoRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: Some("Trainee".to_string()),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Create a video whose questions each have options `["Yes", "No", "Maybe"]`
/// and the given correct-answer markers.
async fn create_video(
    pool: &PgPool,
    order_number: i32,
    video_url: &str,
    answers: &[&str],
) -> TrainingVideo {
    let video = TrainingVideoRepo::create(
        pool,
        &CreateTrainingVideo {
            title: format!("Module {order_number}"),
            description: Some("Training module".to_string()),
            video_url: video_url.to_string(),
            order_number,
        },
    )
    .await
    .expect("video creation should succeed");

    for (i, answer) in answers.iter().enumerate() {
        TrainingQuestionRepo::create(
            pool,
            &CreateTrainingQuestion {
                video_id: video.id,
                prompt: format!("Question {}", i + 1),
                options: vec!["Yes".into(), "No".into(), "Maybe".into()],
                answer: answer.to_string(),
                order_number: i as i32 + 1,
                kind: None,
            },
        )
        .await
        .expect("question creation should succeed");
    }
    video
}

/// Two-video catalog: V1 has two questions (answers A, B), V2 has one (C).
async fn seed_catalog(pool: &PgPool) -> (TrainingVideo, TrainingVideo) {
    let v1 = create_video(pool, 1, "https://www.youtube.com/watch?v=intro01", &["A", "B"]).await;
    let v2 = create_video(pool, 2, "public/uploads/videos/closing.webm", &["C"]).await;
    (v1, v2)
}

const PROGRESS: &str = "/api/v1/training/progress";

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, PROGRESS).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, PROGRESS, "not-a-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_user_returns_404(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, PROGRESS, &token_for(999_999)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fresh_user_sees_first_video_unlocked(pool: PgPool) {
    let (v1, v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "fresh@example.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, PROGRESS, &token_for(user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_count"], 2);
    assert_eq!(data["completed_count"], 0);
    assert_eq!(data["all_complete"], false);
    assert_eq!(data["has_dashboard_access"], false);

    assert_eq!(data["videos"][0]["video_id"], v1.id);
    assert_eq!(data["videos"][0]["is_locked"], false);
    assert_eq!(data["videos"][0]["total_questions"], 2);
    assert_eq!(data["videos"][1]["video_id"], v2.id);
    assert_eq!(data["videos"][1]["is_locked"], true);

    let question = &data["videos"][0]["questions"][0];
    assert_eq!(question["options"], json!(["Yes", "No", "Maybe"]));
    assert!(question.get("answer").is_none(), "answers must not leak");
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_training_flow_grants_dashboard_access(pool: PgPool) {
    let (v1, v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "flow@example.com").await;
    let token = token_for(user.id);

    // Partial answers: V1 watched but only one correct.
    let app = common::build_test_app(pool.clone());
    let body = json!({ "video_id": v1.id, "watched": true, "answers": [0, 0] });
    let response = post_json_auth(app, PROGRESS, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["videos"][0]["completed"], false);
    assert_eq!(json["data"]["videos"][0]["questions_completed"], 1);
    assert_eq!(json["data"]["videos"][1]["is_locked"], true);

    // All correct, mixing letter and option-text answers.
    let app = common::build_test_app(pool.clone());
    let body = json!({ "video_id": v1.id, "answers": ["A", "No"] });
    let response = post_json_auth(app, PROGRESS, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["videos"][0]["completed"], true);
    assert_eq!(json["data"]["videos"][1]["is_locked"], false);
    assert_eq!(json["data"]["has_dashboard_access"], false);

    // Final video.
    let app = common::build_test_app(pool.clone());
    let body = json!({ "video_id": v2.id, "watched": true, "answers": [2] });
    let response = post_json_auth(app, PROGRESS, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["all_complete"], true);
    assert_eq!(json["data"]["completed_count"], 2);
    assert_eq!(json["data"]["has_dashboard_access"], true);

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.has_dashboard_access);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_locked_video_submission_is_forbidden(pool: PgPool) {
    let (_v1, v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "skip@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "video_id": v2.id, "watched": true, "answers": [2] });
    let response = post_json_auth(app, PROGRESS, body, &token_for(user.id)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_declared_completion_is_ignored(pool: PgPool) {
    let (v1, _v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "forged@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "video_id": v1.id, "watched": true, "completed": true, "answers": [] });
    let response = post_json_auth(app, PROGRESS, body, &token_for(user.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["videos"][0]["completed"], false);
    assert_eq!(json["data"]["videos"][0]["questions_completed"], 0);
    assert_eq!(json["data"]["videos"][1]["is_locked"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_video_returns_404(pool: PgPool) {
    seed_catalog(&pool).await;
    let user = create_user(&pool, "lost@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "video_id": 123_456, "answers": [] });
    let response = post_json_auth(app, PROGRESS, body, &token_for(user.id)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_out_of_range_answer_returns_400(pool: PgPool) {
    let (v1, _v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "range@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "video_id": v1.id, "answers": [0, 7] });
    let response = post_json_auth(app, PROGRESS, body, &token_for(user.id)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_worse_resubmission_does_not_regress(pool: PgPool) {
    let (v1, _v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "regress@example.com").await;
    let token = token_for(user.id);

    let app = common::build_test_app(pool.clone());
    let body = json!({ "video_id": v1.id, "answers": [0, 1] });
    assert_eq!(post_json_auth(app, PROGRESS, body, &token).await.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let body = json!({ "video_id": v1.id, "watched": false, "answers": [2, 2] });
    let response = post_json_auth(app, PROGRESS, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["videos"][0]["watched"], true);
    assert_eq!(json["data"]["videos"][0]["questions_completed"], 2);
    assert_eq!(json["data"]["videos"][0]["completed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unavailable_store_returns_503(pool: PgPool) {
    let user = create_user(&pool, "offline@example.com").await;
    let store = InMemoryProgressStore::new(Vec::new());
    store.add_trainee(user.id);
    store.set_unavailable(true);

    let app = common::build_test_app_with_store(pool, Arc::new(store));
    let response = get_auth(app, PROGRESS, &token_for(user.id)).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_corrupt_answer_marker_returns_500(pool: PgPool) {
    let v1 = create_video(&pool, 1, "public/uploads/videos/a.mp4", &["Z?"]).await;
    let user = create_user(&pool, "corrupt@example.com").await;

    let app = common::build_test_app(pool);
    let body = json!({ "video_id": v1.id, "answers": [0] });
    let response = post_json_auth(app, PROGRESS, body, &token_for(user.id)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_CATALOG_DATA");
}

// ---------------------------------------------------------------------------
// Catalog and sources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_videos_strips_answers(pool: PgPool) {
    let (v1, v2) = seed_catalog(&pool).await;
    let user = create_user(&pool, "catalog@example.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/training/videos", &token_for(user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let videos = json["data"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["id"], v1.id);
    assert_eq!(videos[1]["id"], v2.id);
    assert_eq!(videos[0]["questions"].as_array().unwrap().len(), 2);
    assert!(videos[0]["questions"][0].get("answer").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_video_source_resolution(pool: PgPool) {
    let (v1, v2) = seed_catalog(&pool).await;
    let outside = create_video(&pool, 3, "/etc/passwd", &[]).await;
    let user = create_user(&pool, "source@example.com").await;
    let token = token_for(user.id);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/training/videos/{}/source", v1.id);
    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["data"]["type"], "youtube");
    assert_eq!(json["data"]["video_id"], "intro01");
    assert_eq!(json["data"]["url"], "https://www.youtube.com/embed/intro01");

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/training/videos/{}/source", v2.id);
    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["data"]["type"], "local");
    assert_eq!(json["data"]["path"], "public/uploads/videos/closing.webm");
    assert_eq!(json["data"]["content_type"], "video/webm");

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/training/videos/{}/source", outside.id);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/training/videos/987654/source", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
