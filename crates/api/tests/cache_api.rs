//! Integration tests for `POST /api/v1/cache/invalidate`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, send_json, INVALIDATE_TOKEN};
use coopsite_db::models::download_form::CreateDownloadForm;
use coopsite_db::repositories::DownloadFormRepo;
use serde_json::json;
use sqlx::PgPool;

const URI: &str = "/api/v1/cache/invalidate";

#[sqlx::test(migrations = "../db/migrations")]
async fn invalidation_forces_a_reload(pool: PgPool) {
    DownloadFormRepo::create(
        &pool,
        &CreateDownloadForm {
            title: "Membership".to_string(),
            category: None,
            file_path: Some("membership.pdf".to_string()),
            sort_order: 0,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    assert_eq!(get(app.clone(), "/api/v1/download-forms").await.headers()["x-cache"], "MISS");
    assert_eq!(get(app.clone(), "/api/v1/download-forms").await.headers()["x-cache"], "HIT");

    let response = send_json(
        app.clone(),
        Method::POST,
        URI,
        json!({ "namespace": "download_forms" }),
        &[("x-invalidate-token", INVALIDATE_TOKEN)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["namespace"], "download_forms");
    assert_eq!(json["data"]["removed"], 1);
    assert_eq!(json["data"]["keys"], json!(["download_forms:all"]));

    assert_eq!(get(app, "/api/v1/download-forms").await.headers()["x-cache"], "MISS");
}

#[tokio::test]
async fn wrong_or_missing_token_is_forbidden() {
    let app = common::build_test_app(common::lazy_pool());

    for headers in [&[("x-invalidate-token", "nope")][..], &[][..]] {
        let response = send_json(
            app.clone(),
            Method::POST,
            URI,
            json!({ "namespace": "qa" }),
            headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn unconfigured_token_disables_the_route() {
    let mut config = common::test_config();
    config.cache_invalidation_token = None;
    let app = common::build_test_app_with(common::lazy_pool(), config, common::memory_cache());

    let response = send_json(
        app,
        Method::POST,
        URI,
        json!({ "namespace": "qa" }),
        &[("x-invalidate-token", "")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_namespace_is_a_validation_error() {
    let app = common::build_test_app(common::lazy_pool());

    let response = send_json(
        app,
        Method::POST,
        URI,
        json!({ "namespace": "news" }),
        &[("x-invalidate-token", INVALIDATE_TOKEN)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"]["field"], "namespace");
}
