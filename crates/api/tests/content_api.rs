//! Integration tests for news, albums, download forms, Q&A and elections.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, Utc};
use common::{body_bytes, body_json, get, post_json};
use coopsite_db::models::album::{CreateAlbumPhoto, CreatePhotoAlbum};
use coopsite_db::models::download_form::CreateDownloadForm;
use coopsite_db::models::election::ElectionVoter;
use coopsite_db::models::news::CreateNewsItem;
use coopsite_db::repositories::{AlbumRepo, DownloadFormRepo, ElectionRepo, NewsRepo};
use serde_json::json;
use sqlx::PgPool;

fn news(title: &str, age_days: i64, cover: Option<&str>) -> CreateNewsItem {
    CreateNewsItem {
        title: title.to_string(),
        summary: Some(format!("{title} summary")),
        body: Some(format!("{title} body")),
        cover_image: cover.map(str::to_string),
        is_published: true,
        published_at: Some(Utc::now() - Duration::days(age_days)),
    }
}

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn news_list_is_paginated(pool: PgPool) {
    for day in 1..=3 {
        NewsRepo::create(&pool, &news(&format!("item {day}"), day, None))
            .await
            .unwrap();
    }
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/news?page=2&per_page=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "public, max-age=300");

    let json = body_json(response).await;
    assert_eq!(json["page"], 2);
    assert_eq!(json["per_page"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["pageCount"], 2);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "item 3");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn news_pagination_is_clamped(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/v1/news?page=0&per_page=500").await).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["per_page"], 50);
    assert_eq!(json["total"], 0);
    assert_eq!(json["pageCount"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_pagination_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/news?page=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn news_item_and_missing_item(pool: PgPool) {
    let item = NewsRepo::create(&pool, &news("AGM", 1, Some("uploads/news/agm.jpg")))
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app.clone(), &format!("/api/v1/news/{}", item.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["body"], "AGM body");
    assert_eq!(json["data"]["coverUrl"], "/News/File/agm.jpg");

    let response = get(app, &format!("/api/v1/news/{}", item.id + 1000)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inline_cover_is_served_as_binary(pool: PgPool) {
    // 8-byte PNG signature.
    let cover = "data:image/png;base64,iVBORw0KGgo=";
    let with_inline = NewsRepo::create(&pool, &news("inline", 1, Some(cover)))
        .await
        .unwrap();
    let with_path = NewsRepo::create(&pool, &news("path", 1, Some("cover.png")))
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/news").await).await;
    let urls: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["coverUrl"].as_str().unwrap().to_string())
        .collect();
    assert!(urls.contains(&format!("/api/v1/news/{}/cover", with_inline.id)));
    assert!(urls.contains(&"/News/File/cover.png".to_string()));

    let response = get(app.clone(), &format!("/api/v1/news/{}/cover", with_inline.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    assert_eq!(
        body_bytes(response).await,
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]
    );

    let response = get(app, &format!("/api/v1/news/{}/cover", with_path.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Albums
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn album_photos_and_missing_album(pool: PgPool) {
    let album = AlbumRepo::create(
        &pool,
        &CreatePhotoAlbum {
            title: "Field day".to_string(),
            description: None,
            cover_path: Some("albums/field/cover.jpg".to_string()),
            event_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        },
    )
    .await
    .unwrap();
    AlbumRepo::add_photo(
        &pool,
        &CreateAlbumPhoto {
            album_id: album.id,
            file_path: Some("albums/field/01.jpg".to_string()),
            caption: Some("Opening".to_string()),
            sort_order: 1,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/albums").await).await;
    assert_eq!(json["data"][0]["photoCount"], 1);
    assert_eq!(json["data"][0]["coverUrl"], "/Album/File/cover.jpg");
    assert_eq!(json["data"][0]["eventDate"], "2024-06-01");

    let response = get(app.clone(), &format!("/api/v1/albums/{}/photos", album.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "public, max-age=600");
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["url"], "/Album/File/01.jpg");

    let response = get(app.clone(), &format!("/api/v1/albums/{}/photos", album.id + 1)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, "/api/v1/albums/not-a-number/photos").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Download forms
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn download_forms_expose_file_urls(pool: PgPool) {
    DownloadFormRepo::create(
        &pool,
        &CreateDownloadForm {
            title: "Loan request".to_string(),
            category: Some("Loans".to_string()),
            file_path: Some(r"D:\forms\loan-request.pdf".to_string()),
            sort_order: 1,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/download-forms").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "public, max-age=3600");
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["fileUrl"], "/DownloadForm/File/loan-request.pdf");
}

// ---------------------------------------------------------------------------
// Q&A
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submitted_question_is_hidden_until_answered(pool: PgPool) {
    let app =
        common::build_test_app_with(pool.clone(), common::test_config(), common::null_cache());

    let response = post_json(
        app.clone(),
        "/api/v1/qa",
        json!({ "askerName": "  Member  ", "question": "When is the AGM?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["askerName"], "Member");
    assert!(json["data"]["answer"].is_null());
    let id = json["data"]["id"].as_i64().unwrap();

    let json = body_json(get(app.clone(), "/api/v1/qa").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    sqlx::query("UPDATE questions SET answer = 'In March', answered_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let json = body_json(get(app, "/api/v1/qa").await).await;
    assert_eq!(json["data"][0]["answer"], "In March");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn question_validation_names_the_field(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/qa", json!({ "askerName": "Member" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"]["field"], "question");

    let long_name = "x".repeat(101);
    let response = post_json(
        app,
        "/api/v1/qa",
        json!({ "askerName": long_name, "question": "?" }),
    )
    .await;
    assert_eq!(body_json(response).await["details"]["field"], "askerName");
}

// ---------------------------------------------------------------------------
// Elections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn election_lookup(pool: PgPool) {
    ElectionRepo::upsert(
        &pool,
        &ElectionVoter {
            member_no: "004512".to_string(),
            full_name: "Member Name".to_string(),
            unit_name: Some("Unit 3".to_string()),
            polling_place: Some("Main hall".to_string()),
            sequence_no: Some(41),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/elections/lookup?member_no=004512").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "no-store");
    let json = body_json(response).await;
    assert_eq!(json["data"]["pollingPlace"], "Main hall");
    assert_eq!(json["data"]["sequenceNo"], 41);

    let response = get(app.clone(), "/api/v1/elections/lookup?member_no=999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    for bad in ["12a4", "123456789012345678901", ""] {
        let response = get(
            app.clone(),
            &format!("/api/v1/elections/lookup?member_no={bad}"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "member_no={bad}");
        assert_eq!(body_json(response).await["details"]["field"], "member_no");
    }
}
