//! Integration tests for the organizational chart and its cache-aside path.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use coopsite_db::models::organizational::CreateOrganizationalMember;
use coopsite_db::repositories::OrganizationalRepo;
use sqlx::PgPool;

async fn seed(pool: &PgPool) {
    for (name, group, order, image) in [
        (Some("Chair"), "Board", 1, Some(r"C:\uploads\organizational\chair.jpg")),
        (Some("Treasurer"), "Board", 2, None),
        (None, "Staff", 1, Some("/Organizational/File/clerk.png")),
    ] {
        OrganizationalRepo::create(
            pool,
            &CreateOrganizationalMember {
                full_name: name.map(str::to_string),
                position: Some("Member".to_string()),
                group_name: Some(group.to_string()),
                image_path: image.map(str::to_string),
                sort_order: order,
            },
        )
        .await
        .unwrap();
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn members_are_listed_with_public_image_urls(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/organizational").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json.get("error").is_none());

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["fullName"], "Chair");
    assert_eq!(data[0]["imageUrl"], "/Organizational/File/chair.jpg");
    assert!(data[1]["imageUrl"].is_null());
    // Rows missing a name are still published.
    assert!(data[2]["fullName"].is_null());
    assert_eq!(data[2]["imageUrl"], "/Organizational/File/clerk.png");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn second_request_is_served_from_cache(pool: PgPool) {
    seed(&pool).await;
    let app = common::build_test_app(pool.clone());

    let first = get(app.clone(), "/api/v1/organizational").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    assert_eq!(first.headers()["cache-control"], "public, max-age=3600");
    let first_json = body_json(first).await;

    // With the table emptied, only a cache hit can still return the rows.
    sqlx::query("DELETE FROM organizational_members")
        .execute(&pool)
        .await
        .unwrap();

    let second = get(app, "/api/v1/organizational").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-cache"], "HIT");
    let second_json = body_json(second).await;

    assert_eq!(first_json["data"], second_json["data"]);
    assert_eq!(second_json["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn disabled_cache_always_queries_the_database(pool: PgPool) {
    seed(&pool).await;
    let app =
        common::build_test_app_with(pool.clone(), common::test_config(), common::null_cache());

    let first = get(app.clone(), "/api/v1/organizational").await;
    assert_eq!(first.headers()["x-cache"], "MISS");

    sqlx::query("DELETE FROM organizational_members")
        .execute(&pool)
        .await
        .unwrap();

    let second = get(app, "/api/v1/organizational").await;
    assert_eq!(second.headers()["x-cache"], "MISS");
    let json = body_json(second).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
