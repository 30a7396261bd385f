//! Integration tests for the upload area file routes.
//!
//! These never touch the database, so they run against a lazily connected
//! pool and a temporary upload directory.

mod common;

use std::fs;
use std::path::Path;

use axum::http::StatusCode;
use axum::Router;
use common::{body_bytes, body_json, get};
use tempfile::TempDir;

const PDF_BYTES: &[u8] = b"%PDF-1.4 test form";

/// Lay out an upload root with a secret file beside the area directories.
fn upload_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let uploads = root.path().join("uploads");
    for dir in ["organizational", "download_forms", "news", "albums"] {
        fs::create_dir_all(uploads.join(dir)).unwrap();
    }
    fs::write(root.path().join("secret.env"), "DATABASE_URL=postgres://secret").unwrap();
    fs::write(uploads.join("secret.env"), "DATABASE_URL=postgres://secret").unwrap();
    fs::write(uploads.join("download_forms/loan.pdf"), PDF_BYTES).unwrap();
    fs::write(uploads.join("download_forms/notes.txt"), "plain text").unwrap();
    fs::create_dir_all(uploads.join("download_forms/2024")).unwrap();
    fs::write(uploads.join("download_forms/2024/annual.PDF"), PDF_BYTES).unwrap();
    fs::write(uploads.join("albums/large.jpg"), vec![0u8; 64]).unwrap();
    fs::write(uploads.join("albums/small.jpg"), vec![0xFFu8; 8]).unwrap();
    root
}

fn app_for(root: &Path, max_file_bytes: u64) -> Router {
    let mut config = common::test_config();
    config.upload_dir = root.join("uploads");
    config.max_file_bytes = max_file_bytes;
    common::build_test_app_with(common::lazy_pool(), config, common::null_cache())
}

#[tokio::test]
async fn serves_allowed_file_with_headers() {
    let root = upload_root();
    let app = app_for(root.path(), 1024);

    let response = get(app, "/DownloadForm/File/loan.pdf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    assert_eq!(response.headers()["content-length"], PDF_BYTES.len().to_string());
    assert_eq!(response.headers()["cache-control"], "public, max-age=86400");
    assert_eq!(body_bytes(response).await, PDF_BYTES);
}

#[tokio::test]
async fn nested_paths_and_uppercase_extensions_are_served() {
    let root = upload_root();
    let app = app_for(root.path(), 1024);

    let response = get(app, "/DownloadForm/File/2024/annual.PDF").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn parent_segments_are_forbidden() {
    let root = upload_root();
    let app = app_for(root.path(), 1024);

    for uri in [
        "/DownloadForm/File/../secret.env",
        "/DownloadForm/File/%2e%2e/secret.env",
        "/DownloadForm/File/2024/../../secret.env",
        "/Organizational/File/..%2F..%2Fetc%2Fpasswd",
    ] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "FORBIDDEN");
        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }
}

#[tokio::test]
async fn disallowed_extension_is_forbidden() {
    let root = upload_root();
    let app = app_for(root.path(), 1024);

    let response = get(app.clone(), "/DownloadForm/File/notes.txt").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Documents are only served from the download-form area.
    fs::write(root.path().join("uploads/news/report.pdf"), PDF_BYTES).unwrap();
    let response = get(app, "/News/File/report.pdf").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let root = upload_root();
    let app = app_for(root.path(), 1024);

    let response = get(app.clone(), "/Album/File/missing.jpg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    // A directory is not a file, even with an allowed extension.
    fs::create_dir_all(root.path().join("uploads/download_forms/archive.pdf")).unwrap();
    let response = get(app, "/DownloadForm/File/archive.pdf").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let root = upload_root();
    let app = app_for(root.path(), 32);

    let response = get(app.clone(), "/Album/File/large.jpg").await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");

    let response = get(app, "/Album/File/small.jpg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/jpeg");
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_escaping_the_area_is_forbidden() {
    let root = upload_root();
    let uploads = root.path().join("uploads");
    std::os::unix::fs::symlink(
        root.path().join("secret.env"),
        uploads.join("download_forms/escape.pdf"),
    )
    .unwrap();
    let app = app_for(root.path(), 1024);

    let response = get(app, "/DownloadForm/File/escape.pdf").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_upload_area_is_not_found() {
    let root = tempfile::tempdir().unwrap();
    let app = app_for(root.path(), 1024);

    let response = get(app, "/Organizational/File/chair.jpg").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn undecodable_path_returns_bad_request_envelope() {
    let root = upload_root();
    let app = app_for(root.path(), 1024);

    let response = get(app, "/Album/File/%FF.jpg").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}
