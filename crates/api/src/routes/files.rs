//! Upload area file routes, mounted at the root (not under `/api/v1`).

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use coopsite_core::files::FileArea;

use crate::handlers::files;
use crate::state::AppState;

/// One `GET <prefix>/{*path}` route per [`FileArea`].
///
/// ```text
/// GET /Organizational/File/{*path}
/// GET /DownloadForm/File/{*path}
/// GET /News/File/{*path}
/// GET /Album/File/{*path}
/// ```
pub fn router() -> Router<AppState> {
    FileArea::ALL.into_iter().fold(Router::new(), |router, area| {
        router.route(
            &format!("{}/{{*path}}", area.route_prefix()),
            get(
                move |state: State<AppState>, path: Result<Path<String>, PathRejection>| {
                    files::serve(area, state, path)
                },
            ),
        )
    })
}
