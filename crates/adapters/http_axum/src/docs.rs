//! Handlers serving the rendered documentation site.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;

use crate::state::AppState;

/// Possible responses when serving a documentation page.
pub enum PageResponse {
    Html(String),
    Text(&'static str, String),
    NotFound,
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Html(body) => Html(body).into_response(),
            Self::Text(content_type, body) => {
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            Self::NotFound => (StatusCode::NOT_FOUND, "page not found").into_response(),
        }
    }
}

/// Build the `/docs` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(|| async { Redirect::permanent("/docs/") }))
        .route("/docs/", get(index))
        .route("/docs/{*path}", get(page))
}

fn serve(state: &AppState, path: &str) -> PageResponse {
    let Some(contents) = state.site.get(path) else {
        tracing::debug!(path, "documentation page not found");
        return PageResponse::NotFound;
    };
    let contents = contents.to_owned();
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => PageResponse::Html(contents),
        Some("json") => PageResponse::Text("application/json", contents),
        Some("css") => PageResponse::Text("text/css", contents),
        _ => PageResponse::Text("text/plain; charset=utf-8", contents),
    }
}

/// `GET /docs/`
pub async fn index(State(state): State<AppState>) -> PageResponse {
    serve(&state, "index.html")
}

/// `GET /docs/{*path}`
pub async fn page(State(state): State<AppState>, Path(path): Path<String>) -> PageResponse {
    serve(&state, &path)
}
