//! JSON API handlers.
//!
//! - `GET /api/model`: the complete model as loaded
//! - `GET /api/services`: one summary per service
//! - `GET /api/services/{name}`: documentation view of one service
//! - `GET /api/services/{name}/operations/{operation}`: one operation
//! - `GET /api/endpoints`: every `METHOD /path` pair
//! - `GET /api/report`: structural check results
//! - `GET /api/resolve?method=..&path=..`: endpoint answering a concrete request

pub mod catalog;
pub mod services;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/model", get(catalog::model))
        .route("/endpoints", get(catalog::endpoints))
        .route("/report", get(catalog::report))
        .route("/resolve", get(catalog::resolve))
        .route("/services", get(services::list))
        .route("/services/{name}", get(services::get))
        .route(
            "/services/{name}/operations/{operation}",
            get(services::get_operation),
        )
}
