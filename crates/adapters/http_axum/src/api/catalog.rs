//! JSON handlers for catalog-wide data.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use virtapi_app::checker::CheckReport;
use virtapi_app::endpoint::{Endpoint, EndpointTable};
use virtapi_domain::http::HttpMethod;
use virtapi_domain::model::Model;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of the resolve endpoint.
#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub method: HttpMethod,
    /// Concrete path, with or without the API prefix.
    pub path: String,
}

/// Possible responses from the model endpoint.
pub enum ModelResponse {
    Ok(Json<Model>),
}

impl IntoResponse for ModelResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the endpoints endpoint.
pub enum EndpointsResponse {
    Ok(Json<EndpointTable>),
}

impl IntoResponse for EndpointsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the report endpoint.
pub enum ReportResponse {
    Ok(Json<CheckReport>),
}

impl IntoResponse for ReportResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the resolve endpoint.
pub enum ResolveResponse {
    Ok(Json<Endpoint>),
}

impl IntoResponse for ResolveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/model`
pub async fn model(State(state): State<AppState>) -> ModelResponse {
    ModelResponse::Ok(Json(state.catalog.model.clone()))
}

/// `GET /api/endpoints`
pub async fn endpoints(State(state): State<AppState>) -> EndpointsResponse {
    EndpointsResponse::Ok(Json(state.catalog.endpoints.clone()))
}

/// `GET /api/report`
pub async fn report(State(state): State<AppState>) -> ReportResponse {
    ReportResponse::Ok(Json(state.catalog.report.clone()))
}

/// `GET /api/resolve?method=POST&path=/vms/123/snapshots/456/restore`
///
/// # Errors
///
/// Returns a not found error when no endpoint answers the request.
pub async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<ResolveResponse, ApiError> {
    let path = state.checker.strip_prefix(&query.path);
    let endpoint = state
        .catalog
        .endpoints
        .find(query.method, path)
        .ok_or_else(|| ApiError::not_found("Endpoint", format!("{} {}", query.method, query.path)))?;
    Ok(ResolveResponse::Ok(Json(endpoint.clone())))
}
