//! JSON handlers for services and their operations.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use virtapi_app::docs::{OperationDoc, ServiceDoc};
use virtapi_domain::name::Name;

use crate::error::ApiError;
use crate::state::AppState;

/// Entry of the service list.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    pub name: Name,
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// First paragraph of the service documentation.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    pub paths: Vec<String>,
    pub operations: Vec<Name>,
}

impl From<&ServiceDoc> for ServiceSummary {
    fn from(doc: &ServiceDoc) -> Self {
        Self {
            name: doc.name.clone(),
            type_name: doc.type_name.clone(),
            area: doc.area.clone(),
            summary: doc.doc.summary(),
            paths: doc.paths.clone(),
            operations: doc.operations.iter().map(|o| o.name.clone()).collect(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ServiceSummary>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ServiceDoc>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the operation endpoint.
pub enum GetOperationResponse {
    Ok(Json<OperationDoc>),
}

impl IntoResponse for GetOperationResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_name(kind: &'static str, raw: &str) -> Result<Name, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(kind, raw))
}

fn find_service<'a>(state: &'a AppState, raw: &str) -> Result<&'a ServiceDoc, ApiError> {
    let name = parse_name("Service", raw)?;
    state
        .docs
        .service(&name)
        .ok_or_else(|| ApiError::not_found("Service", raw))
}

/// `GET /api/services`
pub async fn list(State(state): State<AppState>) -> ListResponse {
    let services = state.docs.services.iter().map(ServiceSummary::from).collect();
    ListResponse::Ok(Json(services))
}

/// `GET /api/services/{name}`
///
/// # Errors
///
/// Returns a not found error when the service is not declared.
pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<GetResponse, ApiError> {
    let service = find_service(&state, &name)?;
    Ok(GetResponse::Ok(Json(service.clone())))
}

/// `GET /api/services/{name}/operations/{operation}`
///
/// # Errors
///
/// Returns a not found error when the service or the operation is not
/// declared.
pub async fn get_operation(
    State(state): State<AppState>,
    Path((name, operation)): Path<(String, String)>,
) -> Result<GetOperationResponse, ApiError> {
    let service = find_service(&state, &name)?;
    let operation_name = parse_name("Operation", &operation)?;
    let doc = service
        .operation(&operation_name)
        .ok_or_else(|| ApiError::not_found("Operation", format!("{name}.{operation}")))?;
    Ok(GetOperationResponse::Ok(Json(doc.clone())))
}
