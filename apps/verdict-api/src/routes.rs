use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use verdict_service::{
	IndexDecisionsRequest, IndexDecisionsResponse, SearchRequest, SearchResponse, ServiceError,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/decisions/search", post(search))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/index_decisions", post(index_decisions))
		.route("/v1/admin/clear_session", post(clear_session))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn index_decisions(
	State(state): State<AppState>,
	Json(payload): Json<IndexDecisionsRequest>,
) -> Result<Json<IndexDecisionsResponse>, ApiError> {
	let response = state.service.index_decisions(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ClearSessionRequest {
	session_id: String,
}

async fn clear_session(
	State(state): State<AppState>,
	Json(payload): Json<ClearSessionRequest>,
) -> Result<StatusCode, ApiError> {
	state.service.clear_session(&payload.session_id).await?;

	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::Provider { .. } => (StatusCode::BAD_GATEWAY, "provider_error"),
			ServiceError::Backend { .. } => (StatusCode::BAD_GATEWAY, "backend_error"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
			ServiceError::CacheStore { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "cache_store_error"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
