use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{Html, IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use advodir_service::{AdvocatePage, Error as ServiceError, RawPageParams};

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(index))
		.route("/health", get(health))
		.route("/api/advocates", get(list_advocates))
		.with_state(state)
}

async fn index() -> Html<&'static str> {
	Html(INDEX_HTML)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_advocates(
	State(state): State<AppState>,
	Query(params): Query<RawPageParams>,
) -> Result<Json<AdvocatePage>, ApiError> {
	let response = state.service.search_raw(&params).await?;
	Ok(Json(response))
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

impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Advocate query failed.");

				ApiError::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Failed to query advocates.",
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };
		(self.status, Json(body)).into_response()
	}
}
