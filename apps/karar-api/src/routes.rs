use std::time::Duration;

use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::Serialize;

use karar_service::{Error, HealthResponse, SearchRequest, SearchResponse, StatsResponse};

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct RootBody {
	message: String,
	version: &'static str,
	endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
	health: &'static str,
	search: &'static str,
	stats: &'static str,
	cache: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthBody {
	service: &'static str,
	version: &'static str,
	#[serde(flatten)]
	health: HealthResponse,
}

#[derive(Debug, Serialize)]
struct StatsBody {
	#[serde(flatten)]
	stats: StatsResponse,
	service_info: ServiceInfo,
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
	name: &'static str,
	version: &'static str,
	database: &'static str,
}

#[derive(Debug, Serialize)]
struct ClearCacheBody {
	message: String,
	cleared_entries: usize,
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

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			Error::InternalSearch { message } | Error::Collaborator { message } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_search_error", message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/", get(root))
		.route("/health", get(health))
		.route("/search", post(search))
		.route("/stats", get(stats))
		.route("/cache", delete(clear_cache))
		.with_state(state)
}

async fn root() -> Json<RootBody> {
	Json(RootBody {
		message: format!("Welcome to the {}.", karar_cli::SERVICE_NAME),
		version: karar_cli::VERSION,
		endpoints: Endpoints {
			health: "/health",
			search: "/search",
			stats: "/stats",
			cache: "/cache",
		},
	})
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
	let health = state.service.health().await;

	Json(HealthBody { service: karar_cli::SERVICE_NAME, version: karar_cli::VERSION, health })
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let budget = Duration::from_millis(state.service.cfg.service.request_timeout_ms);
	let response = match tokio::time::timeout(budget, state.service.search(payload)).await {
		Ok(result) => result?,
		Err(_) => {
			tracing::error!(timeout_ms = budget.as_millis() as u64, "Search request timed out.");

			return Err(ApiError::new(
				StatusCode::INTERNAL_SERVER_ERROR,
				"internal_search_error",
				format!("Search did not finish within {} ms.", budget.as_millis()),
			));
		},
	};

	Ok(Json(response))
}

async fn stats(State(state): State<AppState>) -> Json<StatsBody> {
	let database = if state.service.collaborators.store.is_some() { "PostgreSQL" } else { "None" };
	let stats = state.service.stats().await;

	Json(StatsBody {
		stats,
		service_info: ServiceInfo {
			name: karar_cli::SERVICE_NAME,
			version: karar_cli::VERSION,
			database,
		},
	})
}

async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheBody> {
	let cleared = state.service.clear_cache();

	Json(ClearCacheBody {
		message: "Cache cleared.".to_string(),
		cleared_entries: cleared.cleared_entries,
	})
}
