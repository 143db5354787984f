//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::{debug, error};

use crate::format::{self, FormatError};
use crate::planner::{PlanError, RouteRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::RouteTemplate;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/network", get(network_stats))
        .route("/api/stations/search", get(search_stations))
        .route("/api/route", get(find_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Size of the loaded network.
async fn network_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.network().stats())
}

/// Resolve a station name, optionally narrowed by line name.
async fn search_stations(
    State(state): State<AppState>,
    query: Result<Query<StationSearchRequest>, QueryRejection>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let Query(req) = query.map_err(AppError::from)?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            message: "station name must not be empty".to_string(),
        });
    }

    let line = req.line.as_deref().map(str::trim).filter(|l| !l.is_empty());
    let resolution = state.network().registry().resolve(name, line);

    Ok(Json(StationSearchResponse::from(resolution)))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    accepts(headers, "text/html")
}

/// Check if request asks for plain text.
fn accepts_text(headers: &HeaderMap) -> bool {
    accepts(headers, "text/plain")
}

fn accepts(headers: &HeaderMap, media_type: &str) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(media_type))
}

/// Shortest route between two station ids.
async fn find_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query.map_err(AppError::from)?;

    let route = state.planner.plan(RouteRequest::new(req.from, req.to)).await?;
    let registry = state.network().registry();

    if let Some(path) = &state.route_output {
        let names = format::station_names(registry, &route)?;
        let path = Arc::clone(path);
        tokio::task::spawn_blocking(move || format::write_route_file(&path, &names))
            .await
            .map_err(|e| AppError::Internal {
                message: format!("route file write aborted: {e}"),
            })??;
    }

    // Return HTML, plain text or JSON based on Accept header
    if accepts_html(&headers) {
        let stops = format::route_stops(registry, &route)?;
        let html = RouteTemplate::new(&stops, route.cost())
            .render()
            .map_err(|e| AppError::Internal {
                message: format!("Template error: {e}"),
            })?;

        Ok(Html(html).into_response())
    } else if accepts_text(&headers) {
        let names = format::station_names(registry, &route)?;
        Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format::to_text(&names),
        )
            .into_response())
    } else {
        let stops = format::route_stops(registry, &route)?;
        Ok(Json(RouteResponse::new(&route, stops)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    UnknownStation { message: String },
    NoRoute { message: String },
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::UnknownStation { .. } | AppError::NoRoute { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest { .. } => "invalid_query",
            AppError::UnknownStation { .. } => "unknown_station",
            AppError::NoRoute { .. } => "no_route",
            AppError::Internal { .. } => "internal",
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::UnknownStation { message }
            | AppError::NoRoute { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::InvalidQuery(_) => AppError::BadRequest { message },
            PlanError::UnknownStation(_) => AppError::UnknownStation { message },
            PlanError::NoRoute { .. } => AppError::NoRoute { message },
            PlanError::Aborted(_) => AppError::Internal { message },
        }
    }
}

impl From<FormatError> for AppError {
    fn from(e: FormatError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        if status.is_server_error() {
            error!(%status, kind, message = self.message(), "Request failed");
        } else {
            debug!(%status, kind, message = self.message(), "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
            kind,
        });
        (status, body).into_response()
    }
}
