use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use dashboard::{layout::PageLayout, pie_figure, run_callbacks, scatter_figure, session::Session};
use dataset::DatasetSummary;
use serde::Deserialize;
use shared::{
    domain::SiteSelection,
    error::ApiError,
    figure::Figure,
    protocol::{CallbackRequest, CallbackResponse, ClientEvent, ServerEvent},
};
use tracing::{debug, warn};

use crate::app_state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
pub(crate) struct PieQuery {
    site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScatterQuery {
    site: Option<String>,
    low: Option<f64>,
    high: Option<f64>,
}

fn selection(site: Option<String>) -> SiteSelection {
    site.map(SiteSelection::from).unwrap_or_default()
}

pub(crate) async fn http_layout(State(state): State<Arc<AppState>>) -> Json<PageLayout> {
    Json(state.dashboard.layout.as_ref().clone())
}

pub(crate) async fn http_dataset_summary(
    State(state): State<Arc<AppState>>,
) -> Json<DatasetSummary> {
    Json(state.dashboard.dataset.summary())
}

pub(crate) async fn http_pie_figure(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PieQuery>,
) -> Json<Figure> {
    Json(pie_figure(&state.dashboard, &selection(q.site)))
}

pub(crate) async fn http_scatter_figure(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ScatterQuery>,
) -> ApiResult<Figure> {
    let figure = scatter_figure(&state.dashboard, &selection(q.site), q.low, q.high)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    Ok(Json(figure))
}

pub(crate) async fn http_run_callbacks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CallbackRequest>, JsonRejection>,
) -> ApiResult<CallbackResponse> {
    let Json(request) = payload.map_err(|rejection| {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(ApiError::validation(rejection.body_text())))
    })?;
    debug!(changed = ?request.changed, site = %request.state.site, "callback request");
    Ok(Json(run_callbacks(&state.dashboard, &request)))
}

/// Applies one text frame from a dashboard socket to its session.
pub(crate) fn handle_client_message(session: &mut Session, text: &str) -> Vec<ServerEvent> {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => session
            .apply(event)
            .into_iter()
            .map(ServerEvent::from)
            .collect(),
        Err(error) => {
            warn!(%error, "rejecting malformed client event");
            vec![ServerEvent::Error(ApiError::validation(format!(
                "invalid client event: {error}"
            )))]
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
