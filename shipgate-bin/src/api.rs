use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{RawQuery, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use shipgate_core::dispatch::Dispatcher;
use shipgate_core::error::ShipgateError;
use shipgate_core::model::{DispatchReport, ShipmentRequest};
use shipgate_core::normalizer::normalize_shipment;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/shipments", post(create_shipment))
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "shipgate",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Repeated `carriers` query values select the dispatch subset. Empty
/// values are dropped; an empty selection means every registered carrier.
fn carrier_list(raw_query: Option<&str>) -> Vec<String> {
    let Some(query) = raw_query else {
        return Vec::new();
    };
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, value)| key == "carriers" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .collect()
}

async fn create_shipment(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Result<Json<ShipmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DispatchReport>), ApiError> {
    let Json(req) = body.map_err(|err| {
        tracing::warn!(%err, "failed to decode body");
        ApiError::BadRequest("invalid body used, please consult the api".to_string())
    })?;

    let carriers = carrier_list(query.as_deref());
    tracing::info!(?carriers, "create shipment");

    let req = normalize_shipment(req);
    let responses = state.dispatcher.dispatch(&carriers, req).await?;
    Ok((StatusCode::CREATED, Json(DispatchReport { responses })))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Core(#[from] ShipgateError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Core(ShipgateError::CarrierUnsupported { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Core(err) => {
                tracing::error!(%err, "failed to ship to carriers");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "shipment failed".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
