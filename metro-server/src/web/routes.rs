//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::DomainError;
use crate::store::{self, StoreError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/route", get(quote_route))
        .route("/tickets", get(list_tickets).post(purchase_ticket))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all stations, grouped by line.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let network = state.network();
    let lines = network
        .list_stations_by_line()
        .iter()
        .map(LineResult::from_overview)
        .collect();
    Json(StationsResponse { lines })
}

/// Quote the shortest route and its fare, without purchasing.
async fn quote_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let network = state.network();
    let path = network.find_shortest_path(&req.origin, &req.destination)?;

    Ok(Json(RouteResponse {
        hops: path.len().saturating_sub(1),
        price: network.price(&path),
        path: path
            .iter()
            .map(|&id| network.station(id).name().as_str().to_string())
            .collect(),
    }))
}

/// Purchase a ticket and persist the updated ticket log.
async fn purchase_ticket(
    State(state): State<AppState>,
    Json(req): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<TicketResult>), AppError> {
    let owner = req.owner.filter(|o| !o.trim().is_empty());

    let mut network = state.network();
    let ticket = network.purchase_ticket(&req.origin, &req.destination, owner)?;

    // Flush under the same lock so a concurrent purchase cannot write a
    // snapshot missing this ticket. A failed flush does not void the
    // purchase; the ticket is already in the log.
    if let Some(path) = &state.data_path {
        if let Err(e) = store::save(&network, path) {
            warn!(error = %e, "failed to persist snapshot after purchase");
        }
    }

    Ok((StatusCode::CREATED, Json(TicketResult::from_ticket(&ticket))))
}

/// List purchased tickets, optionally filtered by owner.
async fn list_tickets(
    State(state): State<AppState>,
    Query(req): Query<TicketListRequest>,
) -> Json<TicketListResponse> {
    let network = state.network();
    let tickets = network
        .list_tickets(req.owner.as_deref())
        .into_iter()
        .map(TicketResult::from_ticket)
        .collect();
    Json(TicketListResponse { tickets })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownStation(_) | DomainError::NoRoute { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            DomainError::EmptyPath => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationName;

    #[test]
    fn unknown_station_maps_to_not_found() {
        let err: AppError = DomainError::UnknownStation("Atlantis".into()).into();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn no_route_maps_to_not_found() {
        let err: AppError = DomainError::NoRoute {
            origin: StationName::parse("A").unwrap(),
            destination: StationName::parse("Z").unwrap(),
        }
        .into();
        assert!(matches!(
            err,
            AppError::NotFound { message } if message == "no route from A to Z"
        ));
    }

    #[test]
    fn store_error_maps_to_internal() {
        let err: AppError = StoreError::MalformedRecord("bad".into()).into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
