//! HTTP routes.
//!
//! The route layer is deliberately thin: deserialize, call the engine, map
//! the result. No business logic lives here.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::ApiError;
use tillpoint_core::SaleDraft;
use tillpoint_engine::{SaleEngine, SaleView, SalesListing};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SaleEngine>,
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/sales", post(create_sale).get(list_sales))
        .route("/health", get(health))
        .with_state(state)
}

/// `POST /api/sales` - record a sale.
async fn create_sale(
    State(state): State<AppState>,
    Json(draft): Json<SaleDraft>,
) -> Result<(StatusCode, Json<SaleView>), ApiError> {
    let view = state.engine.create_sale(&draft).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/sales` - all sales plus the summary.
async fn list_sales(State(state): State<AppState>) -> Result<Json<SalesListing>, ApiError> {
    let listing = state.engine.list_sales().await?;
    Ok(Json(listing))
}

/// `GET /health` - liveness probe, checks the database.
async fn health(State(state): State<AppState>) -> StatusCode {
    if state.engine.database().health_check().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
