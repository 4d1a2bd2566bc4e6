//! Package catalog handler.

use axum::Json;
use axum::extract::State;

use vpnhub_entity::package::Package;

use crate::dto::response::ApiResponse;
use crate::state::AppState;

/// GET /api/packages
pub async fn list_packages(State(state): State<AppState>) -> Json<ApiResponse<Vec<Package>>> {
    Json(ApiResponse::ok(state.account_service.packages().to_vec()))
}
