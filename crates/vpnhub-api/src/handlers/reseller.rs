//! Reseller provisioning handlers. Admins may call these too.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use vpnhub_core::error::AppError;
use vpnhub_service::quota::QuotaStatus;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::{AccountResponse, ApiResponse, UserCredentialsResponse};
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/reseller/create-user
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserCredentialsResponse>>), AppError> {
    let issued = state
        .reseller_service
        .create_user(&auth, &req.email, req.expiry_days)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(issued.into()))))
}

/// GET /api/reseller/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, AppError> {
    let accounts = state.reseller_service.list_own(&auth).await?;
    Ok(Json(ApiResponse::ok(
        accounts.into_iter().map(AccountResponse::from).collect(),
    )))
}

/// GET /api/reseller/quota
pub async fn quota(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<QuotaStatus>>, AppError> {
    let status = state.reseller_service.quota(&auth).await?;
    Ok(Json(ApiResponse::ok(status)))
}
