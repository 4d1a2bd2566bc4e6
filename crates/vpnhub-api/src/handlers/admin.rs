//! Admin account management handlers.

use axum::Json;
use axum::extract::State;

use vpnhub_core::error::AppError;

use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse};
use crate::extractors::{AccountIdPath, AuthUser};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, AppError> {
    let accounts = state.admin_service.list_accounts(&auth).await?;
    Ok(Json(ApiResponse::ok(
        accounts.into_iter().map(AccountResponse::from).collect(),
    )))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AccountIdPath(id): AccountIdPath,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let account = state.admin_service.get_account(&auth, id).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/admin/users/{id}/suspend
pub async fn suspend_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AccountIdPath(id): AccountIdPath,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.admin_service.suspend(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User suspended successfully",
    ))))
}

/// PUT /api/admin/users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AccountIdPath(id): AccountIdPath,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.admin_service.activate(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User activated successfully",
    ))))
}

/// DELETE /api/admin/users/{id}/delete
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    AccountIdPath(id): AccountIdPath,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.admin_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "User deleted successfully",
    ))))
}
