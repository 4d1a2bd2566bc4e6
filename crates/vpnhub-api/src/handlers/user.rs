//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use vpnhub_core::error::AppError;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{
    AccountResponse, ApiResponse, MessageResponse, ProfileUpdatedResponse,
};
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// GET /api/user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let account = state.account_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(account.into())))
}

/// PUT /api/user/update
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileUpdatedResponse>>, AppError> {
    let account = state
        .account_service
        .update_profile(&auth, &req.email)
        .await?;
    Ok(Json(ApiResponse::ok(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        user: account.into(),
    })))
}

/// DELETE /api/user/delete
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.account_service.delete_self(&auth).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Account deleted successfully",
    ))))
}
