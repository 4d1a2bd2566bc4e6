//! Auth handlers: staff registration, self-service signup, login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use vpnhub_core::error::AppError;

use crate::dto::request::{CreateStaffRequest, LoginRequest, SignupRequest};
use crate::dto::response::{
    ApiResponse, LoginResponse, SignupResponse, StaffCredentialsResponse,
};
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateStaffRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffCredentialsResponse>>), AppError> {
    let issued = state.admin_service.create_staff(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(issued.into()))))
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SignupResponse>>), AppError> {
    let outcome = state.account_service.signup(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(outcome.into()))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let outcome = state
        .account_service
        .login(&req.username, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}
