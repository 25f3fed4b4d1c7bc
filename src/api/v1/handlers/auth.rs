/*
 * Responsibility
 * - /auth 系 handler (register/login/me)
 * - DTO validation → repo/service 呼び出し → status mapping
 * - 不明ユーザーと password 不一致は同じ 401 にする (enumeration 対策)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    api::v1::extractors::AuthCtxExtractor,
    error::AppError,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let user = state
        .users
        .register(&req.username, &req.password, &req.email)?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    // Unknown username and failed password match are indistinguishable to
    // the caller.
    let user = state
        .users
        .find_by_username(&req.username)
        .ok_or(AppError::Unauthorized)?;

    if !state.users.verify_password(&user, &req.password) {
        tracing::debug!(username = %req.username, "failed login attempt");
        return Err(AppError::Unauthorized);
    }

    let token = state.jwt.issue(&user)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        user_id: user.id,
        username: user.username,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .find_by_id(ctx.user_id)
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}
