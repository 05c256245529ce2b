/*
 * Responsibility
 * - POST /login (email + password → access token)
 * - 未登録 email / パスワード不一致はどちらも 401 (どちらかは返さない)
 */
use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    api::v1::dto::login::{LoginRequest, TokenResponse},
    error::AppError,
    repos::user_repo,
    services::auth::claims::TOKEN_TTL_SECONDS,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(req) = payload?;

    let user = user_repo::find_by_email(&state.db, req.email.trim()).await?;
    let Some(user) = user.filter(|u| u.password_matches(&req.password)) else {
        tracing::debug!("login rejected");
        return Err(AppError::Unauthorized);
    };

    let access_token = state.auth.create_token(user.user_id)?;
    tracing::info!(user_id = user.user_id, "access token issued");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: TOKEN_TTL_SECONDS,
    }))
}
