/*
 * Responsibility
 * - GET /session (提示されたトークンの主体を返す)
 * - access middleware の内側でのみ到達する
 */
use axum::Json;

use crate::api::v1::{dto::session::SessionResponse, extractors::AuthCtxExtractor};

pub async fn current_session(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<SessionResponse> {
    Json(SessionResponse::from(ctx))
}
