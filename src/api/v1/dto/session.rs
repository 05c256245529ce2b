/*
 * Responsibility
 * - GET /session の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: u32,
    pub authorized: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<AuthCtx> for SessionResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            user_id: ctx.user_id,
            authorized: ctx.authorized,
            expires_at: ctx.expires_at,
        }
    }
}
