/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - トークンの抽出・署名検証は middleware/services 側の責務
 * - リソース所有者との照合 (ensure_owner) はここで提供する
 */
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::services::auth::Claims;

/// 認証済みのリクエストに付与されるコンテキスト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: u32,
    pub authorized: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthCtx {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id,
            authorized: claims.authorized,
            expires_at: claims.expires_at(),
        }
    }

    /// Only the owner may act on a resource; anyone else is unauthorized.
    pub fn ensure_owner(&self, owner_id: u32) -> Result<(), AppError> {
        if self.user_id == owner_id {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
