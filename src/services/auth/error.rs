/*
 * Responsibility
 * - token core が呼び出し側に返す失敗の種類
 * - ログ出力・HTTP status への変換は呼び出し側 (middleware / AppError) の責務
 */
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Issuance could not encode or sign the claims.
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("malformed token: {0}")]
    Malformed(String),

    /// Header declared an algorithm outside the HMAC family (including `none`).
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,
}
