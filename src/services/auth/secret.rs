/*
 * Responsibility
 * - HMAC 署名鍵 (API_SECRET) の保持
 * - 起動時に一度だけ読み込み、以後は読み取り専用で issuer / validator に共有する
 */
use std::fmt;
use std::sync::Arc;

use crate::config::ConfigError;

/// Symmetric signing key shared by the issuer and the validator.
///
/// - Cheap to clone (`Arc`), never mutated after construction.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct Secret(Arc<[u8]>);

impl Secret {
    /// An empty key is a configuration error, not a per-request one.
    pub fn new(value: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let bytes = value.as_ref();
        if bytes.is_empty() {
            return Err(ConfigError::Missing("API_SECRET"));
        }
        Ok(Self(Arc::from(bytes)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"<redacted>").finish()
    }
}
