/*
 * Responsibility
 * - issuer / validator / extraction policy を 1 つの共有サービスに束ねる
 * - AppState 経由で handler / middleware に渡す (Clone cheap)
 */
use crate::services::auth::{
    claims::Claims,
    error::TokenError,
    secret::Secret,
    token_extractor::{self, ExtractionPolicy},
    token_issuer::TokenIssuer,
    token_validator::TokenValidator,
};
use axum::http::request::Parts;

#[derive(Clone, Debug)]
pub struct AuthService {
    issuer: TokenIssuer,
    validator: TokenValidator,
    extraction: ExtractionPolicy,
}

impl AuthService {
    pub fn new(secret: &Secret, extraction: ExtractionPolicy) -> Self {
        Self {
            issuer: TokenIssuer::new(secret),
            validator: TokenValidator::new(secret),
            extraction,
        }
    }

    /// Issue a token for a subject that has already proven its identity.
    pub fn create_token(&self, user_id: u32) -> Result<String, TokenError> {
        self.issuer.create_token(user_id)
    }

    pub fn extract_token(&self, parts: &Parts) -> Option<String> {
        token_extractor::extract_token_from_parts(parts, self.extraction)
    }

    pub fn validate_token(&self, token: &str) -> Result<(), TokenError> {
        self.validator.validate_token(token)
    }

    pub fn extract_subject_id(&self, token: &str) -> Result<u32, TokenError> {
        self.validator.extract_subject_id(token)
    }

    pub fn verify_claims(&self, token: &str) -> Result<Claims, TokenError> {
        self.validator.verify_claims(token)
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, header};

    fn parts(uri: &str, authorization: &str) -> Parts {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, authorization)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn extract_then_validate_yields_subject() {
        let auth = AuthService::new(
            &Secret::new("service-secret").unwrap(),
            ExtractionPolicy::default(),
        );
        let token = auth.create_token(77).unwrap();

        let found = auth
            .extract_token(&parts("/posts?token=1", &format!("Bearer {}", token)))
            .unwrap();
        assert_eq!(auth.validate_token(&found), Ok(()));
        assert_eq!(auth.extract_subject_id(&found), Ok(77));
        assert_eq!(auth.verify_claims(&found).unwrap().user_id, 77);
    }

    #[test]
    fn debug_output_has_no_key_material() {
        let auth = AuthService::new(
            &Secret::new("do-not-print-me").unwrap(),
            ExtractionPolicy::default(),
        );
        assert!(!format!("{:?}", auth).contains("do-not-print-me"));
    }
}
