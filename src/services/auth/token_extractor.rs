//! Locate a candidate token string in an inbound request.
//!
//! The lookup is gated on the `token` query parameter: unless the gate is
//! disabled, a request without a non-empty `?token=` never has its
//! `Authorization` header inspected. The query value itself is never returned.

use axum::http::{HeaderMap, Uri, header, request::Parts};

/// Query parameter that opens the gate.
pub const TOKEN_QUERY_PARAM: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionPolicy {
    // If true, the header is only read when `?token=` is present and non-empty.
    pub require_query_gate: bool,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            require_query_gate: true,
        }
    }
}

/// Returns `None` when no token was found.
pub fn extract_token(uri: &Uri, headers: &HeaderMap, policy: ExtractionPolicy) -> Option<String> {
    if policy.require_query_gate && !query_gate_open(uri) {
        return None;
    }

    let authorization = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    credential_from_authorization(authorization).map(str::to_string)
}

pub fn extract_token_from_parts(parts: &Parts, policy: ExtractionPolicy) -> Option<String> {
    extract_token(&parts.uri, &parts.headers, policy)
}

fn query_gate_open(uri: &Uri) -> bool {
    let Some(query) = uri.query() else {
        return false;
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .is_some_and(|(_, value)| !value.is_empty())
}

/// `<scheme> <credential>` split on single spaces; anything but exactly two
/// parts yields nothing. The scheme itself is not checked.
fn credential_from_authorization(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(credential), None) if !credential.is_empty() => Some(credential),
        _ => None,
    }
}
