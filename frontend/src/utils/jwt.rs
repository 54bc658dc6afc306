use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use crate::api::{AuthUser, UserRole};

/// Claims the backend puts in access tokens. Decoded without signature
/// verification, so the result must never gate anything the backend does
/// not re-check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub sub: String,
    pub user_id: String,
    pub role: UserRole,
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub exp: i64,
}

pub fn decode_payload(token: &str) -> Option<TokenPayload> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    if payload.is_empty() {
        return None;
    }
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&decoded).ok()
}

pub fn extract_user(access_token: &str) -> Option<AuthUser> {
    let payload = decode_payload(access_token)?;
    Some(AuthUser {
        id: payload.user_id,
        email: payload.sub,
        role: payload.role,
    })
}

#[cfg(test)]
pub(crate) fn encode_test_token(user_id: &str, email: &str, role: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = serde_json::json!({
        "sub": email,
        "userId": user_id,
        "role": role,
        "iat": 1_700_000_000,
        "exp": 1_700_000_900
    });
    let body = URL_SAFE_NO_PAD.encode(body.to_string());
    format!("{header}.{body}.signature")
}
