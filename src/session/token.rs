// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token inspection.
//!
//! The client cannot verify the backend's signature, and does not need to:
//! the token is only read to notice a session that expired while the
//! client was not running. Opaque (non-JWT) tokens carry no expiry.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

/// Expiry (`exp` claim) of a JWT bearer token, if it has one.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let header = decode_header(token).ok()?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp?, 0)
}

/// Whether the token is a JWT whose expiry is at or before `now`.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    token_expiry(token).is_some_and(|exp| exp <= now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    fn jwt(exp: i64) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: "42".to_string(),
                exp,
            },
            &EncodingKey::from_secret(b"backend-only-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_expiry_without_key() {
        let now = Utc::now();
        let token = jwt(now.timestamp() + 3600);
        assert_eq!(token_expiry(&token).unwrap().timestamp(), now.timestamp() + 3600);
        assert!(!is_expired(&token, now));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now();
        assert!(is_expired(&jwt(now.timestamp() - 10), now));
    }

    #[test]
    fn test_opaque_token_never_expires() {
        assert_eq!(token_expiry("opaque-session-token"), None);
        assert!(!is_expired("opaque-session-token", Utc::now()));
    }
}
