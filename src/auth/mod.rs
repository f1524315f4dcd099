use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Claims embedded in every issued token: the subject (username) plus
/// issued-at and expiry timestamps. Tokens are self-contained; there is no
/// server-side session or revocation store, so a token stays valid until its
/// natural expiry and logout is a client-side discard.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(subject: &str, now: DateTime<Utc>) -> Self {
        let expiry_hours = config::config().security.jwt_expiry_hours;
        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token expired")]
    Expired,
    #[error("JWT secret not configured")]
    MissingSecret,
}

/// Issue a signed token for `subject`, expiring `jwt_expiry_hours` after `now`.
pub fn issue_token(subject: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let claims = Claims::new(subject, now);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::Malformed(e.to_string()))
}

/// Verify signature and expiry, returning the embedded subject.
///
/// Expiry is checked against the caller-supplied `now` rather than the wall
/// clock: a token is valid for any instant in [iat, exp) and `Expired` from
/// exp onward. Signature or parse failures are `Malformed`.
pub fn verify_token(token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    // exp is compared against the supplied instant below, not the wall clock
    validation.validate_exp = false;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::Malformed(e.to_string()))?;

    if token_data.claims.exp <= now.timestamp() {
        return Err(AuthError::Expired);
    }

    Ok(token_data.claims.sub)
}

/// Token lifetime in seconds, as advertised to clients at issuance.
pub fn token_ttl_seconds() -> i64 {
    config::config().security.jwt_expiry_hours as i64 * 3600
}
