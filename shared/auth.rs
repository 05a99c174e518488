use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use std::collections::HashMap;
use std::env;

use crate::error::GateError;

/// Header carrying the bearer credential. Matched exactly as received.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Literal separator between the scheme and the token.
pub const BEARER_SEPARATOR: &str = "Bearer ";

/// Claim holding the expiry as Unix seconds.
pub const EXPIRES_CLAIM: &str = "expires";

/// Environment variable read for the secret when nothing else is configured.
pub const DEFAULT_SECRET_VAR: &str = "JWT_SECRET";

/// Decoded token payload, kept dynamically typed.
pub type Claims = serde_json::Map<String, Value>;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the environment variable holding the HMAC secret.
    pub secret_var: String,
}

impl AuthConfig {
    /// Load configuration from environment variables, honouring a `.env` file
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            secret_var: env::var("AUTH_SECRET_VAR")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SECRET_VAR.to_string()),
        }
    }

    pub fn secret_source(&self) -> EnvSecret {
        EnvSecret::new(self.secret_var.clone())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_var: DEFAULT_SECRET_VAR.to_string(),
        }
    }
}

/// Supplies the symmetric verification key.
pub trait SecretSource {
    fn secret(&self) -> Result<Vec<u8>, GateError>;
}

/// Reads the secret from an environment variable on every call, so a rotated
/// value applies to the very next request.
#[derive(Debug, Clone)]
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvSecret {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_VAR)
    }
}

impl SecretSource for EnvSecret {
    fn secret(&self) -> Result<Vec<u8>, GateError> {
        match env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(value.into_bytes()),
            _ => Err(GateError::SecretUnavailable(self.var.clone())),
        }
    }
}

/// A secret fixed at construction time.
#[derive(Clone)]
pub struct StaticSecret(Vec<u8>);

impl StaticSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }
}

impl std::fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticSecret(..)")
    }
}

impl SecretSource for StaticSecret {
    fn secret(&self) -> Result<Vec<u8>, GateError> {
        Ok(self.0.clone())
    }
}

/// Source of the current Unix time in seconds.
pub trait Clock {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Extract the bearer token from request headers.
///
/// The `Authorization` value must split into exactly two segments on
/// `"Bearer "`; anything else, or an empty token, counts as no token.
pub fn extract_bearer_token(headers: &HashMap<String, String>) -> Option<&str> {
    let auth_header = headers.get(AUTHORIZATION_HEADER)?;

    let mut segments = auth_header.split(BEARER_SEPARATOR);
    let (Some(_scheme), Some(token), None) = (segments.next(), segments.next(), segments.next())
    else {
        return None;
    };

    (!token.is_empty()).then_some(token)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    // `exp`/`nbf` are checked when a token carries them, never demanded.
    validation.required_spec_claims.clear();
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation
}

/// Verify an HMAC-signed JWT and return its claims.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, GateError> {
    // Header problems are parse failures; once the header is sound, a JSON
    // error can only come from the claims payload.
    decode_header(token).map_err(GateError::Parse)?;

    let decoding_key = DecodingKey::from_secret(secret);

    decode::<Claims>(token, &decoding_key, &validation())
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                GateError::InvalidToken(e)
            }
            ErrorKind::Json(_) => GateError::MalformedClaims(e),
            _ => GateError::Parse(e),
        })
}

/// Read the `expires` claim as whole Unix seconds.
///
/// Fractional values are truncated toward zero.
pub fn expires_at(claims: &Claims) -> Result<i64, GateError> {
    let value = claims.get(EXPIRES_CLAIM).ok_or(GateError::MissingExpiry)?;

    value
        .as_i64()
        .or_else(|| value.as_u64().map(|v| i64::try_from(v).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|v| v as i64))
        .ok_or(GateError::MissingExpiry)
}

/// Strictly after the expiry instant counts as expired.
pub fn is_expired(expires: i64, now: i64) -> bool {
    now > expires
}
