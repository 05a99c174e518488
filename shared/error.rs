use thiserror::Error;

/// Why a presented token was refused.
///
/// Every variant surfaces to the client as the same generic 401 body; the
/// variant itself is only handed back to the caller for logging.
#[derive(Debug, Error)]
pub enum GateError {
    /// Malformed token, unsupported algorithm, or bad signature.
    #[error("token could not be parsed or verified")]
    Parse(#[source] jsonwebtoken::errors::Error),

    /// Signature checks out but a registered claim (`exp`, `nbf`) rejects it.
    #[error("token is not valid")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Payload decoded but is not a JSON object of claims.
    #[error("token claims are not a claim-name to claim-value mapping")]
    MalformedClaims(#[source] jsonwebtoken::errors::Error),

    #[error("`expires` claim is missing or not numeric")]
    MissingExpiry,

    #[error("signing secret is not configured (`{0}` is unset or empty)")]
    SecretUnavailable(String),
}

impl GateError {
    /// Stable short code for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            GateError::Parse(_) => "parse_failure",
            GateError::InvalidToken(_) => "invalid_token",
            GateError::MalformedClaims(_) => "malformed_claims",
            GateError::MissingExpiry => "missing_expiry",
            GateError::SecretUnavailable(_) => "secret_unavailable",
        }
    }
}
