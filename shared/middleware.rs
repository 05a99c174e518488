use tracing::debug;

use crate::auth::{
    expires_at, extract_bearer_token, is_expired, verify_token, AuthConfig, Claims, Clock,
    EnvSecret, SecretSource, SystemClock,
};
use crate::error::GateError;
use crate::event::{GatewayRequest, GatewayResponse, Reply};

pub const MISSING_TOKEN_BODY: &str = "Missing Auth Token";
pub const UNAUTHORIZED_BODY: &str = "User Unauthorized";
pub const EXPIRED_BODY: &str = "Token Expired";

/// Anything that turns a request into a reply.
pub trait Handler {
    fn handle(&self, request: GatewayRequest) -> Reply;
}

impl<F> Handler for F
where
    F: Fn(GatewayRequest) -> Reply,
{
    fn handle(&self, request: GatewayRequest) -> Reply {
        self(request)
    }
}

/// Reason a request was stopped at the gate
#[derive(Debug)]
pub enum Rejection {
    /// No usable `Authorization: Bearer <token>` header.
    MissingToken,
    /// Token failed verification; the cause is propagated to the caller.
    Unauthorized(GateError),
    /// Token verified but its `expires` claim has passed.
    Expired,
}

impl Rejection {
    pub fn status(&self) -> u16 {
        401
    }

    pub fn body(&self) -> &'static str {
        match self {
            Rejection::MissingToken => MISSING_TOKEN_BODY,
            Rejection::Unauthorized(_) => UNAUTHORIZED_BODY,
            Rejection::Expired => EXPIRED_BODY,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Rejection::MissingToken => "missing_token",
            Rejection::Unauthorized(e) => e.code(),
            Rejection::Expired => "expired",
        }
    }

    /// Shape the rejection into a reply. Only verification failures carry an
    /// error; the body never reveals which check failed.
    pub fn into_reply(self) -> Reply {
        let response = GatewayResponse::new(self.status(), self.body())
            .with_header("content-type", "text/plain")
            .with_header("WWW-Authenticate", "Bearer");

        match self {
            Rejection::Unauthorized(err) => Reply::with_error(response, err),
            Rejection::MissingToken | Rejection::Expired => Reply::ok(response),
        }
    }
}

impl From<GateError> for Rejection {
    fn from(err: GateError) -> Self {
        Rejection::Unauthorized(err)
    }
}

/// Decorator that only lets requests with a valid, unexpired bearer token
/// through to the wrapped handler.
///
/// The gate holds no mutable state; one instance may serve any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct AuthGate<H, S = EnvSecret, C = SystemClock> {
    inner: H,
    secret: S,
    clock: C,
}

impl<H, S> AuthGate<H, S, SystemClock>
where
    H: Handler,
    S: SecretSource,
{
    pub fn new(inner: H, secret: S) -> Self {
        Self {
            inner,
            secret,
            clock: SystemClock,
        }
    }
}

impl<H, S, C> AuthGate<H, S, C>
where
    H: Handler,
    S: SecretSource,
    C: Clock,
{
    pub fn with_clock<C2: Clock>(self, clock: C2) -> AuthGate<H, S, C2> {
        AuthGate {
            inner: self.inner,
            secret: self.secret,
            clock,
        }
    }

    /// Run every check without touching the wrapped handler.
    pub fn authorize(&self, request: &GatewayRequest) -> Result<Claims, Rejection> {
        let token = extract_bearer_token(&request.headers).ok_or(Rejection::MissingToken)?;

        let secret = self.secret.secret()?;
        let claims = verify_token(token, &secret)?;

        // Absent or non-numeric expiry is a verification failure, not expiry.
        let expires = expires_at(&claims)?;
        if is_expired(expires, self.clock.now()) {
            return Err(Rejection::Expired);
        }

        Ok(claims)
    }
}

impl<H, S, C> Handler for AuthGate<H, S, C>
where
    H: Handler,
    S: SecretSource,
    C: Clock,
{
    fn handle(&self, request: GatewayRequest) -> Reply {
        match self.authorize(&request) {
            Ok(_) => self.inner.handle(request),
            Err(rejection) => {
                debug!(reason = rejection.reason(), path = %request.path, "request rejected");
                rejection.into_reply()
            }
        }
    }
}

/// Wrap a handler in a gate configured from the environment.
pub fn jwt_middleware<H: Handler>(handler: H) -> AuthGate<H> {
    jwt_middleware_with(handler, &AuthConfig::from_env())
}

pub fn jwt_middleware_with<H: Handler>(handler: H, config: &AuthConfig) -> AuthGate<H> {
    AuthGate::new(handler, config.secret_source())
}
