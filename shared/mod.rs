//! Bearer-token authorization gate for serverless HTTP handlers
//!
//! The gate wraps a request handler and returns a handler with the same
//! signature. Each invocation runs three checks in order and stops at the
//! first failure:
//!
//! 1. **Extraction**: `Authorization: Bearer <token>` must be present,
//!    otherwise `401 Missing Auth Token`.
//! 2. **Verification**: the token must carry a valid HMAC signature for the
//!    configured secret and decode to a claims object, otherwise
//!    `401 User Unauthorized` together with the underlying [`GateError`].
//! 3. **Expiry**: the `expires` claim (Unix seconds) must not be in the past,
//!    otherwise `401 Token Expired`.
//!
//! When all three pass, the wrapped handler sees the original request and its
//! reply is returned untouched.
//!
//! ## Usage
//!
//! ```no_run
//! use auth_gate::{jwt_middleware, GatewayRequest, GatewayResponse, Handler, Reply};
//!
//! let gate = jwt_middleware(|_req: GatewayRequest| {
//!     Reply::ok(GatewayResponse::new(200, "ok"))
//! });
//!
//! let reply = gate.handle(GatewayRequest::new("GET", "/"));
//! assert_eq!(reply.response().status_code, 401);
//! ```

pub mod auth;
pub mod error;
pub mod event;
pub mod middleware;
pub mod runtime;

// Re-export commonly used types and functions
pub use auth::{
    expires_at, extract_bearer_token, is_expired, verify_token, AuthConfig, Claims, Clock,
    EnvSecret, FixedClock, SecretSource, StaticSecret, SystemClock,
};
pub use error::GateError;
pub use event::{GatewayRequest, GatewayResponse, Reply};
pub use middleware::{jwt_middleware, jwt_middleware_with, AuthGate, Handler, Rejection};
