use auth_gate::runtime::serve;
use auth_gate::{jwt_middleware, AuthGate, GatewayRequest, GatewayResponse, Reply};
use serde_json::json;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vercel_runtime::{run, Body, Error, Request, Response};

type PingGate = AuthGate<fn(GatewayRequest) -> Reply>;

/// Built once per cold start; the secret itself is still re-read per request.
static GATE: OnceLock<PingGate> = OnceLock::new();

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    gate();
    run(handler).await
}

fn gate() -> &'static PingGate {
    GATE.get_or_init(|| jwt_middleware(ping as fn(GatewayRequest) -> Reply))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    serve(gate(), req)
}

fn ping(req: GatewayRequest) -> Reply {
    let response_body = json!({
        "status": "ok",
        "path": req.path,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Reply::ok(
        GatewayResponse::new(200, response_body.to_string())
            .with_header("content-type", "application/json"),
    )
}
