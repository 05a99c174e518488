//! Glue between the Vercel runtime and the platform-neutral gate types.

use std::collections::HashMap;
use tracing::warn;
use vercel_runtime::{Body, Error, Request, Response};

use crate::event::{GatewayRequest, GatewayResponse};
use crate::middleware::Handler;

/// Restore conventional header capitalisation (`x-api-key` -> `X-Api-Key`).
///
/// The HTTP stack lower-cases names, while the gate looks headers up exactly.
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Convert a runtime request into a gateway request
pub fn to_gateway_request(req: &Request) -> GatewayRequest {
    let headers = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (canonical_header_name(name.as_str()), v.to_string()))
        })
        .collect();

    let query = req.uri().query().unwrap_or("");
    let query_string_parameters: HashMap<String, String> =
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

    let body = req.body();
    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(body).into_owned())
    };

    GatewayRequest {
        http_method: req.method().as_str().to_string(),
        path: req.uri().path().to_string(),
        headers,
        query_string_parameters,
        body,
        is_base64_encoded: false,
    }
}

/// Convert a gateway response into a runtime response
pub fn to_runtime_response(resp: GatewayResponse) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(resp.status_code);
    for (name, value) in &resp.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    Ok(builder.body(resp.body.into())?)
}

/// Run a request through a handler (typically an `AuthGate`).
///
/// A propagated error is logged here and the response is still returned, so
/// the client only ever sees the response body.
pub fn serve<H: Handler>(handler: &H, req: Request) -> Result<Response<Body>, Error> {
    let request = to_gateway_request(&req);
    let path = request.path.clone();

    let (response, error) = handler.handle(request).into_parts();
    if let Some(err) = error {
        warn!(
            error = %err,
            status = response.status_code,
            path = %path,
            "handler returned an error"
        );
    }

    to_runtime_response(response)
}
