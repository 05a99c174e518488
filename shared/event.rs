use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Proxy-integration request as delivered by the serverless platform.
///
/// Only `headers` is consulted by the gate. Header names keep the casing they
/// arrived with, so lookups are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_string_parameters: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl GatewayRequest {
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Proxy-integration response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// What a handler hands back: a response, plus an error the caller may want
/// to log. Both can be present at once.
#[derive(Debug)]
pub struct Reply {
    response: GatewayResponse,
    error: Option<anyhow::Error>,
}

impl Reply {
    pub fn ok(response: GatewayResponse) -> Self {
        Self {
            response,
            error: None,
        }
    }

    pub fn with_error(response: GatewayResponse, error: impl Into<anyhow::Error>) -> Self {
        Self {
            response,
            error: Some(error.into()),
        }
    }

    pub fn response(&self) -> &GatewayResponse {
        &self.response
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        self.error.as_ref()
    }

    pub fn into_parts(self) -> (GatewayResponse, Option<anyhow::Error>) {
        (self.response, self.error)
    }
}
