//! HTTP client for the compute endpoint.
//!
//! One `GET` per computation: `{base_url}/{operation}?operand_1=..&operand_2=..`,
//! answered with `{"result": 14}`. Non-real results come back as `null`
//! or as the string `"NaN"`; both read as `f64::NAN`.

use super::ComputeBackend;
use crate::config::CalcConfig;
use crate::core::machine::ComputationRequest;
use crate::core::{CalcError, CalcResult, Operation};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body returned by the compute endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResponse {
    /// Numeric result, or `null`/a string for values JSON cannot carry
    pub result: serde_json::Value,
}

impl ComputeResponse {
    /// Reads the result as a float
    pub fn value(&self) -> CalcResult<f64> {
        match &self.result {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| CalcError::MalformedResponse(format!("unrepresentable number {n}"))),
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CalcError::MalformedResponse(format!("non-numeric result {s:?}"))),
            serde_json::Value::Null => Ok(f64::NAN),
            other => Err(CalcError::MalformedResponse(format!(
                "unexpected result {other}"
            ))),
        }
    }
}

/// Compute endpoint reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Client for `base_url` with no request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Client with a custom reqwest client (for custom timeouts, etc.)
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Builds a backend from configuration
    pub fn from_config(config: &CalcConfig) -> CalcResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self::with_client(config.endpoint.clone(), builder.build()?))
    }

    /// Returns the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for one operation
    pub fn url_for(&self, operation: Operation) -> String {
        format!("{}/{}", self.base_url, operation.name())
    }
}

#[async_trait]
impl ComputeBackend for HttpBackend {
    async fn compute(&self, request: &ComputationRequest) -> CalcResult<f64> {
        let url = self.url_for(request.operation);
        let resp = self
            .client
            .get(&url)
            .query(&request.query_params())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CalcError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ComputeResponse = resp.json().await?;
        body.value()
    }
}
