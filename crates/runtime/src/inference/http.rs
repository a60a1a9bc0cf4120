//! Shared request plumbing for the provider adapters

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use super::InferenceError;

pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, InferenceError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| InferenceError::Setup(format!("HTTP client error: {}", e)))
}

/// Send a prepared request and decode the JSON reply into `T`.
///
/// Transport failures, timeouts, non-2xx statuses and undecodable bodies
/// each map to their own `InferenceError` variant.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &str,
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<T, InferenceError> {
    let start = Instant::now();

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            InferenceError::Timeout(timeout)
        } else {
            InferenceError::Transport(format!("{} request failed: {}", provider, e))
        }
    })?;

    let status = response.status();
    tracing::debug!(
        "{} response: status={} latency={:?}",
        provider,
        status.as_u16(),
        start.elapsed()
    );

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(InferenceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            InferenceError::Timeout(timeout)
        } else {
            InferenceError::Transport(format!("{} body read failed: {}", provider, e))
        }
    })?;

    serde_json::from_slice(&bytes)
        .map_err(|e| InferenceError::ParseError(format!("{} response: {}", provider, e)))
}
