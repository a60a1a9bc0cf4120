//! HTTP API route handlers
//!
//! This module contains route handler implementations for the HTTP API.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};

use super::export::ExportFormat;
use super::types::{AnalyzeRequest, BatchRequest, ErrorResponse, ExportParams, HealthResponse};
use crate::sentiment::SentimentClassifier;
use crate::types::{BatchError, BatchOutcome, ClassificationResult};

const FEATURES: &str = "single-analysis,batch-analysis,data-export";

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(code: &str, message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(code, message)),
    )
}

fn invalid_json(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(
            ErrorResponse::new("INVALID_JSON", "Invalid JSON")
                .with_details(serde_json::Value::String(rejection.body_text())),
        ),
    )
}

fn batch_rejected(err: BatchError) -> ApiError {
    let details = match &err {
        BatchError::TooLarge { len, max } => Some(serde_json::json!({ "len": len, "max": max })),
        BatchError::Empty => None,
    };
    let mut body = ErrorResponse::new(err.code(), err.to_string());
    body.details = details;
    (StatusCode::BAD_REQUEST, Json(body))
}

/// Classify a single text
pub async fn analyze(
    State(classifier): State<Arc<SentimentClassifier>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let Json(request) = payload.map_err(invalid_json)?;

    if request.text.is_empty() {
        return Err(bad_request("TEXT_REQUIRED", "Text field required"));
    }

    Ok(Json(classifier.classify(&request.text).await))
}

/// Classify a batch of texts and summarize the labels
pub async fn analyze_batch(
    State(classifier): State<Arc<SentimentClassifier>>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchOutcome>, ApiError> {
    let Json(request) = payload.map_err(invalid_json)?;

    classifier
        .classify_batch(&request.texts)
        .await
        .map(Json)
        .map_err(batch_rejected)
}

/// Classify a batch and return it as a downloadable JSON or CSV document
pub async fn export(
    State(classifier): State<Arc<SentimentClassifier>>,
    Query(params): Query<ExportParams>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(invalid_json)?;
    let format = ExportFormat::from_query(params.format.as_deref());

    let outcome = classifier
        .classify_batch(&request.texts)
        .await
        .map_err(batch_rejected)?;

    let body = format.render(&outcome.results).map_err(|e| {
        tracing::error!("Failed to render export: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("EXPORT_FAILED", e.to_string())),
        )
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type()),
            (header::CONTENT_DISPOSITION, format.content_disposition()),
        ],
        body,
    )
        .into_response())
}

/// Liveness endpoint
pub async fn health(State(classifier): State<Arc<SentimentClassifier>>) -> Json<HealthResponse> {
    let provider = classifier.provider();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: FEATURES.to_string(),
        ai_provider: provider.map(|p| p.provider_name().to_string()),
        ai_model: provider.map(|p| p.model().to_string()),
        timestamp: chrono::Utc::now(),
    })
}
