//! HTTP API for the sentiment service
//!
//! Single-text analysis, batch analysis, export and a health endpoint, all
//! answering JSON (or CSV for exports) with permissive CORS.

pub mod export;
pub mod routes;
pub mod server;
pub mod types;

pub use export::ExportFormat;
pub use server::HttpApiServer;
pub use types::{AnalyzeRequest, BatchRequest, ErrorResponse, HealthResponse};
