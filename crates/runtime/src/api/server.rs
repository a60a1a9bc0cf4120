//! HTTP API server implementation
//!
//! This module provides the main HTTP server implementation using Axum.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use super::routes::{analyze, analyze_batch, export, health};
use crate::config::ServerConfig;
use crate::sentiment::SentimentClassifier;
use crate::types::RuntimeError;

/// HTTP API Server
pub struct HttpApiServer {
    config: ServerConfig,
    classifier: Arc<SentimentClassifier>,
}

impl HttpApiServer {
    /// Create a new HTTP API server instance
    pub fn new(config: ServerConfig, classifier: SentimentClassifier) -> Self {
        Self {
            config,
            classifier: Arc::new(classifier),
        }
    }

    /// Create the Axum router with all routes and middleware
    pub fn create_router(&self) -> Router {
        let mut router = Router::new()
            .route("/analyze", post(analyze))
            .route("/analyze/batch", post(analyze_batch))
            .route("/export", post(export))
            .route("/health", get(health))
            .with_state(self.classifier.clone());

        if let Some(dir) = &self.config.static_dir {
            if dir.is_dir() {
                tracing::info!("Serving static files from {}", dir.display());
                router = router.fallback_service(ServeDir::new(dir));
            } else {
                tracing::debug!(
                    "Static directory {} not found, static serving disabled",
                    dir.display()
                );
            }
        }

        router = router
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM
    pub async fn start(&self) -> Result<(), RuntimeError> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RuntimeError::Server(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!("Server running on {}", addr);
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), RuntimeError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.create_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RuntimeError::Server(format!("Server error: {}", e)))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
