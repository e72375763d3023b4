//! Web server setup and startup.
//!
//! [`WebServer`] composes the Axum router, registers all routes, and starts
//! the HTTP listener.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use pristup_intent::IntentAnalyzer;

use crate::WebConfig;
use crate::api;
use crate::state::AppState;

/// The Pristup HTTP server.
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Without an analyzer only the quick-match phrases are recognised.
    pub fn new(config: WebConfig, analyzer: Option<Arc<dyn IntentAnalyzer>>) -> Self {
        let state = Arc::new(AppState::new(analyzer));
        Self { config, state }
    }

    /// Return the `host:port` string this server will bind to.
    pub fn addr(&self) -> String {
        self.config.addr()
    }

    /// Build the Axum router with all routes registered.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any);

        Router::new()
            .route("/api/status", get(api::status))
            .route(
                "/api/accessibility-assistant/analyze",
                post(api::analyze),
            )
            .route("/api/intent/resolve", post(api::resolve))
            .layer(cors)
            .with_state(Arc::clone(&self.state))
    }

    /// Start the server and block until it is shut down.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot be bound.
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr();
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let router = self.router();
        tracing::info!(
            addr = %listener.local_addr()?,
            remote_analysis = self.state.engine.has_analyzer(),
            "starting web server"
        );
        axum::serve(listener, router).await?;
        Ok(())
    }
}
