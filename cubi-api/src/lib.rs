//! # ethercubi API Server
//!
//! Issues short word identifiers for mining rig configurations and serves
//! each configuration back as an install script until it expires.
//!
//! ## Endpoints
//!
//! - `POST /` - Store `{"coinbase": "0x…"}`, reply `201 {"RigId": "word-word-word"}`
//! - `GET /{id}` - Rendered install script, or `404` once unknown or expired
//! - anything else - `405`
//!
//! ## Example
//!
//! ```rust,ignore
//! use cubi_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod render;
mod routes;
mod state;

pub use dto::CreateRigResponse;
pub use error::ApiError;
pub use render::TeraRenderer;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use cubi_cache::CleanupScheduler;
use cubi_core::error::Result;

/// API server for ethercubi.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server, loading the word list and template from `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_state(Arc::new(AppState::from_config(config)?)))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Returns the shared state.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Creates the router with all layers configured.
    pub fn router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until Ctrl-C.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        self.run_until(addr, shutdown_signal()).await
    }

    /// Runs the server until `shutdown` resolves.
    ///
    /// The expired-rig sweeper runs for exactly as long as the listener and
    /// is stopped once, after in-flight requests have drained.
    pub async fn run_until<F>(self, addr: impl Into<SocketAddr>, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let cleanup = CleanupScheduler::start(self.state.rigs.clone(), self.state.config.cleanup_interval);

        info!("ethercubi API server listening on {}", listener.local_addr()?);

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;

        cleanup.stop().await;
        info!("ethercubi API server stopped");
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Starts the API server with configuration from the environment.
pub async fn start_server() -> Result<()> {
    let config = ApiConfig::from_env();
    let bind = config.bind;
    ApiServer::new(config)?.run(bind).await?;
    Ok(())
}
