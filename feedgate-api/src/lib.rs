//! # Feedgate API Server
//!
//! Serves the Feedgate routes as JSON feeds over HTTP.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and configuration summary
//! - `GET /syosetu/search/:sub/:query` - Syosetu novel search
//! - `GET /pixiv/user/novels/:id` - A Pixiv user's latest novels
//! - `GET /cache/stats` - In-memory cache statistics
//!
//! ## Example
//!
//! ```rust,ignore
//! use feedgate_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([127, 0, 0, 1], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use feedgate_core::Result;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for Feedgate.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            cache = self.state.config.enable_cache,
            pixiv = self.state.pixiv.has_token(),
            "Feedgate listening on {}",
            addr
        );

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server(bind: IpAddr, port: u16) -> std::io::Result<()> {
    let server = ApiServer::new(ApiConfig::from_env()).map_err(std::io::Error::other)?;
    server.run((bind, port)).await
}
