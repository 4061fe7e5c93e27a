//! Admin HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the level endpoint and status probe
//! - Wire up middleware (tracing, timeout, body limit, optional auth)
//! - Serve on a listener until shutdown is signalled

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::admin;
use crate::config::ServerConfig;
use crate::level::AtomicLevel;

/// HTTP server exposing the shared log level.
pub struct AdminServer {
    router: Router,
    config: ServerConfig,
    level: AtomicLevel,
}

impl AdminServer {
    /// Create a server that reads and writes `level`.
    pub fn new(config: ServerConfig, level: AtomicLevel) -> Self {
        let router = Self::build_router(&config, level.clone());
        Self {
            router,
            config,
            level,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, level: AtomicLevel) -> Router {
        let endpoint = &config.level_endpoint;
        let level_routes = match &endpoint.api_key {
            Some(key) => admin::guarded_level_router(&endpoint.path, level.clone(), key),
            None => admin::level_router(&endpoint.path, level.clone()),
        };

        level_routes
            .merge(admin::status_router(level))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.level_endpoint.path,
            level = %self.level.get(),
            "Admin server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Admin server stopped");
        Ok(())
    }
}
