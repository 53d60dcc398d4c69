//! # HTTP Server
//!
//! Combines every router into one axum application and serves it until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::professor_routes::professor_routes;
use super::review_routes::review_routes;
use super::state::AppState;
use super::user_routes::user_routes;
use crate::observability::{log_event, log_event_with_fields, Event};

/// HTTP Server for the review API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given state
    pub fn new(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/observability", observability_routes())
            .nest("/professors", professor_routes())
            .nest("/reviews", review_routes())
            .nest("/users", user_routes())
            .layer(cors)
            .with_state(state)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until a shutdown signal arrives
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::Serving, &[("address", addr.to_string().as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            log_event_with_fields(Event::ShutdownStart, &[("signal", "ctrl_c")]);
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log_event_with_fields(Event::ShutdownStart, &[("signal", "terminate")]);
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
