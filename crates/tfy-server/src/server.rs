use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Threadify API server.
pub struct ThreadifyServer {
    config: ServerConfig,
    state: AppState,
}

impl ThreadifyServer {
    /// A server over fresh in-memory stores.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let state = AppState::from_config(&config)?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("threadify listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = ThreadifyServer::new(ServerConfig::default()).unwrap();
        assert_eq!(server.config().bind_addr, "127.0.0.1:4741".parse().unwrap());
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = ServerConfig::default();
        config.auth.token_bytes = 1;
        assert!(ThreadifyServer::new(config).is_err());
    }

    #[test]
    fn router_builds() {
        let server = ThreadifyServer::new(ServerConfig::default()).unwrap();
        let _router = server.router();
    }
}
