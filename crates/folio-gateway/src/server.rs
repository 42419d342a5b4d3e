//! HTTP server wiring for the gateway

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GatewayConfig;
use crate::persona::{PersonaError, PersonaSet};
use crate::routes;
use crate::service::ChatService;

/// Application state shared across requests. Everything here is an
/// immutable snapshot; per-request work rebuilds its prompt from scratch.
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<ChatService>,
    pub personas: Arc<PersonaSet>,
}

impl GatewayState {
    /// Assemble state from configuration: providers from credentials,
    /// personas from the configured file or the embedded copy.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, PersonaError> {
        let personas = match &config.persona_path {
            Some(path) => PersonaSet::load(path)?,
            None => PersonaSet::builtin(),
        };
        Ok(Self {
            service: Arc::new(ChatService::from_config(config)),
            personas: Arc::new(personas),
        })
    }
}

/// Build the gateway router
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/chat", post(routes::chat))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);

    info!("gateway listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
