use crate::http::{index_handler, status_handler};
use crate::registry::ConnectionRegistry;
use crate::signaling::{SignalingService, ws_handler};
use axum::Router;
use axum::extract::FromRef;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub registry: Arc<ConnectionRegistry>,
}

impl FromRef<AppState> for SignalingService {
    fn from_ref(state: &AppState) -> Self {
        state.signaling.clone()
    }
}

impl FromRef<AppState> for Arc<ConnectionRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.registry.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/status", get(status_handler))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
