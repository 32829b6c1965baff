use crate::registry::ConnectionRegistry;
use axum::Json;
use axum::extract::State;
use beacon_core::Role;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `GET /status`. Field names are the ones existing dashboards poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: String,
    pub touchdesigner: bool,
    pub browsers: usize,
    pub total_clients: usize,
}

impl StatusReport {
    pub fn from_registry(registry: &ConnectionRegistry) -> Self {
        Self {
            status: "online".to_string(),
            touchdesigner: registry.count(Role::Producer) > 0,
            browsers: registry.count(Role::Consumer),
            total_clients: registry.len(),
        }
    }
}

pub async fn status_handler(
    State(registry): State<Arc<ConnectionRegistry>>,
) -> Json<StatusReport> {
    Json(StatusReport::from_registry(&registry))
}
