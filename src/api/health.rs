use axum::{Extension, response::Json};
use serde::Serialize;

use crate::server::ServerState;

/// Liveness report of the authorization receiver.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub callback_path: String,
    /// Set once the callback has stored a token.
    pub authorized: bool,
}

pub async fn health(Extension(state): Extension<ServerState>) -> Json<HealthStatus> {
    let authorized = state.token.lock().await.is_some();

    Json(HealthStatus {
        service: env!("CARGO_PKG_NAME"),
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        callback_path: state.config.callback_path().to_string(),
        authorized,
    })
}
