use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Error, Res, api, config::Config, management::TokenStore, types::AccessToken};

/// Everything the receiver's handlers need. The callback fills `token` once the
/// exchange and the file write have both succeeded.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: TokenStore,
    pub token: Arc<Mutex<Option<AccessToken>>>,
}

pub fn router(state: ServerState) -> Router {
    let callback_path = state.config.callback_path().to_string();

    Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/health", get(api::health))
        .route(&callback_path, get(api::callback))
        .layer(Extension(state))
}

pub async fn start_api_server(listener: TcpListener, state: ServerState) -> Res<()> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
