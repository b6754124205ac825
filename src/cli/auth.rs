use std::{sync::Arc, time::Duration};

use crate::{config::Config, error, management::TokenStore, spotify, success};

/// Runs the authorization receiver and reports the outcome.
pub async fn auth(config: Arc<Config>, timeout: Duration) {
    let store = TokenStore::new(&config.token_path);
    let token_path = store.path().clone();

    match spotify::auth::auth(config, store, timeout).await {
        Ok(_) => success!(
            "Authentication successful! Token saved to {}",
            token_path.display()
        ),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
