use std::{sync::Arc, time::Duration};

use tabled::Table;

use crate::{
    config::Config,
    error, info,
    management::TokenStore,
    spotify, stats, success,
    types::AccessToken,
    utils,
};

/// Runs the statistics pipeline and prints a summary of the rendered record.
///
/// With `login` set, the authorization receiver runs first and its token is
/// handed over in memory instead of through the token file. The token is
/// persisted either way.
pub async fn stats(config: Arc<Config>, login: bool, timeout: Duration) {
    let token = if login {
        obtain_token(Arc::clone(&config), timeout).await
    } else {
        load_token(&config).await
    };

    match stats::run_pipeline(&config, &token).await {
        Ok(record) => {
            info!("Successfully fetched user stats");
            println!("{}", Table::new(utils::section_rows(&record)));
            success!("PDF saved to {}", config.output_path.display());
        }
        Err(e) => error!("Error occurred: {}", e),
    }
}

async fn load_token(config: &Config) -> AccessToken {
    match TokenStore::new(&config.token_path).load().await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    }
}

async fn obtain_token(config: Arc<Config>, timeout: Duration) -> AccessToken {
    let store = TokenStore::new(&config.token_path);
    match spotify::auth::auth(config, store, timeout).await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    }
}
