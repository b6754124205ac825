use std::collections::HashMap;

use axum::{Extension, extract::Query, http::StatusCode};

use crate::{Error, Res, server::ServerState, spotify::auth, success, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<ServerState>,
) -> (StatusCode, String) {
    match complete_authorization(&params, &state).await {
        Ok(()) => {
            success!("Token saved to {}", state.store.path().display());
            (
                StatusCode::OK,
                "Authorization complete. You can close this window.".to_string(),
            )
        }
        Err(e) => {
            warning!("Authorization failed: {}", e);
            failure_response(&e)
        }
    }
}

async fn complete_authorization(params: &HashMap<String, String>, state: &ServerState) -> Res<()> {
    let code = auth::handle_callback(params)?;
    let token = auth::exchange_code_for_token(&state.config, &code).await?;
    state.store.persist(&token).await?;

    *state.token.lock().await = Some(token);
    Ok(())
}

fn failure_response(e: &Error) -> (StatusCode, String) {
    match e {
        Error::MissingCode => (StatusCode::BAD_REQUEST, e.to_string()),
        Error::TokenExchange { .. } | Error::Http(_) => (
            StatusCode::BAD_GATEWAY,
            format!("Error during token exchange: {}", e),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error saving token: {}", e),
        ),
    }
}
