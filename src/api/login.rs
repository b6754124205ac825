use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{server::ServerState, spotify::auth::build_authorization_url, warning};

pub async fn home() -> &'static str {
    "Go to /login to authorize"
}

pub async fn login(Extension(state): Extension<ServerState>) -> Response {
    let config = &state.config;
    match build_authorization_url(
        &config.auth_url,
        &config.client_id,
        &config.redirect_uri,
        &config.scopes,
    ) {
        Ok(url) => Redirect::temporary(url.as_str()).into_response(),
        Err(e) => {
            warning!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
