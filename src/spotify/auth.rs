use std::{collections::HashMap, sync::Arc, time::Duration};

use reqwest::{Client, StatusCode, Url};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    Error, Res,
    config::Config,
    info,
    management::TokenStore,
    server::{ServerState, start_api_server},
    types::{AccessToken, AuthorizationCode, TokenResponse},
    warning,
};

/// Runs the authorization receiver until a token has been received.
///
/// This function orchestrates the entire authentication process:
/// 1. Binding the local callback server on `config.server_addr`
/// 2. Opening the authorization URL in the user's browser
/// 3. Waiting for the callback handler to exchange and persist the token
/// 4. Shutting the server down again
///
/// The callback handler writes the token file itself, so the returned token is
/// already persisted when this function succeeds.
///
/// # Errors
///
/// - [`Error::Server`] if the address cannot be bound or the server stops
/// - [`Error::Config`] if the authorization URL cannot be built
/// - [`Error::AuthTimeout`] if no token arrives within `timeout`
pub async fn auth(config: Arc<Config>, store: TokenStore, timeout: Duration) -> Res<AccessToken> {
    let auth_url = build_authorization_url(
        &config.auth_url,
        &config.client_id,
        &config.redirect_uri,
        &config.scopes,
    )?;

    let listener = TcpListener::bind(&config.server_addr)
        .await
        .map_err(|e| Error::Server(format!("Cannot bind {}: {}", config.server_addr, e)))?;

    let shared_token: Arc<Mutex<Option<AccessToken>>> = Arc::new(Mutex::new(None));
    let state = ServerState {
        config: Arc::clone(&config),
        store,
        token: Arc::clone(&shared_token),
    };
    let mut server = tokio::spawn(start_api_server(listener, state));

    info!("Waiting for the authorization callback on {}", config.redirect_uri);
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = tokio::select! {
        token = wait_for_token(shared_token, timeout) => token,
        stopped = &mut server => {
            return Err(match stopped {
                Ok(Err(e)) => e,
                _ => Error::Server("Callback server stopped unexpectedly".into()),
            });
        }
    };
    server.abort();

    token.ok_or(Error::AuthTimeout)
}

/// Polls the slot the callback handler fills every 250 ms until a token
/// shows up or `max_wait` has elapsed.
pub async fn wait_for_token(
    shared_token: Arc<Mutex<Option<AccessToken>>>,
    max_wait: Duration,
) -> Option<AccessToken> {
    use std::time::Instant;

    let poll_interval = Duration::from_millis(250).min(max_wait);
    let start = Instant::now();

    loop {
        if let Some(token) = shared_token.lock().await.as_ref() {
            return Some(token.clone());
        }
        if start.elapsed() >= max_wait {
            return None;
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// Builds the provider's authorization URL.
///
/// The query carries `client_id`, `response_type=code`, `redirect_uri` and
/// `scope`, with the scopes joined by single spaces. Values are
/// form-percent-encoded.
///
/// # Example
///
/// ```
/// let url = build_authorization_url(
///     "https://accounts.spotify.com/authorize",
///     "abc",
///     "http://localhost:8888/callback",
///     &["user-top-read".to_string()],
/// )?;
/// ```
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[String],
) -> Res<Url> {
    let scope = scopes.join(" ");
    Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("Invalid authorization URL {}: {}", auth_url, e)))
}

/// Extracts the one-time authorization code from the callback query.
///
/// A denied consent arrives as `?error=access_denied` without a code; the
/// provider's error is logged and the result is still [`Error::MissingCode`].
pub fn handle_callback(params: &HashMap<String, String>) -> Res<AuthorizationCode> {
    if let Some(provider_error) = params.get("error") {
        warning!("Authorization server returned an error: {}", provider_error);
    }

    params
        .get("code")
        .filter(|code| !code.is_empty())
        .map(|code| AuthorizationCode(code.clone()))
        .ok_or(Error::MissingCode)
}

/// Exchanges an authorization code for an access token.
///
/// Posts the form-encoded authorization-code grant, including the client
/// secret, to the token endpoint. Only `200 OK` counts as success: the body of
/// any other response, 2xx included, is returned verbatim inside
/// [`Error::TokenExchange`] and never inspected for a token. A 200 response
/// without a usable `access_token` fails the same way.
pub async fn exchange_code_for_token(
    config: &Config,
    code: &AuthorizationCode,
) -> Res<AccessToken> {
    let client = Client::new();
    let response = client
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code.0.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        return Err(Error::TokenExchange {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str::<TokenResponse>(&body)
        .ok()
        .and_then(|json| json.access_token)
        .and_then(|raw| AccessToken::new(&raw))
        .ok_or(Error::TokenExchange {
            status: status.as_u16(),
            body,
        })
}
