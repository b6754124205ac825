mod common;

use std::{collections::HashMap, sync::Arc};

use reqwest::{StatusCode, Url, redirect::Policy};
use serde_json::{Value, json};
use spotisage::{
    management::TokenStore,
    server::{ServerState, start_api_server},
    types::AccessToken,
};
use tokio::{net::TcpListener, sync::Mutex};

use common::{CLIENT_ID, config_for, temp_path};

struct Receiver {
    base_url: String,
    state: ServerState,
    client: reqwest::Client,
}

async fn start_receiver(provider_url: &str, token_file: &str) -> Receiver {
    let mut config = config_for(provider_url);
    config.token_path = temp_path(token_file);
    let _ = std::fs::remove_file(&config.token_path);

    let state = ServerState {
        store: TokenStore::new(&config.token_path),
        config: Arc::new(config),
        token: Arc::new(Mutex::new(None)),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(start_api_server(listener, state.clone()));

    Receiver {
        base_url: format!("http://{}", addr),
        state,
        client: reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap(),
    }
}

impl Receiver {
    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn home_page_explains_how_to_log_in() {
    let receiver = start_receiver("http://127.0.0.1:9", "home.txt").await;

    let response = receiver.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Go to /login to authorize");
}

#[tokio::test]
async fn login_redirects_to_authorization_url() {
    let receiver = start_receiver("http://127.0.0.1:9", "login.txt").await;

    let response = receiver.get("/login").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let url = Url::parse(&location).unwrap();
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert_eq!(url.path(), "/authorize");
    assert_eq!(query["client_id"], CLIENT_ID);
    assert_eq!(query["response_type"], "code");
    assert_eq!(query["redirect_uri"], "http://localhost:8888/callback");
    assert_eq!(
        query["scope"],
        "user-top-read user-read-playback-state playlist-modify-public"
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let receiver = start_receiver("http://127.0.0.1:9", "health.txt").await;

    let body: Value = receiver.get("/health").await.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "spotisage");
    assert_eq!(body["callback_path"], "/callback");
    assert_eq!(body["authorized"], false);

    *receiver.state.token.lock().await = AccessToken::new("abc123");
    let body: Value = receiver.get("/health").await.json().await.unwrap();
    assert_eq!(body["authorized"], true);
}

#[tokio::test]
async fn callback_exchanges_code_and_writes_token_file() {
    let mut provider = mockito::Server::new_async().await;
    let mock = provider
        .mock("POST", "/api/token")
        .match_body(mockito::Matcher::UrlEncoded(
            "code".into(),
            "good-code".into(),
        ))
        .with_status(200)
        .with_body(json!({"access_token": "abc123", "token_type": "Bearer"}).to_string())
        .create_async()
        .await;

    let receiver = start_receiver(&provider.url(), "callback-ok.txt").await;
    let response = receiver.get("/callback?code=good-code").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "Authorization complete. You can close this window."
    );
    mock.assert_async().await;

    let written = std::fs::read_to_string(&receiver.state.config.token_path).unwrap();
    assert_eq!(written, "abc123");

    let shared = receiver.state.token.lock().await;
    assert_eq!(shared.as_ref().map(|t| t.as_str()), Some("abc123"));
    drop(shared);

    let _ = std::fs::remove_file(&receiver.state.config.token_path);
}

#[tokio::test]
async fn callback_without_code_is_rejected() {
    let receiver = start_receiver("http://127.0.0.1:9", "callback-missing.txt").await;

    let response = receiver.get("/callback?error=access_denied").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.text().await.unwrap(),
        "Authorization failed. No code received."
    );
    assert!(!receiver.state.config.token_path.exists());
    assert!(receiver.state.token.lock().await.is_none());
}

#[tokio::test]
async fn failed_exchange_is_reported_and_nothing_is_written() {
    let mut provider = mockito::Server::new_async().await;
    let _mock = provider
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let receiver = start_receiver(&provider.url(), "callback-bad.txt").await;
    let response = receiver.get("/callback?code=expired").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("Error during token exchange"));
    assert!(body.contains("invalid_grant"));
    assert!(!receiver.state.config.token_path.exists());
}
