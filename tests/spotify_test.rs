mod common;

use mockito::Matcher;
use serde_json::json;
use spotisage::{
    Error,
    spotify::{
        auth::exchange_code_for_token,
        recommendations::fetch_recommendations,
        top::{fetch_top_artists, fetch_top_tracks},
    },
    types::{AccessToken, AuthorizationCode, FieldPolicy, TimeRange},
};

use common::{CLIENT_ID, CLIENT_SECRET, artist_json, config_for, track_json};

fn token() -> AccessToken {
    AccessToken::new("abc123").unwrap()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn token_exchange_posts_authorization_code_grant() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let mock = server
        .mock("POST", "/api/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "one-time-code".into()),
            Matcher::UrlEncoded("redirect_uri".into(), config.redirect_uri.clone()),
            Matcher::UrlEncoded("client_id".into(), CLIENT_ID.into()),
            Matcher::UrlEncoded("client_secret".into(), CLIENT_SECRET.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "abc123",
                "token_type": "Bearer",
                "scope": "user-top-read",
                "expires_in": 3600
            })
            .to_string(),
        )
        .create_async()
        .await;

    let token = exchange_code_for_token(&config, &AuthorizationCode("one-time-code".into()))
        .await
        .unwrap();

    assert_eq!(token.as_str(), "abc123");
    mock.assert_async().await;
}

#[tokio::test]
async fn token_exchange_fails_for_every_status_but_ok() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    for status in [201_usize, 202, 204, 400, 401, 403, 404, 500, 503] {
        // A token in the body of anything but 200 must never be picked up.
        let body = json!({"error": "invalid_grant", "access_token": "leaked"}).to_string();
        let mock = server
            .mock("POST", "/api/token")
            .with_status(status)
            .with_body(body.clone())
            .create_async()
            .await;

        let err = exchange_code_for_token(&config, &AuthorizationCode("code".into()))
            .await
            .unwrap_err();

        match err {
            Error::TokenExchange {
                status: got,
                body: got_body,
            } => {
                assert_eq!(got as usize, status);
                // 204 responses carry no body on the wire.
                if status != 204 {
                    assert_eq!(got_body, body);
                }
            }
            other => panic!("expected TokenExchange for {}, got {:?}", status, other),
        }
        mock.remove_async().await;
    }
}

#[tokio::test]
async fn token_exchange_without_access_token_fails() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let _mock = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_body(json!({"token_type": "Bearer"}).to_string())
        .create_async()
        .await;

    let err = exchange_code_for_token(&config, &AuthorizationCode("code".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TokenExchange { status: 200, .. }));
}

#[tokio::test]
async fn top_artists_are_requested_with_bearer_limit_and_range() {
    let mut server = mockito::Server::new_async().await;
    let mut config = config_for(&server.url());
    config.time_range = TimeRange::Long;

    let mock = server
        .mock("GET", "/v1/me/top/artists")
        .match_header("authorization", "Bearer abc123")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("time_range".into(), "long_term".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({"items": [artist_json(0, &["pop"]), artist_json(1, &["rock", "indie"])]})
                .to_string(),
        )
        .create_async()
        .await;

    let artists = fetch_top_artists(&config, &token()).await.unwrap();

    assert_eq!(artists.len(), 2);
    assert_eq!(artists[0].id, "artist0");
    assert_eq!(artists[1].genres, vec!["rock", "indie"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn top_tracks_missing_items_degrade_to_empty() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let _mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"total": 0}).to_string())
        .create_async()
        .await;

    let tracks = fetch_top_tracks(&config, &token()).await.unwrap();
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn top_tracks_missing_items_fail_when_strict() {
    let mut server = mockito::Server::new_async().await;
    let mut config = config_for(&server.url());
    config.field_policy = FieldPolicy::FailFast;

    let _mock = server
        .mock("GET", "/v1/me/top/tracks")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let err = fetch_top_tracks(&config, &token()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::MissingField {
            endpoint: "/me/top/tracks",
            field: "items"
        }
    ));
}

#[tokio::test]
async fn api_error_status_is_reported_with_body() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let _mock = server
        .mock("GET", "/v1/me/top/artists")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":{"status":401,"message":"The access token expired"}}"#)
        .create_async()
        .await;

    let err = fetch_top_artists(&config, &token()).await.unwrap_err();
    match err {
        Error::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("The access token expired"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_json_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let _mock = server
        .mock("GET", "/v1/me/top/artists")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = fetch_top_artists(&config, &token()).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 200, .. }));
}

#[tokio::test]
async fn recommendations_use_first_two_seeds_of_each_kind() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let mock = server
        .mock("GET", "/v1/recommendations")
        .match_header("authorization", "Bearer abc123")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("seed_artists".into(), "a1,a2".into()),
            Matcher::UrlEncoded("seed_tracks".into(), "t1,t2".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(json!({"tracks": [track_json("rec", 0), track_json("rec", 1)]}).to_string())
        .create_async()
        .await;

    let tracks = fetch_recommendations(
        &config,
        &token(),
        &ids(&["a1", "a2", "a3"]),
        &ids(&["t1", "t2", "t3", "t4"]),
    )
    .await
    .unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "rec song 0");
    mock.assert_async().await;
}

#[tokio::test]
async fn recommendations_use_all_seeds_when_fewer_than_two() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let mock = server
        .mock("GET", "/v1/recommendations")
        .match_query(Matcher::Regex("^seed_artists=only&limit=10$".into()))
        .with_status(200)
        .with_body(json!({"tracks": []}).to_string())
        .create_async()
        .await;

    let tracks = fetch_recommendations(&config, &token(), &ids(&["only"]), &[])
        .await
        .unwrap();

    assert!(tracks.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn recommendations_without_any_seed_skip_the_request() {
    let mut server = mockito::Server::new_async().await;
    let config = config_for(&server.url());

    let mock = server
        .mock("GET", "/v1/recommendations")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tracks = fetch_recommendations(&config, &token(), &[], &[])
        .await
        .unwrap();

    assert!(tracks.is_empty());
    mock.assert_async().await;
}
