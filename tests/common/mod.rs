#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{Value, json};
use spotisage::config::Config;

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

/// Configuration whose token and API endpoints point at a mock server.
pub fn config_for(server_url: &str) -> Config {
    let base = server_url.trim_end_matches('/').to_string();
    Config::from_lookup(move |key| match key {
        "SPOTIFY_CLIENT_ID" => Some(CLIENT_ID.to_string()),
        "SPOTIFY_CLIENT_SECRET" => Some(CLIENT_SECRET.to_string()),
        "SPOTIFY_AUTH_URL" => Some(format!("{}/authorize", base)),
        "SPOTIFY_TOKEN_URL" => Some(format!("{}/api/token", base)),
        "SPOTIFY_API_URL" => Some(format!("{}/v1", base)),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// Unique path below the system temp dir. Nothing is created.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spotisage-it-{}-{}", std::process::id(), name))
}

pub fn artist_json(index: usize, genres: &[&str]) -> Value {
    json!({
        "id": format!("artist{}", index),
        "name": format!("Artist {}", index),
        "genres": genres,
        "popularity": 50,
        "type": "artist"
    })
}

pub fn track_json(prefix: &str, index: usize) -> Value {
    json!({
        "id": format!("{}{}", prefix, index),
        "name": format!("{} song {}", prefix, index),
        "duration_ms": 200000,
        "type": "track"
    })
}
