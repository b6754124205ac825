//! Configuration management for spotisage.
//!
//! This module loads configuration values from `.env` files and environment
//! variables into an explicit [`Config`] value. The receiver and the pipeline
//! get the struct passed in and never read the environment themselves.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, then in the working directory
//! 3. Application defaults (where applicable)

use std::{fmt, io::ErrorKind, path::PathBuf};

use reqwest::Url;

use crate::{
    Error, Res,
    types::{FieldPolicy, TimeRange},
};

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const DEFAULT_SCOPE: &str = "user-top-read user-read-playback-state playlist-modify-public";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_TOKEN_PATH: &str = "access_token.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "Spotify_Stats.pdf";

const RESERVED_PATHS: [&str; 3] = ["/", "/login", "/health"];

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory under
/// `spotisage/.env` first, then in the current working directory. Variables that
/// are already set in the process environment are never overwritten, so real
/// environment variables take precedence over both files.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotisage/.env`
/// - macOS: `~/Library/Application Support/spotisage/.env`
/// - Windows: `%LOCALAPPDATA%/spotisage/.env`
///
/// # Errors
///
/// A missing file is not an error. This function fails if the data directory
/// cannot be created or if an existing `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotisage/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::Config(format!("{}: {}", parent.display(), e)))?;
    }

    load_env_file(dotenv::from_path(&path))?;
    load_env_file(dotenv::dotenv().map(|_| ()))
}

fn load_env_file(result: Result<(), dotenv::Error>) -> Res<()> {
    match result {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Config(format!("Cannot load .env file: {}", e))),
    }
}

/// Runtime configuration shared by the authorization receiver and the
/// statistics pipeline.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    pub token_path: PathBuf,
    pub output_path: PathBuf,
    pub time_range: TimeRange,
    pub field_policy: FieldPolicy,
    callback_path: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset. `SPOTIFY_CLIENT_ID` and
    /// `SPOTIFY_CLIENT_SECRET` are required, everything else has a default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required key is missing, the redirect URI
    /// is not an absolute URL, or the scope list is empty.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required =
            |key: &str| get(key).ok_or_else(|| Error::Config(format!("{} must be set", key)));
        let or_default =
            |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let client_id = required("SPOTIFY_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_CLIENT_SECRET")?;

        let redirect_uri = or_default("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI);
        let redirect_url = Url::parse(&redirect_uri)
            .map_err(|e| Error::Config(format!("Invalid redirect URI {}: {}", redirect_uri, e)))?;
        if RESERVED_PATHS.contains(&redirect_url.path()) {
            return Err(Error::Config(format!(
                "Redirect URI path {} collides with a built-in route",
                redirect_url.path()
            )));
        }

        let scopes: Vec<String> = or_default("SPOTIFY_SCOPE", DEFAULT_SCOPE)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if scopes.is_empty() {
            return Err(Error::Config("SPOTIFY_SCOPE must name at least one scope".into()));
        }

        Ok(Config {
            client_id,
            client_secret,
            redirect_uri,
            scopes,
            auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            token_path: PathBuf::from(or_default("SPOTISAGE_TOKEN_PATH", DEFAULT_TOKEN_PATH)),
            output_path: PathBuf::from(or_default("SPOTISAGE_OUTPUT_PATH", DEFAULT_OUTPUT_PATH)),
            time_range: TimeRange::default(),
            field_policy: FieldPolicy::default(),
            callback_path: redirect_url.path().to_string(),
        })
    }

    /// Path component of the redirect URI; the local route the provider calls back on.
    pub fn callback_path(&self) -> &str {
        &self.callback_path
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("server_addr", &self.server_addr)
            .field("token_path", &self.token_path)
            .field("output_path", &self.output_path)
            .field("time_range", &self.time_range)
            .field("field_policy", &self.field_policy)
            .finish()
    }
}
