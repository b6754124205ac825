use std::{io, path::PathBuf};

use thiserror::Error;

/// Every failure the receiver and the statistics pipeline can surface.
///
/// None of these are retried. The CLI prints them through the `error!` macro,
/// the callback server turns them into a plaintext response body.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Authorization failed. No code received.")]
    MissingCode,

    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Token file {} not found. Run spotisage auth first.", .0.display())]
    TokenNotFound(PathBuf),

    #[error("Token file {} is empty. Run spotisage auth again.", .0.display())]
    TokenEmpty(PathBuf),

    #[error("Spotify API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response from {endpoint} is missing the '{field}' field")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    #[error("Failed to render document: {0}")]
    Render(String),

    #[error("Failed to write token to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Callback server error: {0}")]
    Server(String),

    #[error("Authorization timed out before a token was received")]
    AuthTimeout,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
