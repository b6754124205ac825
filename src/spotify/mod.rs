//! # Spotify Integration Module
//!
//! This module is the integration layer between spotisage and the Spotify Web
//! API. It covers the OAuth 2.0 authorization-code flow and the three read-only
//! endpoints the statistics pipeline needs.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (auth, stats)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + client secret)
//!     ├── Top Items (artists, tracks)
//!     └── Recommendations (seeded from top items)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Builds the authorization URL, parses the callback, exchanges the
//!   code for a token and drives the local receiver until a token arrives.
//! - [`top`] - `GET /me/top/artists` and `GET /me/top/tracks`, ten items each.
//! - [`recommendations`] - `GET /recommendations` seeded with at most two
//!   artists and two tracks.
//!
//! ## Error Handling
//!
//! Requests are never retried. A non-2xx status or an unparsable body becomes
//! [`Error::Api`] with the status and raw body. A success response that lacks
//! its list field is handled according to the configured [`FieldPolicy`]:
//! either an empty list plus a warning, or [`Error::MissingField`].
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Authorization code exchange
//! - `GET /me/top/artists` - User's top artists
//! - `GET /me/top/tracks` - User's top tracks
//! - `GET /recommendations` - Track recommendations

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    Error, Res,
    types::{AccessToken, FieldPolicy},
    warning,
};

pub mod auth;
pub mod recommendations;
pub mod top;

/// Sends one authenticated GET and decodes the JSON body.
///
/// Anything but a 2xx status, and any body that does not decode into `T`,
/// becomes [`Error::Api`] carrying the status and the raw body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    url: &str,
    token: &AccessToken,
    query: &[(&str, String)],
) -> Res<T> {
    let client = Client::new();
    let response = client
        .get(url)
        .bearer_auth(token.as_str())
        .query(query)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|_| Error::Api {
        status: status.as_u16(),
        body,
    })
}

/// Applies the field policy to a list field that may be absent from a response.
pub(crate) fn require_field<T>(
    value: Option<Vec<T>>,
    endpoint: &'static str,
    field: &'static str,
    policy: FieldPolicy,
) -> Res<Vec<T>> {
    match (value, policy) {
        (Some(items), _) => Ok(items),
        (None, FieldPolicy::Degrade) => {
            warning!("{} response does not contain '{}'", endpoint, field);
            Ok(Vec::new())
        }
        (None, FieldPolicy::FailFast) => Err(Error::MissingField { endpoint, field }),
    }
}
