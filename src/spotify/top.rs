use serde::de::DeserializeOwned;

use crate::{
    Res,
    config::Config,
    spotify::{get_json, require_field},
    types::{AccessToken, Artist, TopItemsResponse, Track},
};

/// Number of items requested from each top-items endpoint.
pub const TOP_ITEMS_LIMIT: u32 = 10;

const TOP_ARTISTS_ENDPOINT: &str = "/me/top/artists";
const TOP_TRACKS_ENDPOINT: &str = "/me/top/tracks";

/// Retrieves the user's top artists for the configured time range.
///
/// # Errors
///
/// - [`crate::Error::Api`] for a non-2xx status or a body that is not the
///   expected JSON
/// - [`crate::Error::MissingField`] if `items` is absent and the field policy
///   is `FailFast`; with `Degrade` an empty list is returned instead
/// - [`crate::Error::Http`] for network failures
pub async fn fetch_top_artists(config: &Config, token: &AccessToken) -> Res<Vec<Artist>> {
    fetch_top_items(config, token, TOP_ARTISTS_ENDPOINT).await
}

/// Retrieves the user's top tracks. Same failure behavior as [`fetch_top_artists`].
pub async fn fetch_top_tracks(config: &Config, token: &AccessToken) -> Res<Vec<Track>> {
    fetch_top_items(config, token, TOP_TRACKS_ENDPOINT).await
}

async fn fetch_top_items<T: DeserializeOwned>(
    config: &Config,
    token: &AccessToken,
    endpoint: &'static str,
) -> Res<Vec<T>> {
    let url = format!("{}{}", config.api_url, endpoint);
    let response: TopItemsResponse<T> = get_json(
        &url,
        token,
        &[
            ("limit", TOP_ITEMS_LIMIT.to_string()),
            ("time_range", config.time_range.as_str().to_string()),
        ],
    )
    .await?;

    require_field(response.items, endpoint, "items", config.field_policy)
}
