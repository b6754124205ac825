use crate::{
    Res,
    config::Config,
    spotify::{get_json, require_field},
    types::{AccessToken, RecommendationsResponse, Track},
    utils, warning,
};

/// Maximum number of artist seeds and of track seeds sent with one request.
pub const MAX_SEEDS_PER_KIND: usize = 2;
pub const RECOMMENDATIONS_LIMIT: u32 = 10;

const RECOMMENDATIONS_ENDPOINT: &str = "/recommendations";

/// Retrieves track recommendations seeded from the user's top items.
///
/// At most the first [`MAX_SEEDS_PER_KIND`] artist IDs and track IDs are used,
/// comma-joined. Shorter lists contribute every ID they have. An empty seed
/// kind is left out of the query, and when both are empty no request is sent.
///
/// # Errors
///
/// Same as [`crate::spotify::top::fetch_top_artists`], with `tracks` as the
/// required field.
pub async fn fetch_recommendations(
    config: &Config,
    token: &AccessToken,
    artist_ids: &[String],
    track_ids: &[String],
) -> Res<Vec<Track>> {
    let seed_artists = utils::seed_ids(artist_ids, MAX_SEEDS_PER_KIND);
    let seed_tracks = utils::seed_ids(track_ids, MAX_SEEDS_PER_KIND);

    if seed_artists.is_empty() && seed_tracks.is_empty() {
        warning!("No top artists or tracks to seed recommendations with");
        return Ok(Vec::new());
    }

    let mut query = Vec::with_capacity(3);
    if !seed_artists.is_empty() {
        query.push(("seed_artists", seed_artists));
    }
    if !seed_tracks.is_empty() {
        query.push(("seed_tracks", seed_tracks));
    }
    query.push(("limit", RECOMMENDATIONS_LIMIT.to_string()));

    let url = format!("{}{}", config.api_url, RECOMMENDATIONS_ENDPOINT);
    let response: RecommendationsResponse = get_json(&url, token, &query).await?;

    require_field(
        response.tracks,
        RECOMMENDATIONS_ENDPOINT,
        "tracks",
        config.field_policy,
    )
}
