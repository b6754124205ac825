//! The statistics pipeline: three sequential fetches, aggregation into a
//! [`StatsRecord`] and rendering.

use crate::{
    Res,
    config::Config,
    render,
    spotify::{recommendations, top},
    types::{AccessToken, Artist, StatsRecord, Track},
    utils,
};

/// Builds the statistics record without any I/O.
///
/// Names keep the order the API returned them in. Genres of all artists are
/// collected into a set, so each genre appears once no matter how many
/// artists share it.
pub fn build_stats_record(
    artists: &[Artist],
    tracks: &[Track],
    recommendations: &[Track],
) -> StatsRecord {
    StatsRecord {
        top_artists: artists.iter().map(|a| a.name.clone()).collect(),
        top_tracks: tracks.iter().map(|t| t.name.clone()).collect(),
        top_genres: artists
            .iter()
            .flat_map(|a| a.genres.iter().cloned())
            .collect(),
        recommendations: recommendations.iter().map(|t| t.name.clone()).collect(),
    }
}

/// IDs in response order, used to seed recommendations.
pub fn artist_ids(artists: &[Artist]) -> Vec<String> {
    artists.iter().map(|a| a.id.clone()).collect()
}

pub fn track_ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

/// Fetches the three endpoints strictly one after another and aggregates them.
///
/// The first failing request aborts the run. Fields degraded to empty lists
/// by the field policy do not count as failures.
pub async fn collect_stats(config: &Config, token: &AccessToken) -> Res<StatsRecord> {
    let pb = utils::spinner("Fetching top artists...");
    let artists = top::fetch_top_artists(config, token).await;
    pb.finish_and_clear();
    let artists = artists?;

    let pb = utils::spinner("Fetching top tracks...");
    let tracks = top::fetch_top_tracks(config, token).await;
    pb.finish_and_clear();
    let tracks = tracks?;

    let pb = utils::spinner("Fetching recommendations...");
    let recommendations = recommendations::fetch_recommendations(
        config,
        token,
        &artist_ids(&artists),
        &track_ids(&tracks),
    )
    .await;
    pb.finish_and_clear();
    let recommendations = recommendations?;

    Ok(build_stats_record(&artists, &tracks, &recommendations))
}

/// Collects the statistics and renders them to `config.output_path`.
///
/// Nothing is written when any request fails.
pub async fn run_pipeline(config: &Config, token: &AccessToken) -> Res<StatsRecord> {
    let record = collect_stats(config, token).await?;
    render::render(&record, &config.output_path).await?;
    Ok(record)
}
