use std::{collections::BTreeSet, fmt};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Bearer token obtained from the authorization-code exchange.
///
/// Always non-empty. Expiry is not tracked; an expired token surfaces as an
/// API error on the first request.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Trims the raw value. Returns `None` for a blank token.
    pub fn new(raw: &str) -> Option<Self> {
        let token = raw.trim();
        (!token.is_empty()).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// One-time code handed to the callback by the authorization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode(pub String);

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
}

/// Paged response of `/me/top/{type}`. `items` stays optional so a response
/// without it can be told apart from malformed JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct TopItemsResponse<T> {
    pub items: Option<Vec<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Option<Vec<Track>>,
}

/// Time window the top-items endpoints aggregate over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    /// Roughly the last four weeks
    #[value(name = "short_term")]
    Short,
    /// Roughly the last six months
    #[default]
    #[value(name = "medium_term")]
    Medium,
    /// Several years of data
    #[value(name = "long_term")]
    Long,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

/// What to do when a successful response lacks the expected list field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Log a warning and continue with an empty list.
    #[default]
    Degrade,
    /// Fail with `Error::MissingField`.
    FailFast,
}

pub const TITLE_TOP_ARTISTS: &str = "Top Artists";
pub const TITLE_TOP_TRACKS: &str = "Top Tracks";
pub const TITLE_TOP_GENRES: &str = "Top Genres";
pub const TITLE_RECOMMENDATIONS: &str = "Song Recommendations";

/// Listening statistics assembled from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsRecord {
    pub top_artists: Vec<String>,
    pub top_tracks: Vec<String>,
    pub top_genres: BTreeSet<String>,
    pub recommendations: Vec<String>,
}

impl StatsRecord {
    /// The four fields in page order, each paired with its title.
    pub fn sections(&self) -> Vec<(&'static str, Vec<String>)> {
        vec![
            (TITLE_TOP_ARTISTS, self.top_artists.clone()),
            (TITLE_TOP_TRACKS, self.top_tracks.clone()),
            (TITLE_TOP_GENRES, self.top_genres.iter().cloned().collect()),
            (TITLE_RECOMMENDATIONS, self.recommendations.clone()),
        ]
    }
}

#[derive(Tabled)]
pub struct SectionTableRow {
    pub section: String,
    pub items: usize,
    pub first: String,
}
