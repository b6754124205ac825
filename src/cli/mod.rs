//! # CLI Module
//!
//! The user-facing commands of spotisage. Each command turns errors into
//! console output through the crate's logging macros and exits non-zero on
//! failure; the library functions they call return [`crate::Error`] instead.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the local authorization receiver, opens the browser and
//!   writes the access token to the token file
//! - [`stats`] - Reads the token, fetches top artists, top tracks and
//!   recommendations, and renders them into a four-page PDF
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotisage auth                          # Authorize and store the token
//! spotisage stats                         # Render Spotify_Stats.pdf
//! spotisage stats --time-range long_term  # Use several years of history
//! spotisage stats --login                 # Authorize and render in one go
//! ```

mod auth;
mod stats;

pub use auth::auth;
pub use stats::stats;
