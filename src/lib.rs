//! Spotify Listening Statistics Library
//!
//! This library authenticates a single user against the Spotify Web API with the
//! OAuth 2.0 authorization-code flow, fetches their listening statistics (top
//! artists, top tracks, derived genres and recommendations) and renders them
//! into a paginated PDF document.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served by the local callback receiver
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from `.env` files and the environment
//! - `management` - Token persistence
//! - `render` - Document layout and PDF output
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `stats` - Aggregation of API responses into a statistics record
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotisage::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> spotisage::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
mod error;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod stats;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the [`Error`] kinds,
/// so callers can match on the failure instead of inspecting strings.
///
/// # Example
///
/// ```
/// use spotisage::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// at the top-level entry points only; library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a response that was missing a field
/// and was replaced by an empty list.
///
/// # Example
///
/// ```
/// warning!("Top artists response does not contain 'items'");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
