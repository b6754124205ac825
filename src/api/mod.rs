//! # API Module
//!
//! HTTP endpoints served by the local authorization receiver.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`, plaintext instructions
//! - [`login`] - `GET /login`, redirects to the provider's authorization page
//! - [`callback`] - `GET <redirect path>`, completes the authorization-code
//!   exchange and writes the token file. The path is taken from the
//!   configured redirect URI so it always matches what is registered with
//!   Spotify.
//! - [`health`] - `GET /health`, status and version as JSON
//!
//! Every response is plaintext apart from `/health`. Failures in the callback
//! are reported in the response body and are never retried.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use spotisage::server;
//!
//! let app = server::router(state);
//! axum::serve(listener, app).await?;
//! ```

mod callback;
mod health;
mod login;

pub use callback::callback;
pub use health::health;
pub use login::home;
pub use login::login;
