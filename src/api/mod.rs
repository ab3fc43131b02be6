//! # API Module
//!
//! This module provides the HTTP endpoints exposed by the service. It is a
//! thin layer: handlers translate between the wire (query parameters, JSON
//! bodies, cookies) and the operations in [`crate::management`], which own
//! the actual handshake and pipeline semantics.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Starts the authorization handshake: issues the CSRF state
//!   cookie and redirects the user to the catalog's authorization page.
//! - [`callback`] - Completes the handshake: consumes the state cookie,
//!   exchanges the authorization code, and sets the credential cookie.
//! - [`logout`] - Deletes the credential cookie.
//!
//! ### Playlists
//!
//! - [`preview`] - Builds the reviewable song-to-track proposal for one
//!   setlist. Requires the credential cookie.
//! - [`commit`] - Creates the playlist on the catalog from a finalized
//!   proposal. Requires the credential cookie.
//!
//! ### Monitoring
//!
//! - [`health`] - Health check endpoint returning application status and
//!   version information for monitoring systems and load balancers.
//!
//! ## Error Responses
//!
//! Handlers return [`crate::error::Error`] directly; its `IntoResponse`
//! implementation maps each classified failure to a status code and a JSON
//! body without exposing raw upstream payloads.

mod auth;
mod health;
mod playlist;

pub use auth::callback;
pub use auth::login;
pub use auth::logout;
pub use health::health;
pub use playlist::commit;
pub use playlist::preview;
