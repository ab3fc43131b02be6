//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! service: the authorization-code handshake endpoints, track search, and
//! playlist creation. It is the only place that talks to Spotify; all HTTP
//! communication, authentication headers, and response classification live
//! here, behind a trait the rest of the application consumes.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 authorization-code endpoints:
//! - **Authorization URL**: Builds the accounts-service URL the user is
//!   redirected to, embedding client id, fixed scopes, redirect URI, and the
//!   caller-supplied CSRF state value
//! - **Token Exchange**: Exchanges an authorization code for an access token
//!   using HTTP Basic client authentication
//!
//! ### Search Module
//!
//! [`search`] - Track search used by the matching pipeline:
//! - **Bounded Queries**: Each query combines an artist and a song title and
//!   is capped at a fixed candidate count
//! - **Candidate Mapping**: Raw search results are flattened into the
//!   [`crate::types::CandidateTrack`] shape the proposal model uses
//!
//! ### Playlist Module
//!
//! [`playlist`] - Playlist creation for the commit step:
//! - **Current User**: Resolves the authenticated user's id
//! - **Playlist Creation**: Creates private playlists under that user
//! - **Track Management**: Adds the selected tracks in proposal order
//!
//! ## Error Handling Philosophy
//!
//! Every call classifies its outcome into exactly one variant of
//! [`crate::error::Error`] before returning:
//! - Non-2xx responses become `Upstream` with the offending status
//! - 2xx responses whose body cannot be used become `MalformedResponse`
//! - Transport failures become `Network`
//!
//! There is no retry or backoff; each remote call is a single attempt and the
//! caller decides what a failure means for the surrounding operation.
//!
//! ## Thread Safety
//!
//! The client holds a single [`reqwest::Client`] (connection pooling, 30 s
//! per-request timeout) and is safe to share across request handlers behind
//! an `Arc`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    Res,
    types::{CandidateTrack, TokenResponse},
};

pub mod auth;
pub mod playlist;
pub mod search;

/// Request/response contract of the music catalog service.
///
/// The handshake, pipeline, and commit step consume this trait; production
/// code uses [`SpotifyClient`], tests substitute stubs.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Builds the authorization redirect URL embedding the given CSRF state
    /// value. Pure; performs no network call.
    fn build_authorization_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> Res<TokenResponse>;

    /// Searches tracks matching `artist` and `title`, returning at most
    /// `limit` candidates in search-rank order.
    async fn search_tracks(
        &self,
        artist: &str,
        title: &str,
        limit: u32,
        credential: &str,
    ) -> Res<Vec<CandidateTrack>>;

    /// Resolves the id of the user the credential belongs to.
    async fn current_user_id(&self, credential: &str) -> Res<String>;

    /// Creates an empty private playlist under the given user and returns
    /// its id.
    async fn create_playlist(&self, user_id: &str, name: &str, credential: &str) -> Res<String>;

    /// Appends the given tracks to a playlist, preserving order.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String], credential: &str)
    -> Res<()>;
}

pub struct SpotifyClient {
    http: Client,
}

impl SpotifyClient {
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        SpotifyClient { http }
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    fn build_authorization_url(&self, state: &str) -> String {
        auth::build_authorization_url(state)
    }

    async fn exchange_code(&self, code: &str) -> Res<TokenResponse> {
        auth::exchange_code(&self.http, code).await
    }

    async fn search_tracks(
        &self,
        artist: &str,
        title: &str,
        limit: u32,
        credential: &str,
    ) -> Res<Vec<CandidateTrack>> {
        search::search_tracks(&self.http, artist, title, limit, credential).await
    }

    async fn current_user_id(&self, credential: &str) -> Res<String> {
        playlist::current_user_id(&self.http, credential).await
    }

    async fn create_playlist(&self, user_id: &str, name: &str, credential: &str) -> Res<String> {
        playlist::create(&self.http, user_id, name, credential).await
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        credential: &str,
    ) -> Res<()> {
        playlist::add_tracks(&self.http, playlist_id, track_ids, credential).await
    }
}
