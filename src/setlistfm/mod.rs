//! setlist.fm REST API client.
//!
//! Provides the read-only boundary to the setlist data service: fetching one
//! setlist by id. The client is stateless; every call carries the API key
//! from configuration and classifies its outcome into the crate error
//! taxonomy before returning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{Res, config, error::Error, info, types::Setlist, warning};

/// Request/response contract of the setlist data service.
///
/// Kept behind a trait so the matching pipeline can be driven against stub
/// implementations in tests.
#[async_trait]
pub trait SetlistFmApi: Send + Sync {
    /// Fetches one setlist by its setlist.fm id.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] when the service reports no such setlist
    /// - [`Error::Upstream`] for any other non-success status
    /// - [`Error::MalformedResponse`] when a success body cannot be decoded
    /// - [`Error::Network`] on transport failure
    async fn fetch_setlist(&self, setlist_id: &str) -> Res<Setlist>;
}

pub struct SetlistFmClient {
    http: Client,
}

impl SetlistFmClient {
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        SetlistFmClient { http }
    }
}

impl Default for SetlistFmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SetlistFmApi for SetlistFmClient {
    async fn fetch_setlist(&self, setlist_id: &str) -> Res<Setlist> {
        let api_url = format!(
            "{uri}/setlist/{id}",
            uri = &config::setlistfm_apiurl(),
            id = setlist_id
        );

        let response = self
            .http
            .get(&api_url)
            .header("Accept", "application/json")
            .header("x-api-key", config::setlistfm_api_key())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warning!("Setlist {} not found upstream", setlist_id);
            return Err(Error::NotFound);
        }
        if !status.is_success() {
            warning!("Failed to retrieve setlist {}: status {}", setlist_id, status);
            return Err(Error::Upstream(status));
        }

        let setlist = response
            .json::<Setlist>()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        info!("Retrieved setlist {}", setlist_id);
        Ok(setlist)
    }
}
