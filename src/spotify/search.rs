use reqwest::Client;

use crate::{
    Res, config,
    error::Error,
    types::{CandidateTrack, SearchResponse},
};

/// Searches the catalog for tracks matching an artist and a song title.
///
/// The query is the plain concatenation of artist and title; ranking is left
/// entirely to the catalog and the first returned item is the best match.
/// Returns at most `limit` candidates; an empty result list is a valid
/// outcome, not an error.
pub async fn search_tracks(
    http: &Client,
    artist: &str,
    title: &str,
    limit: u32,
    credential: &str,
) -> Res<Vec<CandidateTrack>> {
    let api_url = format!("{uri}/search", uri = &config::spotify_apiurl());
    let query = format!("{artist} {title}");
    let limit = limit.to_string();

    let response = http
        .get(&api_url)
        .query(&[
            ("q", query.as_str()),
            ("type", "track"),
            ("limit", limit.as_str()),
        ])
        .bearer_auth(credential)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(status));
    }

    let res = response
        .json::<SearchResponse>()
        .await
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    let candidates = res
        .tracks
        .items
        .into_iter()
        .map(|track| CandidateTrack {
            id: track.id,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album_name: track.album.name,
            artwork_url: track.album.images.into_iter().next().map(|i| i.url),
        })
        .collect();

    Ok(candidates)
}
