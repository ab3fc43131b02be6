use reqwest::Client;

use crate::{
    Res, config,
    error::Error,
    info,
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        CurrentUserResponse,
    },
};

/// Resolves the id of the user the access credential belongs to.
pub async fn current_user_id(http: &Client, credential: &str) -> Res<String> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let response = http.get(&api_url).bearer_auth(credential).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(status));
    }

    let user = response
        .json::<CurrentUserResponse>()
        .await
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    Ok(user.id)
}

/// Creates an empty private playlist under the given user.
///
/// Returns the new playlist's id. No cleanup happens here if a later step
/// fails; an empty playlist is the documented partial-failure state of the
/// commit sequence.
pub async fn create(http: &Client, user_id: &str, name: &str, credential: &str) -> Res<String> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );

    let request = CreatePlaylistRequest {
        name: name.to_string(),
        description: "Created by setplay from a setlist.fm setlist.".to_string(),
        public: false,
        collaborative: false,
    };

    let response = http
        .post(&api_url)
        .bearer_auth(credential)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(status));
    }

    let playlist = response
        .json::<CreatePlaylistResponse>()
        .await
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    info!("Created playlist {} ({})", playlist.name, playlist.id);
    Ok(playlist.id)
}

/// Appends tracks to a playlist in the given order.
pub async fn add_tracks(
    http: &Client,
    playlist_id: &str,
    track_ids: &[String],
    credential: &str,
) -> Res<()> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let request = AddTracksRequest {
        uris: track_ids
            .iter()
            .map(|id| format!("spotify:track:{id}"))
            .collect(),
    };

    let response = http
        .post(&api_url)
        .bearer_auth(credential)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream(status));
    }

    response
        .json::<AddTracksResponse>()
        .await
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    Ok(())
}
