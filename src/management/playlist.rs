use futures::future::join_all;

use crate::{
    Res,
    error::Error,
    info,
    setlistfm::SetlistFmApi,
    spotify::SpotifyApi,
    success,
    types::{ProposedPlaylist, ProposedTrack, Setlist, Song},
    warning,
};

/// Candidates fetched per song during preview generation.
const PREVIEW_TRACK_COUNT: u32 = 3;

/// Builds the user-reviewable playlist proposal for one setlist.
///
/// Fetches the setlist, flattens every song across every set in encounter
/// order, and resolves each one to candidate tracks with one concurrent
/// search per song. Cover songs are searched under the covered artist's
/// name, everything else under the setlist's main artist. The whole preview
/// is all-or-nothing: a failed setlist fetch, a malformed artist or song
/// name, or any single failed search aborts it with that classified error.
pub async fn generate_preview(
    setlistfm: &dyn SetlistFmApi,
    spotify: &dyn SpotifyApi,
    setlist_id: &str,
    credential: &str,
) -> Res<ProposedPlaylist> {
    let setlist = setlistfm.fetch_setlist(setlist_id).await?;

    let artist_name = setlist.artist.name.trim();
    if artist_name.is_empty() {
        return Err(Error::Validation(
            "setlist carries an empty artist name".to_string(),
        ));
    }

    let songs: Vec<&Song> = setlist
        .sets
        .set
        .iter()
        .flat_map(|set| set.song.iter())
        .collect();

    for song in &songs {
        if song.name.trim().is_empty() {
            return Err(Error::Validation(
                "setlist carries a song with an empty name".to_string(),
            ));
        }
    }

    // One search per song, all in flight at once. The futures stay unspawned
    // so dropping the preview cancels every still-pending search.
    let searches = songs.iter().map(|song| {
        let artist = song
            .cover
            .as_ref()
            .map(|cover| cover.name.as_str())
            .unwrap_or(artist_name);
        spotify.search_tracks(artist, &song.name, PREVIEW_TRACK_COUNT, credential)
    });
    let results = join_all(searches).await;

    // Zip results back by position, never by name: duplicate song names are
    // legal within one setlist.
    let mut tracks = Vec::with_capacity(songs.len());
    for (song, result) in songs.iter().zip(results) {
        let options = match result {
            Ok(options) => options,
            Err(e) => {
                warning!("Preview aborted: search for '{}' failed: {}", song.name, e);
                return Err(e);
            }
        };

        let selected_track_id = options.first().map(|option| option.id.clone());
        tracks.push(ProposedTrack {
            song: (*song).clone(),
            options,
            selected_track_id,
        });
    }

    info!(
        "Generated preview for setlist {} with {} tracks",
        setlist_id,
        tracks.len()
    );

    Ok(ProposedPlaylist {
        name: placeholder_name(&setlist),
        tracks,
    })
}

/// Commits a finalized proposal to the catalog.
///
/// Create-then-add is a two-step saga with no rollback: when adding tracks
/// fails after creation, the playlist stays behind empty. Tracks without a
/// valid selection are skipped; when nothing is selected the add call is
/// skipped entirely and the empty playlist's id is still returned.
pub async fn commit_playlist(
    spotify: &dyn SpotifyApi,
    playlist: &ProposedPlaylist,
    credential: &str,
) -> Res<String> {
    if playlist.name.trim().is_empty() {
        return Err(Error::Validation(
            "playlist name must not be empty".to_string(),
        ));
    }

    let user_id = spotify.current_user_id(credential).await?;
    let playlist_id = spotify
        .create_playlist(&user_id, &playlist.name, credential)
        .await?;

    let track_ids: Vec<String> = playlist
        .tracks
        .iter()
        .filter_map(|track| track.selected_track().map(|candidate| candidate.id.clone()))
        .collect();

    if track_ids.is_empty() {
        warning!(
            "Playlist {} committed without any selected tracks; leaving it empty",
            playlist_id
        );
        return Ok(playlist_id);
    }

    spotify
        .add_tracks(&playlist_id, &track_ids, credential)
        .await?;

    success!(
        "Created playlist {} with {} tracks",
        playlist_id,
        track_ids.len()
    );
    Ok(playlist_id)
}

/// Default name for a fresh proposal; the user edits it before commit.
fn placeholder_name(setlist: &Setlist) -> String {
    match &setlist.venue {
        Some(venue) => format!("{} at {}", setlist.artist.name.trim(), venue.name),
        None => format!("{} setlist", setlist.artist.name.trim()),
    }
}
