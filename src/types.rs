use serde::{Deserialize, Serialize};

// --- setlist.fm wire types (camelCase on the wire) ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetlistArtist {
    #[serde(default)]
    pub mbid: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    #[serde(default)]
    pub city: Option<City>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setlist {
    #[serde(default)]
    pub id: Option<String>,
    pub artist: SetlistArtist,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub tour: Option<Tour>,
    pub sets: Sets,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sets {
    #[serde(default)]
    pub set: Vec<SetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub encore: Option<u32>,
    #[serde(default)]
    pub song: Vec<Song>,
}

/// One performed song as reported by setlist.fm. `cover` carries the original
/// artist when the song is a cover; `tape` marks songs played from a
/// recording rather than performed live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    #[serde(default)]
    pub with: Option<SetlistArtist>,
    #[serde(default)]
    pub cover: Option<SetlistArtist>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub tape: bool,
}

// --- Spotify wire types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TracksContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksContainer {
    pub items: Vec<SearchTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

// --- proposal models ---

/// One Spotify search result proposed as a match for a performed song.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album_name: String,
    #[serde(default)]
    pub artwork_url: Option<String>,
}

/// Pairs one performed song with its candidate tracks, in search-rank order,
/// and an optional currently-selected candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedTrack {
    pub song: Song,
    pub options: Vec<CandidateTrack>,
    #[serde(default)]
    pub selected_track_id: Option<String>,
}

impl ProposedTrack {
    /// Selects a candidate by id. Ids not present in `options` are ignored
    /// and the current selection is left unchanged.
    pub fn select(&mut self, id: &str) {
        if self.options.iter().any(|option| option.id == id) {
            self.selected_track_id = Some(id.to_string());
        }
    }

    /// The selected candidate, if the stored id is a member of `options`.
    /// A stale or foreign id (possible on deserialized payloads) counts as
    /// no selection.
    pub fn selected_track(&self) -> Option<&CandidateTrack> {
        self.selected_track_id
            .as_deref()
            .and_then(|id| self.options.iter().find(|option| option.id == id))
    }
}

/// The full user-reviewable mapping from setlist songs to Spotify tracks,
/// in setlist order. This is the unit of review and the unit submitted to
/// the commit endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedPlaylist {
    pub name: String,
    pub tracks: Vec<ProposedTrack>,
}
