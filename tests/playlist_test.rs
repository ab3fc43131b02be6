use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use setplay::{
    Res,
    error::Error,
    management::{commit_playlist, generate_preview},
    setlistfm::SetlistFmApi,
    spotify::SpotifyApi,
    types::{
        CandidateTrack, ProposedPlaylist, ProposedTrack, SetEntry, Setlist, SetlistArtist, Sets,
        Song, TokenResponse, Venue,
    },
};

// Helper function to create a plain performed song
fn song(name: &str) -> Song {
    Song {
        name: name.to_string(),
        with: None,
        cover: None,
        info: None,
        tape: false,
    }
}

// Helper function to create a cover song (original artist present)
fn cover_song(name: &str, original_artist: &str) -> Song {
    Song {
        cover: Some(SetlistArtist {
            mbid: None,
            name: original_artist.to_string(),
        }),
        ..song(name)
    }
}

// Helper function to create a candidate track
fn candidate(id: &str, name: &str) -> CandidateTrack {
    CandidateTrack {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec!["Some Artist".to_string()],
        album_name: "Some Album".to_string(),
        artwork_url: None,
    }
}

// Helper function to create a setlist with one set per inner vec
fn setlist(artist: &str, sets: Vec<Vec<Song>>) -> Setlist {
    Setlist {
        id: Some("sl-1".to_string()),
        artist: SetlistArtist {
            mbid: None,
            name: artist.to_string(),
        },
        venue: Some(Venue {
            name: "The Venue".to_string(),
            city: None,
        }),
        tour: None,
        sets: Sets {
            set: sets
                .into_iter()
                .map(|songs| SetEntry {
                    name: None,
                    encore: None,
                    song: songs,
                })
                .collect(),
        },
        info: None,
        url: None,
        event_date: Some("01-07-2025".to_string()),
    }
}

struct StubSetlistFm {
    setlist: Option<Setlist>,
}

#[async_trait]
impl SetlistFmApi for StubSetlistFm {
    async fn fetch_setlist(&self, _setlist_id: &str) -> Res<Setlist> {
        self.setlist.clone().ok_or(Error::NotFound)
    }
}

/// Search-side stub: canned candidates per song title, a set of titles whose
/// searches fail, and a record of every (artist, title) query issued.
struct SearchStub {
    responses: HashMap<String, Vec<CandidateTrack>>,
    failing_titles: HashSet<String>,
    queries: Mutex<Vec<(String, String)>>,
}

impl SearchStub {
    fn new(responses: HashMap<String, Vec<CandidateTrack>>) -> Self {
        SearchStub {
            responses,
            failing_titles: HashSet::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    fn recorded_queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpotifyApi for SearchStub {
    fn build_authorization_url(&self, _state: &str) -> String {
        unreachable!("preview tests never build authorization URLs")
    }

    async fn exchange_code(&self, _code: &str) -> Res<TokenResponse> {
        unreachable!("preview tests never exchange codes")
    }

    async fn search_tracks(
        &self,
        artist: &str,
        title: &str,
        _limit: u32,
        _credential: &str,
    ) -> Res<Vec<CandidateTrack>> {
        self.queries
            .lock()
            .unwrap()
            .push((artist.to_string(), title.to_string()));

        if self.failing_titles.contains(title) {
            return Err(Error::Upstream(reqwest::StatusCode::BAD_GATEWAY));
        }

        Ok(self.responses.get(title).cloned().unwrap_or_default())
    }

    async fn current_user_id(&self, _credential: &str) -> Res<String> {
        unreachable!("preview tests never resolve a user")
    }

    async fn create_playlist(
        &self,
        _user_id: &str,
        _name: &str,
        _credential: &str,
    ) -> Res<String> {
        unreachable!("preview tests never create playlists")
    }

    async fn add_tracks(
        &self,
        _playlist_id: &str,
        _track_ids: &[String],
        _credential: &str,
    ) -> Res<()> {
        unreachable!("preview tests never add tracks")
    }
}

/// Commit-side stub: records the create and add calls and can fail at each
/// step of the sequence.
struct CommitStub {
    fail_user: bool,
    fail_create: bool,
    fail_add: bool,
    user_calls: AtomicUsize,
    created: Mutex<Vec<(String, String)>>,
    added: Mutex<Vec<(String, Vec<String>)>>,
}

impl CommitStub {
    fn new() -> Self {
        CommitStub {
            fail_user: false,
            fail_create: false,
            fail_add: false,
            user_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpotifyApi for CommitStub {
    fn build_authorization_url(&self, _state: &str) -> String {
        unreachable!("commit tests never build authorization URLs")
    }

    async fn exchange_code(&self, _code: &str) -> Res<TokenResponse> {
        unreachable!("commit tests never exchange codes")
    }

    async fn search_tracks(
        &self,
        _artist: &str,
        _title: &str,
        _limit: u32,
        _credential: &str,
    ) -> Res<Vec<CandidateTrack>> {
        unreachable!("commit tests never search")
    }

    async fn current_user_id(&self, _credential: &str) -> Res<String> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_user {
            return Err(Error::Upstream(reqwest::StatusCode::BAD_GATEWAY));
        }
        Ok("user-1".to_string())
    }

    async fn create_playlist(&self, user_id: &str, name: &str, _credential: &str) -> Res<String> {
        if self.fail_create {
            return Err(Error::Upstream(reqwest::StatusCode::BAD_GATEWAY));
        }
        self.created
            .lock()
            .unwrap()
            .push((user_id.to_string(), name.to_string()));
        Ok("playlist-1".to_string())
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        _credential: &str,
    ) -> Res<()> {
        if self.fail_add {
            return Err(Error::Upstream(reqwest::StatusCode::BAD_GATEWAY));
        }
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), track_ids.to_vec()));
        Ok(())
    }
}

#[tokio::test]
async fn preview_preserves_setlist_order_across_sets() {
    let titles = ["Opener", "Deep Cut", "Single", "Encore One", "Encore Two"];
    let responses = titles
        .iter()
        .map(|title| {
            (
                title.to_string(),
                vec![candidate(&format!("id-{title}"), title)],
            )
        })
        .collect();
    let spotify = SearchStub::new(responses);
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist(
            "Main Artist",
            vec![
                vec![song("Opener"), song("Deep Cut"), song("Single")],
                vec![song("Encore One"), song("Encore Two")],
            ],
        )),
    };

    let playlist = generate_preview(&setlistfm, &spotify, "sl-1", "token")
        .await
        .expect("preview should succeed");

    // One proposed track per performed song, in flattened setlist order
    assert_eq!(playlist.tracks.len(), 5);
    let names: Vec<&str> = playlist
        .tracks
        .iter()
        .map(|track| track.song.name.as_str())
        .collect();
    assert_eq!(names, titles);

    // Every track defaults to its first (sole) candidate
    for (track, title) in playlist.tracks.iter().zip(titles) {
        assert_eq!(
            track.selected_track_id.as_deref(),
            Some(format!("id-{title}").as_str())
        );
    }
}

#[tokio::test]
async fn cover_songs_are_searched_under_the_cover_artist() {
    let mut responses = HashMap::new();
    responses.insert("Own Song".to_string(), vec![candidate("a", "Own Song")]);
    responses.insert("Covered Song".to_string(), vec![candidate("b", "Covered Song")]);
    let spotify = SearchStub::new(responses);
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist(
            "Artist A",
            vec![vec![
                song("Own Song"),
                cover_song("Covered Song", "Artist B"),
            ]],
        )),
    };

    generate_preview(&setlistfm, &spotify, "sl-1", "token")
        .await
        .expect("preview should succeed");

    // The cover is attributed to the original artist, everything else to the
    // setlist's main artist
    assert_eq!(
        spotify.recorded_queries(),
        vec![
            ("Artist A".to_string(), "Own Song".to_string()),
            ("Artist B".to_string(), "Covered Song".to_string()),
        ]
    );
}

#[tokio::test]
async fn guest_performers_do_not_change_the_search_artist() {
    let spotify = SearchStub::new(HashMap::new());
    let mut duet = song("Duet");
    duet.with = Some(SetlistArtist {
        mbid: None,
        name: "Guest Artist".to_string(),
    });
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist("Artist A", vec![vec![duet]])),
    };

    generate_preview(&setlistfm, &spotify, "sl-1", "token")
        .await
        .expect("preview should succeed");

    // A guest performer is not a cover; the main artist drives the query
    assert_eq!(
        spotify.recorded_queries(),
        vec![("Artist A".to_string(), "Duet".to_string())]
    );
}

#[tokio::test]
async fn preview_fails_when_any_search_fails() {
    let responses = ["One", "Two", "Three"]
        .iter()
        .map(|title| (title.to_string(), vec![candidate("x", title)]))
        .collect();
    let spotify = SearchStub::new(responses).failing_on("Two");
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist(
            "Main Artist",
            vec![vec![song("One"), song("Two"), song("Three")]],
        )),
    };

    let result = generate_preview(&setlistfm, &spotify, "sl-1", "token").await;

    // All-or-nothing: one failed search out of three fails the whole preview
    assert!(matches!(result, Err(Error::Upstream(_))));
    assert_eq!(spotify.recorded_queries().len(), 3);
}

#[tokio::test]
async fn two_song_preview_end_to_end() {
    let mut responses = HashMap::new();
    responses.insert("Plain Song".to_string(), vec![candidate("p1", "Plain Song")]);
    responses.insert("Cover Song".to_string(), vec![candidate("c1", "Cover Song")]);
    let spotify = SearchStub::new(responses);
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist(
            "Artist A",
            vec![vec![
                song("Plain Song"),
                cover_song("Cover Song", "Artist B"),
            ]],
        )),
    };

    let playlist = generate_preview(&setlistfm, &spotify, "sl-1", "token")
        .await
        .expect("preview should succeed");

    // Two tracks, order preserved, each pre-selected to its sole candidate
    assert_eq!(playlist.tracks.len(), 2);
    assert_eq!(playlist.tracks[0].song.name, "Plain Song");
    assert_eq!(playlist.tracks[0].selected_track_id.as_deref(), Some("p1"));
    assert_eq!(playlist.tracks[1].song.name, "Cover Song");
    assert_eq!(playlist.tracks[1].selected_track_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn songs_without_candidates_stay_unselected() {
    // No canned responses: the search succeeds with an empty candidate list
    let spotify = SearchStub::new(HashMap::new());
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist("Main Artist", vec![vec![song("Obscurity")]])),
    };

    let playlist = generate_preview(&setlistfm, &spotify, "sl-1", "token")
        .await
        .expect("preview should succeed");

    assert_eq!(playlist.tracks.len(), 1);
    assert!(playlist.tracks[0].options.is_empty());
    assert_eq!(playlist.tracks[0].selected_track_id, None);
}

#[tokio::test]
async fn preview_rejects_an_empty_artist_name() {
    let spotify = SearchStub::new(HashMap::new());
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist("   ", vec![vec![song("Some Song")]])),
    };

    let result = generate_preview(&setlistfm, &spotify, "sl-1", "token").await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(spotify.recorded_queries().is_empty());
}

#[tokio::test]
async fn preview_rejects_an_empty_song_name() {
    let spotify = SearchStub::new(HashMap::new());
    let setlistfm = StubSetlistFm {
        setlist: Some(setlist("Main Artist", vec![vec![song("Fine"), song("")]])),
    };

    let result = generate_preview(&setlistfm, &spotify, "sl-1", "token").await;

    // Malformed upstream data aborts before any search is issued
    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(spotify.recorded_queries().is_empty());
}

#[tokio::test]
async fn preview_propagates_a_missing_setlist() {
    let spotify = SearchStub::new(HashMap::new());
    let setlistfm = StubSetlistFm { setlist: None };

    let result = generate_preview(&setlistfm, &spotify, "missing", "token").await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[test]
fn selecting_an_unknown_candidate_is_a_noop() {
    let mut track = ProposedTrack {
        song: song("Some Song"),
        options: vec![candidate("a", "A"), candidate("b", "B")],
        selected_track_id: Some("a".to_string()),
    };

    // Should keep the current selection when the id is not an option
    track.select("not-an-option");
    assert_eq!(track.selected_track_id.as_deref(), Some("a"));

    // Should switch when the id is a member of the candidate list
    track.select("b");
    assert_eq!(track.selected_track_id.as_deref(), Some("b"));
}

#[test]
fn foreign_selection_ids_count_as_no_selection() {
    // A deserialized payload may carry any id; membership decides
    let track = ProposedTrack {
        song: song("Some Song"),
        options: vec![candidate("a", "A")],
        selected_track_id: Some("foreign".to_string()),
    };

    assert!(track.selected_track().is_none());
}

#[tokio::test]
async fn commit_creates_the_playlist_and_adds_selected_tracks_in_order() {
    let spotify = CommitStub::new();
    let playlist = ProposedPlaylist {
        name: "Artist A at The Venue".to_string(),
        tracks: vec![
            ProposedTrack {
                song: song("One"),
                options: vec![candidate("a", "One")],
                selected_track_id: Some("a".to_string()),
            },
            ProposedTrack {
                song: song("Two"),
                options: vec![candidate("b", "Two")],
                selected_track_id: None,
            },
            ProposedTrack {
                song: song("Three"),
                options: vec![candidate("c", "Three")],
                selected_track_id: Some("c".to_string()),
            },
        ],
    };

    let playlist_id = commit_playlist(&spotify, &playlist, "token")
        .await
        .expect("commit should succeed");

    assert_eq!(playlist_id, "playlist-1");

    // Created once, under the resolved user, with the proposal's name
    assert_eq!(
        spotify.created.lock().unwrap().clone(),
        vec![("user-1".to_string(), "Artist A at The Venue".to_string())]
    );

    // Unselected rows are skipped; the selected ids keep playlist order
    assert_eq!(
        spotify.added.lock().unwrap().clone(),
        vec![(
            "playlist-1".to_string(),
            vec!["a".to_string(), "c".to_string()]
        )]
    );
}

#[tokio::test]
async fn commit_skips_the_add_call_when_nothing_is_selected() {
    let spotify = CommitStub::new();
    let playlist = ProposedPlaylist {
        name: "Empty Pick".to_string(),
        tracks: vec![ProposedTrack {
            song: song("One"),
            options: vec![candidate("a", "One")],
            selected_track_id: None,
        }],
    };

    let playlist_id = commit_playlist(&spotify, &playlist, "token")
        .await
        .expect("commit should succeed");

    // The playlist exists but stays empty; no add call was issued
    assert_eq!(playlist_id, "playlist-1");
    assert_eq!(spotify.created.lock().unwrap().len(), 1);
    assert!(spotify.added.lock().unwrap().is_empty());
}

#[tokio::test]
async fn commit_stops_before_creation_when_the_user_lookup_fails() {
    let spotify = CommitStub {
        fail_user: true,
        ..CommitStub::new()
    };
    let playlist = ProposedPlaylist {
        name: "Doomed".to_string(),
        tracks: Vec::new(),
    };

    let result = commit_playlist(&spotify, &playlist, "token").await;

    assert!(matches!(result, Err(Error::Upstream(_))));
    assert!(spotify.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn commit_leaves_the_playlist_behind_when_adding_tracks_fails() {
    let spotify = CommitStub {
        fail_add: true,
        ..CommitStub::new()
    };
    let playlist = ProposedPlaylist {
        name: "Half Done".to_string(),
        tracks: vec![ProposedTrack {
            song: song("One"),
            options: vec![candidate("a", "One")],
            selected_track_id: Some("a".to_string()),
        }],
    };

    let result = commit_playlist(&spotify, &playlist, "token").await;

    // The documented partial-failure state: playlist created, then the add
    // step failed, and no compensating delete is attempted
    assert!(matches!(result, Err(Error::Upstream(_))));
    assert_eq!(spotify.created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn commit_rejects_an_empty_playlist_name() {
    let spotify = CommitStub::new();
    let playlist = ProposedPlaylist {
        name: "  ".to_string(),
        tracks: Vec::new(),
    };

    let result = commit_playlist(&spotify, &playlist, "token").await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(spotify.user_calls.load(Ordering::SeqCst), 0);
}
