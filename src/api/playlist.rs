use axum::{Extension, Json, extract::Path};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};

use crate::{Res, error::Error, management, server::AppState, types::ProposedPlaylist};

pub async fn preview(
    Path(setlist_id): Path<String>,
    Extension(app): Extension<AppState>,
    jar: CookieJar,
) -> Res<Json<ProposedPlaylist>> {
    let credential = app
        .auth
        .current_credential(&jar)
        .ok_or(Error::Unauthenticated)?;

    let playlist = management::generate_preview(
        app.setlistfm.as_ref(),
        app.spotify.as_ref(),
        &setlist_id,
        &credential,
    )
    .await?;

    Ok(Json(playlist))
}

pub async fn commit(
    Extension(app): Extension<AppState>,
    jar: CookieJar,
    Json(playlist): Json<ProposedPlaylist>,
) -> Res<Json<Value>> {
    let credential = app
        .auth
        .current_credential(&jar)
        .ok_or(Error::Unauthenticated)?;

    let playlist_id =
        management::commit_playlist(app.spotify.as_ref(), &playlist, &credential).await?;

    Ok(Json(json!({ "playlist_id": playlist_id })))
}
