use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{error::Error, server::AppState, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn login(Extension(app): Extension<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let (jar, url) = app.auth.begin_login(jar, app.spotify.as_ref());
    (jar, Redirect::to(&url))
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(app): Extension<AppState>,
    jar: CookieJar,
) -> Response {
    if let Some(denial) = params.error {
        warning!("Authorization denied upstream: {}", denial);
        return Error::Validation("authorization was denied".to_string()).into_response();
    }

    let (Some(code), Some(returned_state)) = (params.code, params.state) else {
        return Error::Validation("missing code or state".to_string()).into_response();
    };

    let (jar, outcome) = app
        .auth
        .complete_login(jar, &code, &returned_state, app.spotify.as_ref())
        .await;

    // The jar rides along on both arms so the consumed state cookie is
    // removed from the client even when the callback fails.
    match outcome {
        Ok(()) => (jar, Json(json!({ "status": "authenticated" }))).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}

pub async fn logout(
    Extension(app): Extension<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    (app.auth.logout(jar), StatusCode::NO_CONTENT)
}
