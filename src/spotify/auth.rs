use reqwest::{Client, Url};

use crate::{Res, config, error::Error, success, types::TokenResponse, warning};

/// Scopes requested during authorization. Fixed: the service needs to create
/// playlists and read the user's profile, nothing else.
const SCOPES: &str = "playlist-modify-public playlist-modify-private user-read-private";

/// Builds the authorization URL the user is redirected to at login start.
///
/// Embeds the client identifier, the fixed scope set, the registered redirect
/// URI, and the caller-supplied CSRF state value. This is a pure URL
/// construction; no network call is made.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_AUTH_URL` is not a parseable base URL. That is a
/// configuration error caught at the first login attempt.
pub fn build_authorization_url(state: &str) -> String {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id().as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("scope", SCOPES),
            ("state", state),
        ],
    )
    .expect("SPOTIFY_API_AUTH_URL must be a valid base URL");

    url.to_string()
}

/// Exchanges an authorization code for an access token.
///
/// Posts the `authorization_code` grant to the accounts token endpoint with
/// HTTP Basic client authentication. The authorization code is single-use
/// and short-lived, so the exchange happens immediately after the callback.
///
/// # Errors
///
/// - [`Error::Upstream`] on a non-success status
/// - [`Error::MalformedResponse`] when the body cannot be decoded, or when a
///   success body carries no usable access token
/// - [`Error::Network`] on transport failure
pub async fn exchange_code(http: &Client, code: &str) -> Res<TokenResponse> {
    let response = http
        .post(&config::spotify_apitoken_url())
        .basic_auth(
            config::spotify_client_id(),
            Some(config::spotify_client_secret()),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config::spotify_redirect_uri()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warning!("Token exchange returned status {}", status);
        return Err(Error::Upstream(status));
    }

    let token = response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    if token.access_token.trim().is_empty() {
        warning!("Token exchange succeeded but the response carried no access token");
        return Err(Error::MalformedResponse(
            "token response carried no access token".to_string(),
        ));
    }

    success!("Exchanged authorization code for an access token");
    Ok(token)
}
