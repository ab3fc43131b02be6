use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use crate::{Res, config, error::Error, info, spotify::SpotifyApi, utils, warning};

/// Cookie carrying the sealed CSRF state value between login start and the
/// authorization callback.
pub const STATE_COOKIE: &str = "auth_state";

/// Cookie carrying the sealed access credential on authenticated calls.
pub const CREDENTIAL_COOKIE: &str = "access_credential";

/// The state cookie is single use and short-lived; the TTL is enforced both
/// by the cookie max-age and by the issue timestamp sealed into its value.
const STATE_TTL_SECS: i64 = 600;

/// Manages the authorization handshake without any server-side session
/// storage: the CSRF state value and the access credential travel only as
/// HMAC-sealed, client-held cookies.
///
/// Handshake states: `Idle -> StateIssued -> (CallbackReceived) ->
/// Authenticated`, or `StateIssued -> Rejected` on a state mismatch.
#[derive(Clone)]
pub struct AuthSessionManager {
    secret: String,
}

impl AuthSessionManager {
    pub fn new(secret: impl Into<String>) -> Self {
        AuthSessionManager {
            secret: secret.into(),
        }
    }

    /// Builds a manager keyed with the configured cookie signing secret.
    pub fn from_env() -> Self {
        Self::new(config::cookie_secret())
    }

    /// Starts a login: issues a fresh random state value, seals it (with its
    /// issue timestamp) into the state cookie, and returns the authorization
    /// URL to redirect the user to. No network call is made.
    pub fn begin_login(&self, jar: CookieJar, spotify: &dyn SpotifyApi) -> (CookieJar, String) {
        let state = utils::generate_state_token();
        let issued_at = Utc::now().timestamp();
        let sealed = utils::seal(&format!("{issued_at}:{state}"), &self.secret);

        let cookie = Cookie::build((STATE_COOKIE, sealed))
            .path("/")
            .http_only(true)
            .secure(true)
            .max_age(time::Duration::seconds(STATE_TTL_SECS));

        let url = spotify.build_authorization_url(&state);
        (jar.add(cookie), url)
    }

    /// Completes a login from the authorization callback.
    ///
    /// The issued state cookie is consumed unconditionally, so a second
    /// callback with the same state fails no matter how this one ends. A
    /// missing, expired, or tampered state cookie, or a `returned_state`
    /// that is not exactly the issued value, rejects the callback with
    /// [`Error::StateMismatch`] before any network call. Otherwise the code
    /// is exchanged for a credential, which is sealed into the credential
    /// cookie.
    ///
    /// Returns the updated jar alongside the outcome so the state-cookie
    /// removal reaches the client even on a failed callback.
    pub async fn complete_login(
        &self,
        jar: CookieJar,
        code: &str,
        returned_state: &str,
        spotify: &dyn SpotifyApi,
    ) -> (CookieJar, Res<()>) {
        let issued = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
        let jar = jar.remove(Cookie::build((STATE_COOKIE, "")).path("/"));

        let valid_state = issued.and_then(|sealed| self.validate_state(&sealed));
        let Some(valid_state) = valid_state else {
            warning!(
                "Authorization callback rejected: state cookie missing, expired, or tampered. \
                 This could indicate a CSRF attempt."
            );
            return (jar, Err(Error::StateMismatch));
        };

        if valid_state != returned_state {
            warning!(
                "Authorization callback rejected: state mismatch. This could indicate a CSRF \
                 attempt."
            );
            return (jar, Err(Error::StateMismatch));
        }

        let token = match spotify.exchange_code(code).await {
            Ok(token) => token,
            Err(e) => {
                warning!("Authorization callback failed: no credential obtained: {}", e);
                return (jar, Err(Error::ExchangeFailed(Box::new(e))));
            }
        };

        if token.access_token.trim().is_empty() {
            warning!("Authorization callback failed: token response carried no credential");
            let cause = Error::MalformedResponse(
                "token response carried no access token".to_string(),
            );
            return (jar, Err(Error::ExchangeFailed(Box::new(cause))));
        }

        let sealed = utils::seal(&token.access_token, &self.secret);
        let cookie = Cookie::build((CREDENTIAL_COOKIE, sealed))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax);

        info!("Authorization callback handled; credential cookie set");
        (jar.add(cookie), Ok(()))
    }

    /// The access credential carried by the request, if any. A missing or
    /// tampered cookie yields `None`; this never fails.
    pub fn current_credential(&self, jar: &CookieJar) -> Option<String> {
        jar.get(CREDENTIAL_COOKIE)
            .and_then(|cookie| utils::unseal(cookie.value(), &self.secret))
    }

    /// Ends the session by deleting the credential cookie. Logging out
    /// without one is fine; both outcomes are successful terminations.
    pub fn logout(&self, jar: CookieJar) -> CookieJar {
        if jar.get(CREDENTIAL_COOKIE).is_some() {
            info!("User is logging out; deleting credential cookie");
            jar.remove(Cookie::build((CREDENTIAL_COOKIE, "")).path("/"))
        } else {
            warning!("Logout requested, but no credential cookie was present");
            jar
        }
    }

    /// Unseals an issued state cookie value and returns the state token when
    /// the signature verifies and the TTL has not elapsed.
    fn validate_state(&self, sealed: &str) -> Option<String> {
        let payload = utils::unseal(sealed, &self.secret)?;
        let (issued_at, state) = payload.split_once(':')?;
        let issued_at = issued_at.parse::<i64>().ok()?;

        let age = Utc::now().timestamp() - issued_at;
        if !(0..=STATE_TTL_SECS).contains(&age) {
            return None;
        }

        Some(state.to_string())
    }
}
