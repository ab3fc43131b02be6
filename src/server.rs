use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api, error, info, management::AuthSessionManager, setlistfm::SetlistFmApi, spotify::SpotifyApi,
};

/// Shared per-request context: the session manager and the two remote
/// clients. Everything inside is immutable; no state crosses requests.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthSessionManager,
    pub spotify: Arc<dyn SpotifyApi>,
    pub setlistfm: Arc<dyn SetlistFmApi>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth/login", get(api::login))
        .route("/auth/callback", get(api::callback))
        .route("/auth/logout", post(api::logout))
        .route("/preview/{setlist_id}", get(api::preview))
        .route("/playlist", post(api::commit))
        .layer(Extension(state))
}

pub async fn start_api_server(state: AppState, addr: &str) {
    let app = router(state);

    let addr = match SocketAddr::from_str(addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
