mod auth;
mod playlist;

pub use auth::AuthSessionManager;
pub use auth::CREDENTIAL_COOKIE;
pub use auth::STATE_COOKIE;
pub use playlist::commit_playlist;
pub use playlist::generate_preview;
