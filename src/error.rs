//! Top-level error type wrapping the member crates' errors.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[cfg(feature = "client")]
    #[error(transparent)]
    Client(#[from] forcelink_client::Error),

    #[cfg(feature = "auth")]
    #[error(transparent)]
    Auth(#[from] forcelink_auth::Error),

    #[cfg(feature = "rest")]
    #[error(transparent)]
    Rest(#[from] forcelink_rest::Error),

    #[cfg(feature = "chatter")]
    #[error(transparent)]
    Chatter(#[from] forcelink_chatter::Error),

    #[error("{0}")]
    Other(String),
}
