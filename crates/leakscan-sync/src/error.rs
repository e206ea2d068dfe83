use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid user credentials")]
    InvalidCredentials,
    #[error("contacts service returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[cfg(feature = "remote-feed")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "remote-feed")]
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
