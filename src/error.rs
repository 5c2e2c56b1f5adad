use std::fmt;

use thiserror::Error;

/// Errors raised by the remote catalog (Spotify Web API).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Rate limit exceeded, retry after: {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("Access token rejected by the catalog")]
    Unauthorized,
    #[error("Pagination did not terminate after {pages} pages")]
    PaginationOverflow { pages: usize },
}

/// Errors raised while obtaining or refreshing an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No cached token found: {0}")]
    MissingToken(String),
    #[error("Failed to start callback server on {addr}: {message}")]
    ServerBind { addr: String, message: String },
    #[error("Authorization was not completed within {0} seconds")]
    TimedOut(u64),
    #[error("Token exchange failed: {0}")]
    Exchange(String),
    #[error("Token refresh failed: {0}")]
    Refresh(String),
    #[error("Failed to persist token: {0}")]
    Persist(String),
    #[error("Token verification failed: {0}")]
    Verification(#[from] CatalogError),
}

/// Configuration-related errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {var_name}")]
    MissingVariable { var_name: String },
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Errors raised while loading the artist list.
#[derive(Debug, Error)]
pub enum ArtistSourceError {
    #[error("Failed to read artist list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create example artist list {path}: {source}")]
    Bootstrap {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The playlist synchronization step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Find,
    Create,
    Clear,
    Update,
    Append,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            SyncStep::Find => "looking up playlist",
            SyncStep::Create => "creating playlist",
            SyncStep::Clear => "clearing playlist",
            SyncStep::Update => "updating playlist details",
            SyncStep::Append => "adding tracks",
        };
        f.write_str(step)
    }
}

/// A catalog failure during playlist synchronization. Fatal to the run.
#[derive(Debug, Error)]
#[error("Failed while {step}: {source}")]
pub struct SyncError {
    pub step: SyncStep,
    #[source]
    pub source: CatalogError,
}

impl SyncError {
    pub fn new(step: SyncStep, source: CatalogError) -> Self {
        Self { step, source }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
pub type AuthResult<T> = Result<T, AuthError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type SyncResult<T> = Result<T, SyncError>;
