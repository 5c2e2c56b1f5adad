//! Configuration management for the lineup playlist CLI.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str =
    "playlist-modify-public playlist-modify-private playlist-read-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 120;

/// Returns the application directory inside the platform local data directory.
///
/// - Linux: `~/.local/share/lineupcli`
/// - macOS: `~/Library/Application Support/lineupcli`
/// - Windows: `%LOCALAPPDATA%/lineupcli`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lineupcli");
    path
}

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if needed, then loads `lineupcli/.env`
/// from it followed by `.env` in the working directory. Variables already set
/// in the process environment are never overwritten and missing files are
/// silently skipped.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let _ = dotenv::from_path(dir.join(".env"));
    let _ = dotenv::dotenv();
    Ok(())
}

/// Typed runtime configuration for talking to Spotify.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub market: String,
    pub server_addr: String,
    pub auth_timeout: Duration,
}

impl Settings {
    /// Builds the settings from the process environment.
    ///
    /// `SPOTIFY_CLIENT_ID` is required. Everything else falls back to the
    /// defaults exported by this module.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let client_id = var("SPOTIFY_CLIENT_ID").ok_or_else(|| ConfigError::MissingVariable {
            var_name: "SPOTIFY_CLIENT_ID".to_string(),
        })?;

        let redirect_uri =
            var("SPOTIFY_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let server_addr = match var("SERVER_ADDRESS") {
            Some(addr) => addr,
            None => server_addr_from_redirect(&redirect_uri)?,
        };

        let auth_timeout = match var("AUTH_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: "AUTH_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_AUTH_TIMEOUT_SECS,
        };

        Ok(Self {
            client_id,
            redirect_uri,
            scope: var("SPOTIFY_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: var("SPOTIFY_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: var("SPOTIFY_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: var("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            market: var("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            server_addr,
            auth_timeout: Duration::from_secs(auth_timeout),
        })
    }
}

/// Derives the callback server bind address (`host:port`) from the redirect URI.
pub fn server_addr_from_redirect(redirect_uri: &str) -> ConfigResult<String> {
    let invalid = || ConfigError::InvalidValue {
        field: "SPOTIFY_REDIRECT_URI".to_string(),
        value: redirect_uri.to_string(),
    };

    let url = Url::parse(redirect_uri).map_err(|_| invalid())?;
    let host = match url.host_str().ok_or_else(invalid)? {
        "localhost" => "127.0.0.1",
        host => host,
    };
    let port = url.port_or_known_default().ok_or_else(invalid)?;
    Ok(format!("{host}:{port}"))
}

/// Prints the guidance shown when credentials are missing or invalid.
pub fn print_credentials_guidance() {
    println!();
    println!("To obtain credentials:");
    println!("1. Go to https://developer.spotify.com/dashboard");
    println!("2. Create a new application");
    println!("3. Add {} as a Redirect URI", DEFAULT_REDIRECT_URI);
    println!("4. Copy the Client ID into a .env file:");
    println!("   SPOTIFY_CLIENT_ID=your_client_id");
    println!();
    println!(
        "The .env file is read from {} or the current directory.",
        data_dir().display()
    );
}
