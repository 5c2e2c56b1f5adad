use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config::{self, Settings},
    error::{AuthError, AuthResult},
    spotify,
    types::Token,
    warning,
};

/// Seconds before expiry at which a token is considered stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the session token for the duration of a run and keeps it fresh.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            path: Self::token_path(),
        }
    }

    /// Uses a custom cache location instead of the local data directory.
    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> AuthResult<Self> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> AuthResult<Self> {
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| AuthError::MissingToken(e.to_string()))?;
        let token: Token =
            serde_json::from_str(&content).map_err(|e| AuthError::MissingToken(e.to_string()))?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::Persist(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(&self.token).map_err(|e| AuthError::Persist(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| AuthError::Persist(e.to_string()))
    }

    /// Returns an access token, refreshing it first when it is about to expire.
    ///
    /// A failed refresh falls back to the current token; the catalog then
    /// answers with `401` which surfaces as an unauthorized error.
    pub async fn get_valid_token(&mut self, settings: &Settings) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(settings, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("{}", e);
                    }
                }
                Err(e) => warning!("{}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
