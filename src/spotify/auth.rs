use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    error::{AuthError, AuthResult},
    info,
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Runs the OAuth 2.0 PKCE authorization flow and returns a fresh token.
///
/// Starts the local callback server, opens the authorization URL in the
/// default browser (printing it when no browser can be launched) and waits
/// for the callback handler to exchange the code. The server is shut down
/// once the flow ends.
///
/// # Errors
///
/// - [`AuthError::ServerBind`] if the callback address is already in use
/// - [`AuthError::TimedOut`] if no token arrives within the configured timeout
pub async fn authorize(settings: &Settings) -> AuthResult<Token> {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let server = start_api_server(settings.clone(), Arc::clone(&shared_state)).await?;

    let auth_url = authorization_url(settings, &code_challenge)?;
    info!("Waiting for authorization in the browser...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state, settings.auth_timeout).await;
    server.abort();

    token.ok_or(AuthError::TimedOut(settings.auth_timeout.as_secs()))
}

/// Builds the Spotify authorization URL for the given PKCE challenge.
pub fn authorization_url(settings: &Settings, code_challenge: &str) -> AuthResult<String> {
    let url = Url::parse_with_params(
        &settings.auth_url,
        &[
            ("client_id", settings.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", settings.scope.as_str()),
        ],
    )
    .map_err(|e| AuthError::Exchange(format!("invalid authorization URL: {}", e)))?;

    Ok(url.to_string())
}

async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(pkce_token) = lock.as_ref() {
            if let Some(token) = &pkce_token.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code and its PKCE verifier for a token.
pub async fn exchange_code_pkce(
    settings: &Settings,
    code: &str,
    verifier: &str,
) -> AuthResult<Token> {
    let client = Client::new();
    let res = client
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AuthError::Exchange(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::Exchange(format!("{} {}", status, body)));
    }

    let json = res
        .json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::Exchange(e.to_string()))?;

    into_token(json, None).ok_or_else(|| {
        AuthError::Exchange("token response did not contain a refresh token".to_string())
    })
}

/// Refreshes an access token. Spotify may omit a new refresh token, in which
/// case the previous one stays valid and is kept.
pub async fn refresh_token(settings: &Settings, refresh_token: &str) -> AuthResult<Token> {
    let client = Client::new();
    let res = client
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", settings.client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AuthError::Refresh(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::Refresh(format!("{} {}", status, body)));
    }

    let json = res
        .json::<TokenResponse>()
        .await
        .map_err(|e| AuthError::Refresh(e.to_string()))?;

    into_token(json, Some(refresh_token))
        .ok_or_else(|| AuthError::Refresh("missing refresh token".to_string()))
}

/// Converts a token endpoint response, falling back to `previous_refresh`
/// when the response carries no refresh token.
pub fn into_token(response: TokenResponse, previous_refresh: Option<&str>) -> Option<Token> {
    let refresh_token = response
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| previous_refresh.map(str::to_string))?;

    Some(Token {
        access_token: response.access_token,
        refresh_token,
        scope: response.scope,
        expires_in: response.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
