use axum::{Extension, Router, routing::get};
use reqwest::Url;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::{
    api,
    config::Settings,
    error::{AuthError, AuthResult},
    types::PkceToken,
    warning,
};

/// Binds the OAuth callback server and serves it in a background task.
///
/// The callback route is taken from the path of the configured redirect URI
/// so that it always matches what Spotify redirects to.
pub async fn start_api_server(
    settings: Settings,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> AuthResult<JoinHandle<()>> {
    let callback_path = Url::parse(&settings.redirect_uri)
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| "/callback".to_string());

    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .map_err(|e| AuthError::ServerBind {
            addr: settings.server_addr.clone(),
            message: e.to_string(),
        })?;

    let app = Router::new().route("/health", get(api::health)).route(
        &callback_path,
        get(api::callback)
            .layer::<_, std::convert::Infallible>(Extension(state))
            .layer(Extension(settings)),
    );

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warning!("Callback server stopped: {}", e);
        }
    }))
}
