//! # Spotify Integration Module
//!
//! This module is the integration layer between the lineup core and the
//! Spotify Web API. It handles HTTP communication, the OAuth PKCE flow and
//! the translation of API payloads into catalog records.
//!
//! ## Architecture
//!
//! ```text
//! Lineup core (resolver, collector, synchronizer)
//!          ↓
//! CatalogClient trait
//!          ↓
//! SpotifyClient (session + token manager)
//!     ├── Artist Operations (search, top tracks)
//!     ├── Playlist Operations (list, create, details, items, add, remove)
//!     └── User Operations (current user)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! The endpoint functions in [`artists`], [`playlist`] and [`user`] are
//! stateless: they take an HTTP client, the API base URL and a bearer token.
//! [`SpotifyClient`] owns the session and hands a valid token to each call.
//!
//! ## Error Handling
//!
//! Non-success responses are classified by [`check_response`]:
//! - `401` becomes [`CatalogError::Unauthorized`]
//! - `429` becomes [`CatalogError::RateLimited`] carrying the `Retry-After` value
//! - everything else becomes [`CatalogError::Api`] with the message from the
//!   Spotify error body when one is present
//!
//! Requests are never retried here. Callers decide whether a failure is fatal.
//!
//! ## API Coverage
//!
//! - `GET /search` - Artist search
//! - `GET /artists/{id}/top-tracks` - Most popular tracks of an artist
//! - `GET /me` - Current user
//! - `GET /me/playlists` - Current user's playlists
//! - `POST /users/{user_id}/playlists` - Create playlist
//! - `PUT /playlists/{playlist_id}` - Change playlist details
//! - `GET /playlists/{playlist_id}/tracks` - Playlist items
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks
//! - `DELETE /playlists/{playlist_id}/tracks` - Remove tracks
//! - `POST /api/token` - Token exchange and refresh

pub mod artists;
pub mod auth;
pub mod client;
pub mod playlist;
pub mod user;

pub use client::SpotifyClient;

use reqwest::{Response, StatusCode};

use crate::{
    error::{CatalogError, CatalogResult},
    types::ApiErrorResponse,
};

/// Passes successful responses through and classifies failures.
pub async fn check_response(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(CatalogError::Unauthorized);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(0);
        return Err(CatalogError::RateLimited { retry_after_secs });
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    Err(CatalogError::Api {
        status: status.as_u16(),
        message,
    })
}
