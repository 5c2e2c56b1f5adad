//! # API Module
//!
//! HTTP endpoints served by the local OAuth callback server.
//!
//! - [`callback`] - Receives the authorization code from Spotify and exchanges
//!   it for an access token (PKCE).
//! - [`health`] - Reports that the callback server is up.
//!
//! The router is assembled in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
