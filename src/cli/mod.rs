//! # CLI Module
//!
//! Command implementations for `lineupcli`. Each command loads its settings,
//! establishes the Spotify session it needs and reports every outcome on the
//! console. Commands never return errors: failures are printed with guidance
//! and the process exits normally.
//!
//! - [`auth`] - Runs the browser authorization flow and caches the token
//! - [`sync`] - Builds or refreshes the lineup playlist
//! - [`resolve`] - Dry run showing how each artist name resolves

mod auth;
mod resolve;
mod sync;

pub use auth::auth;
pub use resolve::resolve;
pub use sync::{SyncOptions, sync};

use crate::{
    config::{self, Settings},
    failure,
};

/// Loads the settings, printing setup guidance when they are incomplete.
fn load_settings() -> Option<Settings> {
    match Settings::from_env() {
        Ok(settings) => Some(settings),
        Err(e) => {
            failure!("{}", e);
            config::print_credentials_guidance();
            None
        }
    }
}

fn print_auth_guidance(settings: &Settings) {
    println!();
    println!("If authentication keeps failing:");
    println!(
        "1. Check that the Redirect URI in the Spotify dashboard is exactly: {}",
        settings.redirect_uri
    );
    println!(
        "2. Check that no other application is listening on {}",
        settings.server_addr
    );
    println!("3. Run `lineupcli auth` again; the token is cached after the first success");
}

fn print_interrupted() {
    println!();
    crate::warning!("Interrupted by user");
    println!("   Operations already sent to Spotify stay applied.");
}
