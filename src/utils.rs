use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub const PLAYLIST_URL_BASE: &str = "https://open.spotify.com/playlist";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts artist names from the text of an artist list.
///
/// Lines are trimmed; blank lines and lines whose first non-whitespace
/// character is `#` are dropped. Order is preserved and duplicates are kept.
pub fn parse_artist_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Case-insensitive comparison used for artist name matching.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Renders the public URL of a playlist. The id is not validated.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("{}/{}", PLAYLIST_URL_BASE, playlist_id)
}

pub fn default_description(artist_count: usize) -> String {
    format!("Most popular tracks from {} artists", artist_count)
}

/// Interprets an answer to a yes/no prompt. Only `y` and `yes` confirm.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
