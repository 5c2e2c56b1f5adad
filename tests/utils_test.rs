use std::collections::HashMap;

use lineupcli::config::{self, Settings};
use lineupcli::management::TokenManager;
use lineupcli::spotify::auth::{authorization_url, into_token};
use lineupcli::types::{Token, TokenResponse};
use lineupcli::utils::*;

// Helper function to build settings from a fixed set of variables
fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, lineupcli::error::ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

fn test_token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-modify-public".to_string(),
        expires_in,
        obtained_at,
    }
}

fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be URL-safe base64 without padding
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}

#[test]
fn test_generate_code_challenge_known_value() {
    // Reference pair from RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_parse_artist_lines() {
    let content = "# my festival\nIron Maiden\n\n   Metallica  \n  # commented out\nSlayer\n\t\n";
    assert_eq!(
        parse_artist_lines(content),
        vec!["Iron Maiden", "Metallica", "Slayer"]
    );
}

#[test]
fn test_parse_artist_lines_keeps_order_and_duplicates() {
    let content = "Slayer\nAnthrax\nSlayer";
    assert_eq!(parse_artist_lines(content), vec!["Slayer", "Anthrax", "Slayer"]);
}

#[test]
fn test_parse_artist_lines_handles_crlf_and_empty_input() {
    assert_eq!(parse_artist_lines("Megadeth\r\nAnthrax\r\n"), vec!["Megadeth", "Anthrax"]);
    assert!(parse_artist_lines("").is_empty());
    assert!(parse_artist_lines("# only comments\n\n").is_empty());
}

#[test]
fn test_names_match() {
    assert!(names_match("Metallica", "metallica"));
    assert!(names_match("AC/DC", "ac/dc"));
    assert!(!names_match("Metallica", "Metallica Tribute"));
}

#[test]
fn test_playlist_url() {
    assert_eq!(
        playlist_url("37i9dQZF1DX1lVhptIYRda"),
        "https://open.spotify.com/playlist/37i9dQZF1DX1lVhptIYRda"
    );

    // The id is rendered as-is
    assert_eq!(playlist_url(""), "https://open.spotify.com/playlist/");
}

#[test]
fn test_default_description() {
    assert_eq!(default_description(5), "Most popular tracks from 5 artists");
}

#[test]
fn test_is_confirmation() {
    assert!(is_confirmation("y"));
    assert!(is_confirmation("Y\n"));
    assert!(is_confirmation("  yes  "));
    assert!(is_confirmation("YES"));

    assert!(!is_confirmation(""));
    assert!(!is_confirmation("n"));
    assert!(!is_confirmation("no"));
    assert!(!is_confirmation("yeah"));
}

#[test]
fn test_settings_defaults() {
    let settings = settings_from(&[("SPOTIFY_CLIENT_ID", "abc123")]).unwrap();

    assert_eq!(settings.client_id, "abc123");
    assert_eq!(settings.redirect_uri, config::DEFAULT_REDIRECT_URI);
    assert_eq!(settings.api_url, config::DEFAULT_API_URL);
    assert_eq!(settings.market, config::DEFAULT_MARKET);
    assert_eq!(settings.server_addr, "127.0.0.1:8888");
    assert_eq!(
        settings.auth_timeout.as_secs(),
        config::DEFAULT_AUTH_TIMEOUT_SECS
    );
}

#[test]
fn test_settings_require_client_id() {
    assert!(settings_from(&[]).is_err());

    // Blank values count as missing
    assert!(settings_from(&[("SPOTIFY_CLIENT_ID", "   ")]).is_err());
}

#[test]
fn test_settings_overrides() {
    let settings = settings_from(&[
        ("SPOTIFY_CLIENT_ID", " abc123 "),
        ("SPOTIFY_REDIRECT_URI", "http://localhost:9000/auth/done"),
        ("SPOTIFY_API_URL", "http://127.0.0.1:3000/v1/"),
        ("SPOTIFY_MARKET", "DE"),
        ("AUTH_TIMEOUT_SECS", "30"),
    ])
    .unwrap();

    assert_eq!(settings.client_id, "abc123");
    assert_eq!(settings.server_addr, "127.0.0.1:9000");
    assert_eq!(settings.api_url, "http://127.0.0.1:3000/v1");
    assert_eq!(settings.market, "DE");
    assert_eq!(settings.auth_timeout.as_secs(), 30);
}

#[test]
fn test_settings_invalid_timeout() {
    let result = settings_from(&[
        ("SPOTIFY_CLIENT_ID", "abc123"),
        ("AUTH_TIMEOUT_SECS", "soon"),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_server_addr_from_redirect() {
    assert_eq!(
        config::server_addr_from_redirect("http://127.0.0.1:8888/callback").unwrap(),
        "127.0.0.1:8888"
    );
    assert_eq!(
        config::server_addr_from_redirect("http://localhost/callback").unwrap(),
        "127.0.0.1:80"
    );
    assert!(config::server_addr_from_redirect("not a url").is_err());
}

#[test]
fn test_authorization_url() {
    let settings = settings_from(&[("SPOTIFY_CLIENT_ID", "abc123")]).unwrap();
    let url = authorization_url(&settings, "challenge_value").unwrap();

    assert!(url.starts_with(config::DEFAULT_AUTH_URL));
    assert!(url.contains("client_id=abc123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains("code_challenge=challenge_value"));
}

#[test]
fn test_into_token_keeps_previous_refresh_token() {
    let response = TokenResponse {
        access_token: "new_access".to_string(),
        refresh_token: None,
        scope: String::new(),
        expires_in: Some(1800),
    };

    let token = into_token(response, Some("old_refresh")).unwrap();
    assert_eq!(token.access_token, "new_access");
    assert_eq!(token.refresh_token, "old_refresh");
    assert_eq!(token.expires_in, 1800);
}

#[test]
fn test_into_token_requires_a_refresh_token() {
    let response = TokenResponse {
        access_token: "new_access".to_string(),
        refresh_token: None,
        scope: String::new(),
        expires_in: None,
    };
    assert!(into_token(response, None).is_none());

    let response = TokenResponse {
        access_token: "new_access".to_string(),
        refresh_token: Some("fresh".to_string()),
        scope: String::new(),
        expires_in: None,
    };
    let token = into_token(response, Some("old_refresh")).unwrap();
    assert_eq!(token.refresh_token, "fresh");
    assert_eq!(token.expires_in, 3600);
}

#[test]
fn test_token_expiry_margin() {
    let fresh = TokenManager::new(test_token(now(), 3600));
    assert!(!fresh.is_expired());

    // Inside the refresh margin
    let stale = TokenManager::new(test_token(now() - 3500, 3600));
    assert!(stale.is_expired());

    let expired = TokenManager::new(test_token(0, 3600));
    assert!(expired.is_expired());
}

#[tokio::test]
async fn test_token_persist_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache").join("token.json");

    TokenManager::with_path(test_token(now(), 3600), path.clone())
        .persist()
        .await
        .unwrap();

    let loaded = TokenManager::load_from(path).await.unwrap();
    assert_eq!(loaded.current_token().access_token, "access");
    assert_eq!(loaded.current_token().refresh_token, "refresh");
}

#[tokio::test]
async fn test_token_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(
        TokenManager::load_from(dir.path().join("token.json"))
            .await
            .is_err()
    );
}
