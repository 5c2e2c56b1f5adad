use reqwest::Client;

use crate::{
    error::CatalogResult,
    spotify::check_response,
    types::{Artist, SearchArtistsResponse, Track, TopTracksResponse},
};

/// Searches the Spotify catalog for artists.
///
/// The query is passed through as-is; reqwest only percent-encodes it for
/// transport. Field filters such as `artist:` are interpreted by Spotify.
///
/// # Arguments
///
/// * `client` - HTTP client shared by the session
/// * `api_url` - Spotify Web API base URL
/// * `token` - Valid access token
/// * `query` - Search query
/// * `limit` - Maximum number of artists to return (1-50)
///
/// # Example
///
/// ```
/// let artists = search_artists(&client, api_url, token, "artist:Slayer", 5).await?;
/// ```
pub async fn search_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    query: &str,
    limit: u32,
) -> CatalogResult<Vec<Artist>> {
    let api_url = format!("{uri}/search", uri = api_url);
    let limit = limit.to_string();

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(&[("q", query), ("type", "artist"), ("limit", limit.as_str())])
        .send()
        .await?;

    let json = check_response(response)
        .await?
        .json::<SearchArtistsResponse>()
        .await?;

    Ok(json.artists.items)
}

/// Retrieves the top tracks of an artist in the given market.
///
/// Spotify returns at most ten tracks ordered by popularity.
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    artist_id: &str,
    market: &str,
) -> CatalogResult<Vec<Track>> {
    let api_url = format!(
        "{uri}/artists/{id}/top-tracks",
        uri = api_url,
        id = artist_id
    );

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(&[("market", market)])
        .send()
        .await?;

    let json = check_response(response)
        .await?
        .json::<TopTracksResponse>()
        .await?;

    Ok(json.tracks)
}
