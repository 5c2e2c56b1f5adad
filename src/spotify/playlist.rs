use reqwest::Client;

use crate::{
    error::CatalogResult,
    spotify::check_response,
    types::{
        AddTrackToPlaylistRequest, ChangePlaylistDetailsRequest, CreatePlaylistRequest,
        CreatePlaylistResponse, GetPlaylistItemsResponse, GetUserPlaylistsResponse,
        RemoveTracksFromPlaylistRequest, SnapshotResponse, TrackUri,
    },
};

/// Retrieves one page of the current user's playlists.
///
/// Spotify caps `limit` at 50. The `next` field of the response is `None`
/// on the last page.
pub async fn get_user_playlists(
    client: &Client,
    api_url: &str,
    token: &str,
    offset: u32,
    limit: u32,
) -> CatalogResult<GetUserPlaylistsResponse> {
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}&offset={offset}",
        uri = api_url,
        limit = limit,
        offset = offset
    );

    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let json = check_response(response)
        .await?
        .json::<GetUserPlaylistsResponse>()
        .await?;

    Ok(json)
}

/// Creates a playlist owned by `user_id`.
pub async fn create(
    client: &Client,
    api_url: &str,
    token: &str,
    user_id: &str,
    request: &CreatePlaylistRequest,
) -> CatalogResult<CreatePlaylistResponse> {
    let api_url = format!("{uri}/users/{user_id}/playlists", uri = api_url);

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(request)
        .send()
        .await?;

    let json = check_response(response)
        .await?
        .json::<CreatePlaylistResponse>()
        .await?;

    Ok(json)
}

/// Replaces the playlist description. The name is left untouched.
pub async fn change_description(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    description: &str,
) -> CatalogResult<()> {
    let api_url = format!("{uri}/playlists/{playlist_id}", uri = api_url);
    let request = ChangePlaylistDetailsRequest {
        description: description.to_string(),
    };

    let response = client
        .put(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    check_response(response).await?;
    Ok(())
}

/// Retrieves one page of playlist items, restricted to the fields we read.
///
/// Spotify caps `limit` at 100.
pub async fn get_items(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    offset: u32,
    limit: u32,
) -> CatalogResult<GetPlaylistItemsResponse> {
    let api_url = format!("{uri}/playlists/{playlist_id}/tracks", uri = api_url);
    let limit = limit.to_string();
    let offset = offset.to_string();

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(&[
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
            ("fields", "items(track(uri)),next"),
        ])
        .send()
        .await?;

    let json = check_response(response)
        .await?
        .json::<GetPlaylistItemsResponse>()
        .await?;

    Ok(json)
}

/// Appends tracks to the end of a playlist.
pub async fn add_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> CatalogResult<SnapshotResponse> {
    let api_url = format!("{uri}/playlists/{playlist_id}/tracks", uri = api_url);
    let request = AddTrackToPlaylistRequest {
        uris: uris.to_vec(),
    };

    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    let json = check_response(response)
        .await?
        .json::<SnapshotResponse>()
        .await?;

    Ok(json)
}

/// Removes every occurrence of the given tracks from a playlist.
pub async fn remove_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> CatalogResult<SnapshotResponse> {
    let api_url = format!("{uri}/playlists/{playlist_id}/tracks", uri = api_url);
    let request = RemoveTracksFromPlaylistRequest {
        tracks: uris
            .iter()
            .map(|uri| TrackUri { uri: uri.clone() })
            .collect(),
    };

    let response = client
        .delete(&api_url)
        .bearer_auth(token)
        .json(&request)
        .send()
        .await?;

    let json = check_response(response)
        .await?
        .json::<SnapshotResponse>()
        .await?;

    Ok(json)
}
