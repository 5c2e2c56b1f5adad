//! Capability interface over the remote music catalog.
//!
//! The lineup core only talks to the catalog through [`CatalogClient`]. The
//! production implementation is [`crate::spotify::SpotifyClient`]; tests
//! substitute an in-memory double.

use async_trait::async_trait;

use crate::error::CatalogResult;

/// Maximum number of track URIs accepted by a single add or remove call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    pub uri: String,
    pub name: String,
    pub primary_artist_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// One page of an offset-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
        }
    }
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Searches artists, returning at most `limit` candidates in catalog order.
    async fn search_artists(&self, query: &str, limit: u32) -> CatalogResult<Vec<CatalogArtist>>;

    /// Returns the artist's top tracks in the catalog's popularity order.
    async fn artist_top_tracks(&self, artist_id: &str) -> CatalogResult<Vec<CatalogTrack>>;

    async fn current_user_playlists(
        &self,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Page<PlaylistSummary>>;

    /// Creates a playlist and returns its catalog id.
    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> CatalogResult<String>;

    async fn update_playlist_description(
        &self,
        playlist_id: &str,
        description: &str,
    ) -> CatalogResult<()>;

    /// Lists playlist entries as track URIs. Entries without a track are `None`.
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Page<Option<String>>>;

    /// Removes every occurrence of the given URIs. At most
    /// [`MAX_TRACKS_PER_REQUEST`] URIs per call.
    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> CatalogResult<()>;

    /// Appends URIs in order. At most [`MAX_TRACKS_PER_REQUEST`] URIs per call.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> CatalogResult<()>;

    async fn current_user(&self) -> CatalogResult<CatalogUser>;
}
