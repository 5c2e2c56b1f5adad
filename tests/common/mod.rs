#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use lineupcli::{
    catalog::{CatalogArtist, CatalogClient, CatalogTrack, CatalogUser, Page, PlaylistSummary},
    error::{CatalogError, CatalogResult},
};

pub const USER_ID: &str = "fan";

/// Every call the fake catalog received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    TopTracks(String),
    ListPlaylists { offset: u32 },
    Create { owner: String, name: String, description: String, public: bool },
    UpdateDescription { playlist_id: String, description: String },
    ListItems { playlist_id: String, offset: u32 },
    Remove { playlist_id: String, uris: Vec<String> },
    Add { playlist_id: String, uris: Vec<String> },
    CurrentUser,
}

/// In-memory catalog that records calls and keeps playlist state, so that
/// several runs against the same instance observe each other's writes.
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<String, Vec<CatalogArtist>>,
    failing_searches: HashSet<String>,
    top_tracks: HashMap<String, Vec<CatalogTrack>>,
    failing_top_tracks: HashSet<String>,
    playlists: Mutex<Vec<PlaylistSummary>>,
    descriptions: Mutex<HashMap<String, String>>,
    items: Mutex<HashMap<String, Vec<Option<String>>>>,
    endless_playlists: bool,
    fail_add_call: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: &str, artists: &[(&str, &str)]) -> Self {
        let artists = artists
            .iter()
            .map(|(id, name)| CatalogArtist {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        self.searches.insert(query.to_string(), artists);
        self
    }

    pub fn with_failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    /// Registers `count` top tracks for the artist, `spotify:track:{id}-{n}`.
    pub fn with_top_tracks(mut self, artist_id: &str, artist_name: &str, count: usize) -> Self {
        let tracks = (1..=count)
            .map(|n| CatalogTrack {
                uri: track_uri(artist_id, n),
                name: format!("{} song {}", artist_name, n),
                primary_artist_name: Some(artist_name.to_string()),
            })
            .collect();
        self.top_tracks.insert(artist_id.to_string(), tracks);
        self
    }

    pub fn with_failing_top_tracks(mut self, artist_id: &str) -> Self {
        self.failing_top_tracks.insert(artist_id.to_string());
        self
    }

    pub fn with_playlist(self, id: &str, name: &str, uris: &[&str]) -> Self {
        self.playlists
            .lock()
            .unwrap()
            .push(PlaylistSummary {
                id: id.to_string(),
                name: name.to_string(),
            });
        self.items.lock().unwrap().insert(
            id.to_string(),
            uris.iter().map(|uri| Some(uri.to_string())).collect(),
        );
        self
    }

    /// Adds an entry without a track (e.g. a removed local file).
    pub fn with_empty_entry(self, playlist_id: &str) -> Self {
        self.items
            .lock()
            .unwrap()
            .entry(playlist_id.to_string())
            .or_default()
            .push(None);
        self
    }

    /// Adds `count` unrelated playlists to the listing.
    pub fn with_other_playlists(self, count: usize) -> Self {
        {
            let mut playlists = self.playlists.lock().unwrap();
            for n in 0..count {
                playlists.push(PlaylistSummary {
                    id: format!("other-{}", n),
                    name: format!("Other playlist {}", n),
                });
            }
        }
        self
    }

    /// Playlist listing that always claims another page follows.
    pub fn with_endless_playlists(mut self) -> Self {
        self.endless_playlists = true;
        self
    }

    /// Makes the n-th add call (1-based) fail.
    pub fn failing_add_call(mut self, n: usize) -> Self {
        self.fail_add_call = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    pub fn add_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Add { uris, .. } => Some(uris),
                _ => None,
            })
            .collect()
    }

    pub fn remove_batches(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Remove { uris, .. } => Some(uris),
                _ => None,
            })
            .collect()
    }

    pub fn playlist_uris(&self, playlist_id: &str) -> Vec<String> {
        self.items
            .lock()
            .unwrap()
            .get(playlist_id)
            .map(|items| items.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    pub fn playlist_names(&self) -> Vec<String> {
        self.playlists
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn description(&self, playlist_id: &str) -> Option<String> {
        self.descriptions.lock().unwrap().get(playlist_id).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn track_uri(artist_id: &str, n: usize) -> String {
    format!("spotify:track:{}-{}", artist_id, n)
}

fn api_error() -> CatalogError {
    CatalogError::Api {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

fn page_of<T: Clone>(all: &[T], offset: u32, limit: u32) -> Page<T> {
    let start = (offset as usize).min(all.len());
    let end = (start + limit as usize).min(all.len());
    Page {
        items: all[start..end].to_vec(),
        has_next: end < all.len(),
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn search_artists(&self, query: &str, limit: u32) -> CatalogResult<Vec<CatalogArtist>> {
        self.record(Call::Search(query.to_string()));
        if self.failing_searches.contains(query) {
            return Err(api_error());
        }

        Ok(self
            .searches
            .get(query)
            .map(|found| found.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> CatalogResult<Vec<CatalogTrack>> {
        self.record(Call::TopTracks(artist_id.to_string()));
        if self.failing_top_tracks.contains(artist_id) {
            return Err(api_error());
        }

        Ok(self.top_tracks.get(artist_id).cloned().unwrap_or_default())
    }

    async fn current_user_playlists(
        &self,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Page<PlaylistSummary>> {
        self.record(Call::ListPlaylists { offset });
        if self.endless_playlists {
            return Ok(Page {
                items: Vec::new(),
                has_next: true,
            });
        }

        Ok(page_of(&self.playlists.lock().unwrap(), offset, limit))
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> CatalogResult<String> {
        self.record(Call::Create {
            owner: owner_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            public,
        });

        let mut playlists = self.playlists.lock().unwrap();
        let id = format!("created-{}", playlists.len());
        playlists.push(PlaylistSummary {
            id: id.clone(),
            name: name.to_string(),
        });
        self.items.lock().unwrap().insert(id.clone(), Vec::new());
        self.descriptions
            .lock()
            .unwrap()
            .insert(id.clone(), description.to_string());

        Ok(id)
    }

    async fn update_playlist_description(
        &self,
        playlist_id: &str,
        description: &str,
    ) -> CatalogResult<()> {
        self.record(Call::UpdateDescription {
            playlist_id: playlist_id.to_string(),
            description: description.to_string(),
        });
        self.descriptions
            .lock()
            .unwrap()
            .insert(playlist_id.to_string(), description.to_string());
        Ok(())
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Page<Option<String>>> {
        self.record(Call::ListItems {
            playlist_id: playlist_id.to_string(),
            offset,
        });

        let items = self.items.lock().unwrap();
        let entries = items.get(playlist_id).cloned().unwrap_or_default();
        Ok(page_of(&entries, offset, limit))
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> CatalogResult<()> {
        self.record(Call::Remove {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });

        if let Some(entries) = self.items.lock().unwrap().get_mut(playlist_id) {
            entries.retain(|entry| match entry {
                Some(uri) => !uris.contains(uri),
                None => true,
            });
        }
        Ok(())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> CatalogResult<()> {
        self.record(Call::Add {
            playlist_id: playlist_id.to_string(),
            uris: uris.to_vec(),
        });

        let add_calls = self.count(|c| matches!(c, Call::Add { .. }));
        if self.fail_add_call == Some(add_calls) {
            return Err(api_error());
        }

        self.items
            .lock()
            .unwrap()
            .entry(playlist_id.to_string())
            .or_default()
            .extend(uris.iter().cloned().map(Some));
        Ok(())
    }

    async fn current_user(&self) -> CatalogResult<CatalogUser> {
        self.record(Call::CurrentUser);
        Ok(CatalogUser {
            id: USER_ID.to_string(),
            display_name: Some("Metal Fan".to_string()),
        })
    }
}
