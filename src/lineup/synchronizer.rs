use crate::{
    catalog::{CatalogClient, MAX_TRACKS_PER_REQUEST},
    error::{CatalogError, CatalogResult, SyncError, SyncResult, SyncStep},
    info,
    lineup::{PlaylistTarget, Track},
    success, utils,
};

pub const PLAYLISTS_PAGE_SIZE: u32 = 50;
pub const ITEMS_PAGE_SIZE: u32 = 100;

/// Upper bound on pages read from a single listing.
pub const MAX_PAGES: usize = 1000;

/// What a synchronization did to the remote playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub playlist_id: String,
    pub created: bool,
    pub removed: usize,
    pub added: usize,
    pub batches: usize,
}

impl SyncOutcome {
    pub fn url(&self) -> String {
        utils::playlist_url(&self.playlist_id)
    }
}

/// Finds or creates a playlist by name and replaces its contents.
pub struct PlaylistSynchronizer<'a> {
    catalog: &'a dyn CatalogClient,
}

impl<'a> PlaylistSynchronizer<'a> {
    pub fn new(catalog: &'a dyn CatalogClient) -> Self {
        Self { catalog }
    }

    /// Makes the playlist named `target.name` hold exactly `tracks`.
    ///
    /// An existing playlist (first exact, case-sensitive name match in
    /// listing order) is emptied and gets the new description; otherwise a
    /// public playlist is created. The tracks are then appended in order.
    /// Nothing is rolled back on failure: batches already sent stay applied.
    pub async fn sync(
        &self,
        target: &mut PlaylistTarget,
        tracks: &[Track],
    ) -> SyncResult<SyncOutcome> {
        let existing = self
            .find_playlist(&target.name)
            .await
            .map_err(|e| SyncError::new(SyncStep::Find, e))?;

        let (playlist_id, created, removed) = match existing {
            Some(playlist_id) => {
                info!("Found existing playlist: {}", target.name);
                let removed = self
                    .clear_playlist(&playlist_id)
                    .await
                    .map_err(|e| SyncError::new(SyncStep::Clear, e))?;
                if removed > 0 {
                    success!("Removed {} track(s) from the existing playlist", removed);
                }

                self.catalog
                    .update_playlist_description(&playlist_id, &target.description)
                    .await
                    .map_err(|e| SyncError::new(SyncStep::Update, e))?;

                (playlist_id, false, removed)
            }
            None => {
                let playlist_id = self
                    .create_playlist(target)
                    .await
                    .map_err(|e| SyncError::new(SyncStep::Create, e))?;
                success!("Created playlist: {}", target.name);

                (playlist_id, true, 0)
            }
        };
        target.catalog_id = Some(playlist_id.clone());

        let batches = self
            .append_tracks(&playlist_id, tracks)
            .await
            .map_err(|e| SyncError::new(SyncStep::Append, e))?;

        Ok(SyncOutcome {
            playlist_id,
            created,
            removed,
            added: tracks.len(),
            batches,
        })
    }

    /// Returns the id of the first playlist of the current user named exactly
    /// `name`. Pages are followed until the catalog reports the last one.
    pub async fn find_playlist(&self, name: &str) -> CatalogResult<Option<String>> {
        let mut offset = 0;

        for _ in 0..MAX_PAGES {
            let page = self
                .catalog
                .current_user_playlists(offset, PLAYLISTS_PAGE_SIZE)
                .await?;

            if let Some(playlist) = page.items.iter().find(|p| p.name == name) {
                return Ok(Some(playlist.id.clone()));
            }

            if !page.has_next {
                return Ok(None);
            }
            offset += PLAYLISTS_PAGE_SIZE;
        }

        Err(CatalogError::PaginationOverflow { pages: MAX_PAGES })
    }

    /// Reads the URIs of every track currently in the playlist, in order.
    /// Entries without a track (removed or unavailable items) are skipped.
    pub async fn playlist_track_uris(&self, playlist_id: &str) -> CatalogResult<Vec<String>> {
        let mut uris = Vec::new();
        let mut offset = 0;

        for _ in 0..MAX_PAGES {
            let page = self
                .catalog
                .playlist_items(playlist_id, offset, ITEMS_PAGE_SIZE)
                .await?;

            if page.items.is_empty() {
                return Ok(uris);
            }
            uris.extend(page.items.into_iter().flatten());

            if !page.has_next {
                return Ok(uris);
            }
            offset += ITEMS_PAGE_SIZE;
        }

        Err(CatalogError::PaginationOverflow { pages: MAX_PAGES })
    }

    /// Removes every track from the playlist and returns how many were found.
    /// No remove call is made for an already empty playlist.
    pub async fn clear_playlist(&self, playlist_id: &str) -> CatalogResult<usize> {
        let uris = self.playlist_track_uris(playlist_id).await?;

        for batch in uris.chunks(MAX_TRACKS_PER_REQUEST) {
            self.catalog.remove_tracks(playlist_id, batch).await?;
        }

        Ok(uris.len())
    }

    /// Appends tracks in order, one catalog call per batch of at most
    /// [`MAX_TRACKS_PER_REQUEST`]. Returns the number of batches sent.
    pub async fn append_tracks(&self, playlist_id: &str, tracks: &[Track]) -> CatalogResult<usize> {
        let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
        let mut batches = 0;

        for batch in uris.chunks(MAX_TRACKS_PER_REQUEST) {
            self.catalog.add_tracks(playlist_id, batch).await?;
            batches += 1;
            success!("Added {} track(s) to the playlist", batch.len());
        }

        Ok(batches)
    }

    async fn create_playlist(&self, target: &PlaylistTarget) -> CatalogResult<String> {
        let owner = self.catalog.current_user().await?;
        self.catalog
            .create_playlist(&owner.id, &target.name, &target.description, true)
            .await
    }
}
