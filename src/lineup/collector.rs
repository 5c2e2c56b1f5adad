use crate::{
    catalog::CatalogClient,
    lineup::{ResolvedArtist, Track},
    warning,
};

pub const DEFAULT_MAX_TRACKS: usize = 10;

/// Fetches the most popular tracks of resolved artists.
pub struct TrackCollector<'a> {
    catalog: &'a dyn CatalogClient,
    max_tracks: usize,
}

impl<'a> TrackCollector<'a> {
    pub fn new(catalog: &'a dyn CatalogClient, max_tracks: usize) -> Self {
        Self {
            catalog,
            max_tracks,
        }
    }

    pub fn max_tracks(&self) -> usize {
        self.max_tracks
    }

    /// Returns up to `max_tracks` top tracks in catalog order.
    ///
    /// Lookup failures are reported and collapse into an empty list.
    pub async fn collect(&self, artist: &ResolvedArtist) -> Vec<Track> {
        let tracks = match self.catalog.artist_top_tracks(&artist.catalog_id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!(
                    "Failed to fetch top tracks for {}: {}",
                    artist.display_name,
                    e
                );
                return Vec::new();
            }
        };

        tracks
            .into_iter()
            .take(self.max_tracks)
            .map(|t| Track {
                uri: t.uri,
                title: Some(t.name),
                artist_name: t.primary_artist_name,
            })
            .collect()
    }
}
