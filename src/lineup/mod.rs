//! # Lineup Module
//!
//! Turns a list of artist names into a playlist of their most popular tracks.
//!
//! ```text
//! artist names ──► ArtistResolver ──► TrackCollector ──► aggregated tracks
//!                                                             │
//!                                     PlaylistSynchronizer ◄──┘
//! ```
//!
//! Every component borrows the same [`CatalogClient`](crate::catalog::CatalogClient),
//! constructed once per run. Resolution and collection failures are
//! non-fatal and only drop the affected artist; synchronization failures
//! abort the run.

mod collector;
mod resolver;
mod run;
mod synchronizer;

pub use collector::{DEFAULT_MAX_TRACKS, TrackCollector};
pub use resolver::{ArtistResolver, SEARCH_LIMIT};
pub use run::{ArtistEntry, RunOptions, RunReport, collect_lineup, run};
pub use synchronizer::{
    ITEMS_PAGE_SIZE, MAX_PAGES, PLAYLISTS_PAGE_SIZE, PlaylistSynchronizer, SyncOutcome,
};

use crate::utils;

/// A catalog artist a queried name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtist {
    pub query_name: String,
    pub catalog_id: String,
    pub display_name: String,
}

impl ResolvedArtist {
    /// True when the catalog spells the artist differently from the query,
    /// ignoring case.
    pub fn is_renamed(&self) -> bool {
        !utils::names_match(&self.query_name, &self.display_name)
    }
}

/// A track selected for the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub uri: String,
    pub title: Option<String>,
    pub artist_name: Option<String>,
}

/// The playlist a run writes into. `catalog_id` is filled in once the
/// playlist has been found or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTarget {
    pub name: String,
    pub description: String,
    pub catalog_id: Option<String>,
}

impl PlaylistTarget {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            catalog_id: None,
        }
    }
}
