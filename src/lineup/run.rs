use crate::{
    catalog::CatalogClient,
    error::SyncResult,
    info,
    lineup::{
        ArtistResolver, PlaylistSynchronizer, PlaylistTarget, ResolvedArtist, SyncOutcome,
        Track, TrackCollector,
    },
    success, warning,
};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub playlist_name: String,
    pub description: String,
    pub max_tracks: usize,
}

/// What happened to one name of the artist list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistEntry {
    pub query: String,
    pub resolved: Option<ResolvedArtist>,
    pub track_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub artists: Vec<ArtistEntry>,
    pub tracks: Vec<Track>,
    pub sync: Option<SyncOutcome>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.artists.len()
    }

    /// Artists that contributed at least one track.
    pub fn contributing(&self) -> usize {
        self.artists.iter().filter(|a| a.track_count > 0).count()
    }

    pub fn not_found(&self) -> impl Iterator<Item = &str> {
        self.artists
            .iter()
            .filter(|a| a.resolved.is_none())
            .map(|a| a.query.as_str())
    }

    pub fn without_tracks(&self) -> impl Iterator<Item = &ResolvedArtist> {
        self.artists
            .iter()
            .filter(|a| a.track_count == 0)
            .filter_map(|a| a.resolved.as_ref())
    }

    pub fn renamed(&self) -> impl Iterator<Item = &ResolvedArtist> {
        self.artists
            .iter()
            .filter_map(|a| a.resolved.as_ref())
            .filter(|r| r.is_renamed())
    }
}

/// Runs the whole lineup: resolve every name, collect its top tracks and,
/// when at least one track was found, synchronize the playlist once.
///
/// Artists that cannot be resolved or have no tracks are skipped. An empty
/// aggregate never touches the catalog's playlists. Synchronization failures
/// are returned to the caller.
pub async fn run(
    catalog: &dyn CatalogClient,
    names: &[String],
    options: &RunOptions,
) -> SyncResult<RunReport> {
    let mut report = collect_lineup(catalog, names, options.max_tracks).await;

    success!("Search finished:");
    println!(
        "   - {}/{} artists found",
        report.contributing(),
        report.total()
    );
    println!("   - {} tracks in total", report.tracks.len());

    if report.tracks.is_empty() {
        return Ok(report);
    }

    info!("Synchronizing playlist {}...", options.playlist_name);
    let mut target = PlaylistTarget::new(&options.playlist_name, &options.description);
    let outcome = PlaylistSynchronizer::new(catalog)
        .sync(&mut target, &report.tracks)
        .await?;
    report.sync = Some(outcome);

    Ok(report)
}

/// Resolves each name and collects its tracks, strictly in list order.
/// Duplicate tracks across artists are kept.
pub async fn collect_lineup(
    catalog: &dyn CatalogClient,
    names: &[String],
    max_tracks: usize,
) -> RunReport {
    let resolver = ArtistResolver::new(catalog);
    let collector = TrackCollector::new(catalog, max_tracks);
    let mut report = RunReport::default();

    for (i, name) in names.iter().enumerate() {
        info!("[{}/{}] Searching: {}", i + 1, names.len(), name);

        let Some(artist) = resolver.resolve(name).await else {
            warning!("Artist not found: {}", name);
            report.artists.push(ArtistEntry {
                query: name.clone(),
                resolved: None,
                track_count: 0,
            });
            continue;
        };

        if artist.is_renamed() {
            info!("Found under the name: {}", artist.display_name);
        }

        let tracks = collector.collect(&artist).await;
        if tracks.is_empty() {
            warning!("No tracks found for: {}", name);
        } else {
            success!(
                "Found {} track(s) for: {}",
                tracks.len(),
                artist.display_name
            );
        }

        report.artists.push(ArtistEntry {
            query: name.clone(),
            track_count: tracks.len(),
            resolved: Some(artist),
        });
        report.tracks.extend(tracks);
    }

    report
}
