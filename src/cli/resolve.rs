use std::path::Path;

use tabled::Table;
use tokio::signal;

use crate::{
    cli::{
        self,
        sync::{connect, load_artists},
    },
    lineup::{ArtistResolver, TrackCollector},
    success,
    types::ResolutionTableRow,
    utils,
};

/// Resolves every listed artist and prints what the playlist would contain,
/// without reading or writing any playlist.
pub async fn resolve(file: &Path, max_tracks: usize) {
    let Some(settings) = cli::load_settings() else {
        return;
    };

    let Some((client, _user)) = connect(settings).await else {
        return;
    };

    let Some(artists) = load_artists(file).await else {
        return;
    };

    let resolver = ArtistResolver::new(&client);
    let collector = TrackCollector::new(&client, max_tracks);

    let pb = utils::spinner("Resolving artists...");
    let mut rows: Vec<ResolutionTableRow> = Vec::with_capacity(artists.count());
    let mut total_tracks = 0;
    let mut contributing = 0;

    for (i, name) in artists.names().iter().enumerate() {
        pb.set_message(format!(
            "Resolving {} [{}/{}]...",
            name,
            i + 1,
            artists.count()
        ));

        let step = async {
            match resolver.resolve(name).await {
                Some(artist) => {
                    let tracks = collector.collect(&artist).await;
                    (Some(artist), tracks.len())
                }
                None => (None, 0),
            }
        };

        let (artist, track_count) = tokio::select! {
            outcome = step => outcome,
            _ = signal::ctrl_c() => {
                pb.finish_and_clear();
                cli::print_interrupted();
                return;
            }
        };

        total_tracks += track_count;
        if track_count > 0 {
            contributing += 1;
        }
        rows.push(ResolutionTableRow {
            query: name.clone(),
            catalog_name: artist
                .map(|a| a.display_name)
                .unwrap_or_else(|| "-".to_string()),
            tracks: track_count.to_string(),
        });
    }
    pb.finish_and_clear();

    println!("{}", Table::new(rows));
    success!(
        "{}/{} artist(s) would contribute {} track(s)",
        contributing,
        artists.count(),
        total_tracks
    );
}
