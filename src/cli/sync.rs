use std::{io::Write, path::Path};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    signal,
};

use crate::{
    catalog::CatalogUser,
    cli, config::Settings, failure, info,
    lineup::{self, RunOptions},
    management::ArtistList,
    spotify::SpotifyClient,
    success, utils, warning,
};

pub struct SyncOptions<'a> {
    pub file: &'a Path,
    pub playlist_name: String,
    pub description: Option<String>,
    pub max_tracks: usize,
    pub assume_yes: bool,
}

pub async fn sync(opts: SyncOptions<'_>) {
    let Some(settings) = cli::load_settings() else {
        return;
    };

    let Some((client, _user)) = connect(settings).await else {
        return;
    };

    let Some(artists) = load_artists(opts.file).await else {
        return;
    };

    if !opts.assume_yes {
        println!();
        info!(
            "You are about to fill the playlist '{}' with {} artist(s)",
            opts.playlist_name,
            artists.count()
        );
        println!("   Each artist contributes up to {} popular tracks", opts.max_tracks);

        let confirmed = tokio::select! {
            answer = confirm("Continue?") => answer,
            _ = signal::ctrl_c() => {
                cli::print_interrupted();
                return;
            }
        };
        if !confirmed {
            failure!("Operation cancelled");
            return;
        }
    }

    let options = RunOptions {
        playlist_name: opts.playlist_name,
        description: opts
            .description
            .unwrap_or_else(|| utils::default_description(artists.count())),
        max_tracks: opts.max_tracks,
    };

    let result = tokio::select! {
        result = lineup::run(&client, artists.names(), &options) => result,
        _ = signal::ctrl_c() => {
            cli::print_interrupted();
            return;
        }
    };

    match result {
        Ok(report) => match report.sync {
            Some(outcome) => {
                if outcome.created {
                    success!("Playlist created successfully!");
                } else {
                    success!("Playlist updated successfully!");
                }
                println!("   {}", outcome.url());
            }
            None => failure!("No tracks found. Cannot create the playlist."),
        },
        Err(e) => failure!("Error while synchronizing the playlist: {}", e),
    }
}

/// Establishes the Spotify session, reporting failures with guidance.
pub(super) async fn connect(settings: Settings) -> Option<(SpotifyClient, CatalogUser)> {
    info!("Connecting to Spotify...");

    let connected = tokio::select! {
        result = SpotifyClient::connect(settings.clone()) => result,
        _ = signal::ctrl_c() => {
            cli::print_interrupted();
            println!("   If the login seemed stuck, try again: the token is cached once it succeeds.");
            return None;
        }
    };

    match connected {
        Ok((client, user)) => {
            success!(
                "Connected as: {}",
                user.display_name.as_deref().unwrap_or(&user.id)
            );
            Some((client, user))
        }
        Err(e) => {
            failure!("Authentication failed: {}", e);
            cli::print_auth_guidance(&settings);
            None
        }
    }
}

/// Loads the artist list, reporting a bootstrapped or empty list.
pub(super) async fn load_artists(file: &Path) -> Option<ArtistList> {
    info!("Loading artist list...");

    let artists = match ArtistList::load(file).await {
        Ok(artists) => artists,
        Err(e) => {
            failure!("{}", e);
            return None;
        }
    };

    if artists.was_bootstrapped() {
        warning!(
            "{} not found. Created it with example artists, add your own!",
            artists.path().display()
        );
    }

    if artists.is_empty() {
        failure!("No artists listed in {}", artists.path().display());
        return None;
    }

    success!("{} artist(s) loaded", artists.count());
    Some(artists)
}

async fn confirm(prompt: &str) -> bool {
    print!("\n{} (y/n): ", prompt);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    match reader.read_line(&mut answer).await {
        Ok(_) => utils::is_confirmation(&answer),
        Err(_) => false,
    }
}
