use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lineupcli::{
    cli::{self, SyncOptions},
    config,
    lineup::DEFAULT_MAX_TRACKS,
    management::DEFAULT_ARTISTS_FILE,
};

const DEFAULT_PLAYLIST_NAME: &str = "Lineup - Top Tracks";

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Create or refresh the playlist with the top tracks of every listed artist
    Sync(SyncArgs),

    /// Show how each listed artist resolves, without touching any playlist
    Resolve(ResolveArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncArgs {
    /// Artist list, one name per line
    #[clap(long, default_value = DEFAULT_ARTISTS_FILE)]
    file: PathBuf,

    /// Name of the playlist to create or refresh
    #[clap(long, default_value = DEFAULT_PLAYLIST_NAME)]
    name: String,

    /// Playlist description (defaults to a summary of the artist count)
    #[clap(long)]
    description: Option<String>,

    /// Maximum number of top tracks per artist
    #[clap(long, default_value_t = DEFAULT_MAX_TRACKS)]
    max_tracks: usize,

    /// Skip the confirmation prompt
    #[clap(long, short)]
    yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Artist list, one name per line
    #[clap(long, default_value = DEFAULT_ARTISTS_FILE)]
    file: PathBuf,

    /// Maximum number of top tracks per artist
    #[clap(long, default_value_t = DEFAULT_MAX_TRACKS)]
    max_tracks: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        lineupcli::error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Sync(opt) => {
            cli::sync(SyncOptions {
                file: &opt.file,
                playlist_name: opt.name,
                description: opt.description,
                max_tracks: opt.max_tracks,
                assume_yes: opt.yes,
            })
            .await
        }
        Command::Resolve(opt) => cli::resolve(&opt.file, opt.max_tracks).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
