use std::path::{Path, PathBuf};

use crate::{error::ArtistSourceError, utils};

pub const DEFAULT_ARTISTS_FILE: &str = "artists.txt";

/// Written to a missing artist list so the user has a template to extend.
pub const EXAMPLE_ARTISTS: [&str; 5] = ["Iron Maiden", "Metallica", "Slayer", "Megadeth", "Anthrax"];

/// Ordered artist names read from a plain text file, one per line.
#[derive(Debug, Clone)]
pub struct ArtistList {
    path: PathBuf,
    names: Vec<String>,
    bootstrapped: bool,
}

impl ArtistList {
    pub fn new(path: PathBuf, names: Vec<String>) -> Self {
        Self {
            path,
            names,
            bootstrapped: false,
        }
    }

    /// Loads the artist list at `path`.
    ///
    /// Blank lines and lines starting with `#` are skipped. When the file does
    /// not exist it is created with [`EXAMPLE_ARTISTS`] and that list is
    /// returned; [`ArtistList::was_bootstrapped`] reports this case.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ArtistSourceError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Self::bootstrap(path).await;
        }

        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|source| ArtistSourceError::Read {
                path: path.display().to_string(),
                source,
            })?;

        Ok(Self::new(path, utils::parse_artist_lines(&content)))
    }

    async fn bootstrap(path: PathBuf) -> Result<Self, ArtistSourceError> {
        let bootstrap_err = |source| ArtistSourceError::Bootstrap {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent)
                .await
                .map_err(bootstrap_err)?;
        }
        async_fs::write(&path, EXAMPLE_ARTISTS.join("\n"))
            .await
            .map_err(bootstrap_err)?;

        let names = EXAMPLE_ARTISTS.iter().map(|name| name.to_string()).collect();
        Ok(Self {
            path,
            names,
            bootstrapped: true,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn was_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
