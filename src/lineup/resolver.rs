use crate::{
    catalog::{CatalogArtist, CatalogClient},
    lineup::ResolvedArtist,
    utils, warning,
};

/// Number of candidates requested per search query.
pub const SEARCH_LIMIT: u32 = 5;

/// Maps free-text artist names to catalog artists.
pub struct ArtistResolver<'a> {
    catalog: &'a dyn CatalogClient,
}

impl<'a> ArtistResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogClient) -> Self {
        Self { catalog }
    }

    /// Resolves `raw_name` to at most one catalog artist.
    ///
    /// Two queries are tried in order, an `artist:`-scoped one and a plain
    /// one, stopping at the first that returns candidates. Among those the
    /// first case-insensitive exact name match wins, else the first
    /// candidate. A failing search call is treated like an empty result, so
    /// "not found" and "API error" both end in `None`.
    ///
    /// The name is only trimmed; characters with a meaning in the search
    /// syntax are passed through unchanged.
    pub async fn resolve(&self, raw_name: &str) -> Option<ResolvedArtist> {
        let name = raw_name.trim();
        if name.is_empty() {
            return None;
        }

        for query in search_queries(name) {
            let candidates = match self.catalog.search_artists(&query, SEARCH_LIMIT).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warning!("Search '{}' failed: {}", query, e);
                    continue;
                }
            };

            if let Some(artist) = pick_candidate(name, &candidates) {
                return Some(ResolvedArtist {
                    query_name: name.to_string(),
                    catalog_id: artist.id.clone(),
                    display_name: artist.name.clone(),
                });
            }
        }

        None
    }
}

fn search_queries(name: &str) -> [String; 2] {
    [format!("artist:{}", name), name.to_string()]
}

/// Picks the exact (case-insensitive) name match, else the first candidate.
/// Candidates without an id are never picked.
fn pick_candidate<'c>(name: &str, candidates: &'c [CatalogArtist]) -> Option<&'c CatalogArtist> {
    let mut usable = candidates.iter().filter(|c| !c.id.is_empty()).peekable();
    let first = usable.peek().copied()?;

    Some(
        usable
            .find(|c| utils::names_match(&c.name, name))
            .unwrap_or(first),
    )
}
