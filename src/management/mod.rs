mod artists;
mod auth;

pub use artists::ArtistList;
pub use artists::DEFAULT_ARTISTS_FILE;
pub use artists::EXAMPLE_ARTISTS;
pub use auth::TokenManager;
