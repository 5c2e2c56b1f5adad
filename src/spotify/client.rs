use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    catalog::{CatalogArtist, CatalogClient, CatalogTrack, CatalogUser, Page, PlaylistSummary},
    config::Settings,
    error::{AuthResult, CatalogError, CatalogResult},
    info,
    management::TokenManager,
    spotify::{artists, auth, playlist, user},
    success,
    types::CreatePlaylistRequest,
    warning,
};

/// Production [`CatalogClient`] backed by the Spotify Web API.
///
/// The client owns one HTTP connection pool and the session token for the
/// whole run. Expiring tokens are refreshed transparently.
pub struct SpotifyClient {
    http: Client,
    settings: Settings,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(settings: Settings, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            settings,
            tokens: Mutex::new(tokens),
        }
    }

    /// Establishes an authenticated session.
    ///
    /// Uses the cached token when there is one, otherwise runs the browser
    /// authorization flow and caches the result. The session is verified by
    /// fetching the current user, which is returned alongside the client. A
    /// cached token the API rejects triggers one fresh authorization.
    pub async fn connect(settings: Settings) -> AuthResult<(Self, CatalogUser)> {
        match TokenManager::load().await {
            Ok(tokens) => {
                info!("Found cached authentication token");
                let client = Self::new(settings.clone(), tokens);
                match client.current_user().await {
                    Ok(user) => Ok((client, user)),
                    Err(CatalogError::Unauthorized) => {
                        warning!("Cached token was rejected, authorization required");
                        Self::connect_fresh(settings).await
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Err(_) => Self::connect_fresh(settings).await,
        }
    }

    async fn connect_fresh(settings: Settings) -> AuthResult<(Self, CatalogUser)> {
        let tokens = Self::authorize(&settings).await?;
        let client = Self::new(settings, tokens);
        let user = client.current_user().await?;
        Ok((client, user))
    }

    /// Runs the browser flow and caches the obtained token.
    pub async fn authorize(settings: &Settings) -> AuthResult<TokenManager> {
        info!("Authentication required. Your browser will open the Spotify login page.");
        let token = auth::authorize(settings).await?;
        let tokens = TokenManager::new(token);
        tokens.persist().await?;
        success!("Authentication successful!");
        Ok(tokens)
    }

    async fn token(&self) -> String {
        self.tokens
            .lock()
            .await
            .get_valid_token(&self.settings)
            .await
    }

    fn api_url(&self) -> &str {
        &self.settings.api_url
    }
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn search_artists(&self, query: &str, limit: u32) -> CatalogResult<Vec<CatalogArtist>> {
        let token = self.token().await;
        let found = artists::search_artists(&self.http, self.api_url(), &token, query, limit).await?;

        Ok(found
            .into_iter()
            .map(|a| CatalogArtist {
                id: a.id,
                name: a.name,
            })
            .collect())
    }

    async fn artist_top_tracks(&self, artist_id: &str) -> CatalogResult<Vec<CatalogTrack>> {
        let token = self.token().await;
        let tracks = artists::get_top_tracks(
            &self.http,
            self.api_url(),
            &token,
            artist_id,
            &self.settings.market,
        )
        .await?;

        Ok(tracks
            .into_iter()
            .map(|t| CatalogTrack {
                uri: t.uri,
                name: t.name,
                primary_artist_name: t.artists.into_iter().next().map(|a| a.name),
            })
            .collect())
    }

    async fn current_user_playlists(
        &self,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Page<PlaylistSummary>> {
        let token = self.token().await;
        let res =
            playlist::get_user_playlists(&self.http, self.api_url(), &token, offset, limit).await?;

        Ok(Page {
            items: res
                .items
                .into_iter()
                .map(|p| PlaylistSummary {
                    id: p.id,
                    name: p.name,
                })
                .collect(),
            has_next: res.next.is_some(),
        })
    }

    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> CatalogResult<String> {
        let token = self.token().await;
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
            collaborative: false,
        };
        let created =
            playlist::create(&self.http, self.api_url(), &token, owner_id, &request).await?;

        Ok(created.id)
    }

    async fn update_playlist_description(
        &self,
        playlist_id: &str,
        description: &str,
    ) -> CatalogResult<()> {
        let token = self.token().await;
        playlist::change_description(&self.http, self.api_url(), &token, playlist_id, description)
            .await
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Page<Option<String>>> {
        let token = self.token().await;
        let res =
            playlist::get_items(&self.http, self.api_url(), &token, playlist_id, offset, limit)
                .await?;

        Ok(Page {
            items: res
                .items
                .into_iter()
                .map(|item| item.track.and_then(|t| t.uri))
                .collect(),
            has_next: res.next.is_some(),
        })
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> CatalogResult<()> {
        let token = self.token().await;
        playlist::remove_tracks(&self.http, self.api_url(), &token, playlist_id, uris).await?;
        Ok(())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> CatalogResult<()> {
        let token = self.token().await;
        playlist::add_tracks(&self.http, self.api_url(), &token, playlist_id, uris).await?;
        Ok(())
    }

    async fn current_user(&self) -> CatalogResult<CatalogUser> {
        let token = self.token().await;
        let me = user::get_current_user(&self.http, self.api_url(), &token).await?;

        Ok(CatalogUser {
            id: me.id,
            display_name: me.display_name,
        })
    }
}
