use crate::{cli, spotify::SpotifyClient};

pub async fn auth() {
    let Some(settings) = cli::load_settings() else {
        return;
    };

    if let Err(e) = SpotifyClient::authorize(&settings).await {
        crate::failure!("Authentication failed: {}", e);
        cli::print_auth_guidance(&settings);
    }
}
