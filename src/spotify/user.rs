use reqwest::Client;

use crate::{error::CatalogResult, spotify::check_response, types::CurrentUserResponse};

/// Retrieves the profile of the user the token was issued for.
pub async fn get_current_user(
    client: &Client,
    api_url: &str,
    token: &str,
) -> CatalogResult<CurrentUserResponse> {
    let api_url = format!("{uri}/me", uri = api_url);

    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let json = check_response(response)
        .await?
        .json::<CurrentUserResponse>()
        .await?;

    Ok(json)
}
