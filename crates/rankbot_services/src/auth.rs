//! Twitch client-credentials grant.

use crate::http::{decode, send_error};
use async_trait::async_trait;
use rankbot_core::Credential;
use rankbot_error::ServiceResult;
use rankbot_interface::CredentialSource;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const TWITCH_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

#[derive(Debug, Deserialize)]
struct AppTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

/// Issues Twitch app access tokens for Helix calls.
#[derive(Clone)]
pub struct TwitchAuth {
    http: Client,
    client_id: String,
    client_secret: String,
    token_url: String,
}

impl TwitchAuth {
    /// Create an issuer for an application's client id and secret.
    pub fn new(http: Client, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: TWITCH_TOKEN_URL.to_string(),
        }
    }

    /// Override the token endpoint.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }
}

impl std::fmt::Debug for TwitchAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitchAuth")
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialSource for TwitchAuth {
    #[instrument(skip(self))]
    async fn fetch(&self) -> ServiceResult<Credential> {
        debug!("Requesting Twitch app token");
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| send_error(&self.token_url, e))?;

        let token: AppTokenResponse = decode(&self.token_url, response).await?;
        Ok(Credential::new(
            token.access_token,
            Duration::from_secs(token.expires_in),
        ))
    }
}
