//! Twitch Helix API client.

use crate::CredentialHandle;
use crate::http::{decode, send_error};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rankbot_core::LiveStream;
use rankbot_error::ServiceResult;
use rankbot_interface::StreamDirectory;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

const HELIX_STREAMS_URL: &str = "https://api.twitch.tv/helix/streams";

#[derive(Debug, Deserialize)]
struct StreamsResponse {
    #[serde(default)]
    data: Vec<StreamData>,
}

#[derive(Debug, Deserialize)]
struct StreamData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    game_name: String,
    started_at: DateTime<Utc>,
}

impl From<StreamData> for LiveStream {
    fn from(data: StreamData) -> Self {
        Self {
            title: data.title,
            game_name: data.game_name,
            started_at: data.started_at,
        }
    }
}

/// Helix client authenticated with the shared app credential.
#[derive(Debug, Clone)]
pub struct HelixClient {
    http: Client,
    client_id: String,
    credentials: CredentialHandle,
    streams_url: String,
}

impl HelixClient {
    /// Create a client for an application's client id.
    pub fn new(http: Client, client_id: impl Into<String>, credentials: CredentialHandle) -> Self {
        Self {
            http,
            client_id: client_id.into(),
            credentials,
            streams_url: HELIX_STREAMS_URL.to_string(),
        }
    }

    /// Override the streams endpoint.
    pub fn with_streams_url(mut self, streams_url: impl Into<String>) -> Self {
        self.streams_url = streams_url.into();
        self
    }
}

#[async_trait]
impl StreamDirectory for HelixClient {
    #[instrument(skip(self))]
    async fn live_stream(&self, channel: &str) -> ServiceResult<Option<LiveStream>> {
        let credential = self.credentials.require()?;
        debug!("Querying Helix stream state");

        let response = self
            .http
            .get(&self.streams_url)
            .query(&[("user_login", channel)])
            .header("Client-Id", &self.client_id)
            .bearer_auth(credential.access_token())
            .send()
            .await
            .map_err(|e| send_error(&self.streams_url, e))?;

        let streams: StreamsResponse = decode(&self.streams_url, response).await?;
        Ok(streams.data.into_iter().next().map(LiveStream::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_payload_decodes() {
        let payload: StreamsResponse = serde_json::from_str(
            r#"{"data": [{"user_name": "chan", "title": "Climbing", "game_name": "League of Legends",
                          "started_at": "2024-05-01T18:30:00Z", "viewer_count": 10}],
                "pagination": {}}"#,
        )
        .unwrap();

        let stream = LiveStream::from(payload.data.into_iter().next().unwrap());
        assert_eq!(stream.title, "Climbing");
        assert_eq!(stream.started_at.timestamp(), 1_714_588_200);
    }

    #[test]
    fn test_offline_payload_is_empty() {
        let payload: StreamsResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(payload.data.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_sending() {
        let refresher = crate::CredentialRefresher::new(
            std::sync::Arc::new(NeverSource),
            crate::DEFAULT_REFRESH_INTERVAL,
        );
        let client = HelixClient::new(Client::new(), "id", refresher.handle())
            .with_streams_url("http://127.0.0.1:9/unreachable");

        let err = client.live_stream("chan").await.unwrap_err();
        assert!(matches!(
            err.kind,
            rankbot_error::ServiceErrorKind::CredentialUnavailable(_)
        ));
    }

    struct NeverSource;

    #[async_trait]
    impl rankbot_interface::CredentialSource for NeverSource {
        async fn fetch(&self) -> ServiceResult<rankbot_core::Credential> {
            Err(rankbot_error::ServiceError::new(
                rankbot_error::ServiceErrorKind::Http("unused".to_string()),
            ))
        }
    }
}
