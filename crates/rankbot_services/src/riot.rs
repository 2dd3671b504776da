//! Riot Games API client.

use crate::http::{decode, send_error};
use async_trait::async_trait;
use rankbot_core::{ActiveGame, LeagueEntry, MatchDetail, RiotAccount, Summoner};
use rankbot_error::{ConfigError, ServiceError, ServiceErrorKind, ServiceResult};
use rankbot_interface::{IdentityLookup, LiveGames, MatchHistory};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Maximum match ids requested per listing.
const MATCH_PAGE_SIZE: u32 = 100;

/// Which Riot routing host a path lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiotHost {
    /// Platform routing, e.g. `na1.api.riotgames.com`
    Platform,
    /// Regional routing, e.g. `americas.api.riotgames.com`
    Regional,
}

/// Riot API client.
///
/// Account and match endpoints live on the regional host; summoner, league,
/// and spectator endpoints live on the platform host.
#[derive(Clone)]
pub struct RiotClient {
    http: Client,
    api_key: String,
    platform_base: Url,
    regional_base: Url,
}

impl std::fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiotClient")
            .field("platform_base", &self.platform_base.as_str())
            .field("regional_base", &self.regional_base.as_str())
            .finish_non_exhaustive()
    }
}

impl RiotClient {
    /// Create a client for a platform (`na1`) and region (`americas`).
    pub fn new(
        http: Client,
        api_key: impl Into<String>,
        platform: &str,
        region: &str,
    ) -> Result<Self, ConfigError> {
        let platform_base = parse_base(&format!("https://{}.api.riotgames.com", platform))?;
        let regional_base = parse_base(&format!("https://{}.api.riotgames.com", region))?;
        debug!(platform, region, "Creating new Riot client");
        Ok(Self::with_bases(http, api_key, platform_base, regional_base))
    }

    /// Create a client against explicit base URLs.
    pub fn with_bases(
        http: Client,
        api_key: impl Into<String>,
        platform_base: Url,
        regional_base: Url,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            platform_base,
            regional_base,
        }
    }

    /// Build the URL for `segments` on `host`. Each segment is
    /// percent-encoded, so Riot IDs with spaces or `#` are safe.
    pub fn url(
        &self,
        host: RiotHost,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ServiceResult<Url> {
        let mut url = match host {
            RiotHost::Platform => self.platform_base.clone(),
            RiotHost::Regional => self.regional_base.clone(),
        };

        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::new(ServiceErrorKind::Http(
                    "base URL cannot carry a path".to_string(),
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        host: RiotHost,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> ServiceResult<T> {
        let url = self.url(host, segments, query)?;
        debug!(url = %url, "Sending Riot API request");

        let response = self
            .http
            .get(url.clone())
            .header("X-Riot-Token", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| send_error(url.as_str(), e))?;

        decode(url.as_str(), response).await
    }
}

fn parse_base(base: &str) -> Result<Url, ConfigError> {
    Url::parse(base).map_err(|e| ConfigError::new(format!("Invalid Riot host {}: {}", base, e)))
}

#[async_trait]
impl IdentityLookup for RiotClient {
    #[instrument(skip(self))]
    async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> ServiceResult<RiotAccount> {
        self.get(
            RiotHost::Regional,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn summoner_by_puuid(&self, puuid: &str) -> ServiceResult<Summoner> {
        self.get(
            RiotHost::Platform,
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid],
            &[],
        )
        .await
    }
}

#[async_trait]
impl MatchHistory for RiotClient {
    #[instrument(skip(self))]
    async fn match_ids(&self, puuid: &str, start: i64, end: i64) -> ServiceResult<Vec<String>> {
        self.get(
            RiotHost::Regional,
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
            &[
                ("startTime", start.to_string()),
                ("endTime", end.to_string()),
                ("count", MATCH_PAGE_SIZE.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn match_detail(&self, match_id: &str) -> ServiceResult<MatchDetail> {
        self.get(
            RiotHost::Regional,
            &["lol", "match", "v5", "matches", match_id],
            &[],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn league_entries(&self, puuid: &str) -> ServiceResult<Vec<LeagueEntry>> {
        self.get(
            RiotHost::Platform,
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
            &[],
        )
        .await
    }
}

#[async_trait]
impl LiveGames for RiotClient {
    #[instrument(skip(self))]
    async fn active_game(&self, puuid: &str) -> ServiceResult<ActiveGame> {
        self.get(
            RiotHost::Platform,
            &["lol", "spectator", "v5", "active-games", "by-summoner", puuid],
            &[],
        )
        .await
    }
}
