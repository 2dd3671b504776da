//! Secrets and identity from the environment.

use rankbot_error::ConfigError;
use tracing::{debug, instrument};

const DEFAULT_RIOT_PLATFORM: &str = "na1";
const DEFAULT_RIOT_REGION: &str = "americas";

/// Everything the bot reads from environment variables.
#[derive(Clone)]
pub struct BotEnv {
    /// `TWITCH_BOT_USERNAME`
    pub bot_username: String,
    /// `TWITCH_OAUTH_TOKEN`, chat login token
    pub oauth_token: String,
    /// `TWITCH_CHANNEL`
    pub channel: String,
    /// `SUMMONER_NAME`, Riot ID game name of the tracked player
    pub summoner_name: String,
    /// `SUMMONER_TAG`, Riot ID tag line of the tracked player
    pub summoner_tag: String,
    /// `TWITCH_CLIENT_ID`
    pub client_id: String,
    /// `TWITCH_CLIENT_SECRET`
    pub client_secret: String,
    /// `RIOT_TOKEN`
    pub riot_token: String,
    /// `RIOT_PLATFORM`, defaults to `na1`
    pub riot_platform: String,
    /// `RIOT_REGION`, defaults to `americas`
    pub riot_region: String,
}

impl BotEnv {
    /// Read the process environment, after loading `.env` if present.
    ///
    /// Every required variable is checked before failing, so one error names
    /// all that are missing.
    #[instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(_) => debug!("No .env file found, relying on process environment"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read variables through `lookup`. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        let mut required = |name: &'static str| {
            value(name).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let env = Self {
            bot_username: required("TWITCH_BOT_USERNAME"),
            oauth_token: required("TWITCH_OAUTH_TOKEN"),
            channel: required("TWITCH_CHANNEL"),
            summoner_name: required("SUMMONER_NAME"),
            summoner_tag: required("SUMMONER_TAG"),
            client_id: required("TWITCH_CLIENT_ID"),
            client_secret: required("TWITCH_CLIENT_SECRET"),
            riot_token: required("RIOT_TOKEN"),
            riot_platform: value("RIOT_PLATFORM").unwrap_or_else(|| DEFAULT_RIOT_PLATFORM.to_string()),
            riot_region: value("RIOT_REGION").unwrap_or_else(|| DEFAULT_RIOT_REGION.to_string()),
        };

        if !missing.is_empty() {
            return Err(ConfigError::new(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }
        Ok(env)
    }
}

impl std::fmt::Debug for BotEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotEnv")
            .field("bot_username", &self.bot_username)
            .field("channel", &self.channel)
            .field("summoner_name", &self.summoner_name)
            .field("summoner_tag", &self.summoner_tag)
            .field("client_id", &self.client_id)
            .field("riot_platform", &self.riot_platform)
            .field("riot_region", &self.riot_region)
            .finish_non_exhaustive()
    }
}
