//! Wiring and the startup sequence.

use crate::{BotEnv, BotSettings};
use rankbot_cache::{IdentityCache, LookupTable, SessionStatCache};
use rankbot_error::RankbotResult;
use rankbot_services::{
    CredentialRefresher, HelixClient, RiotClient, TwitchAuth, build_http_client,
};
use rankbot_social::irc::{self, IrcLogin};
use rankbot_social::{CommandRegistry, Dispatcher, StatOperations};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Commands file to load: the command-line override, else the tunable.
pub fn commands_path(override_path: Option<&Path>, settings: &BotSettings) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.paths.commands.clone())
}

/// Run the bot until the chat connection ends.
///
/// Order matters: everything that can be validated locally (commands, the
/// tracked player's identity, the app token) is settled before connecting,
/// so a misconfigured bot never joins the channel.
#[instrument(skip_all, fields(channel = %env.channel))]
pub async fn run(settings: BotSettings, env: BotEnv, commands: &Path) -> RankbotResult<()> {
    let registry = CommandRegistry::load(commands)?;

    let http = build_http_client(settings.http_timeout())?;
    let riot = Arc::new(RiotClient::new(
        http.clone(),
        &env.riot_token,
        &env.riot_platform,
        &env.riot_region,
    )?);

    let identities = IdentityCache::new(&settings.paths.players, riot.clone());
    let puuid = identities
        .resolve(&env.summoner_name, &env.summoner_tag)
        .await?;
    info!(summoner = %env.summoner_name, tag = %env.summoner_tag, "Tracked player resolved");

    let auth = TwitchAuth::new(http.clone(), &env.client_id, &env.client_secret);
    let refresher = CredentialRefresher::new(Arc::new(auth), settings.refresh_interval());
    let (credentials, refresh_task) = refresher.start().await;
    if credentials.current().is_none() {
        warn!("Starting without an app token; stream commands will fail until a refresh succeeds");
    }

    let champions = LookupTable::new(&settings.paths.champions);
    match champions.load() {
        Ok(count) => info!(champions = count, "Champion table loaded"),
        Err(e) => warn!(error = %e, "Champion table unavailable, bans will show ids"),
    }

    let helix = HelixClient::new(http, &env.client_id, credentials);
    let sessions = SessionStatCache::new(riot.clone());
    let operations = StatOperations::new(
        env.channel.clone(),
        puuid,
        Arc::new(helix),
        riot.clone(),
        riot,
        Arc::new(sessions),
        Arc::new(champions),
    );

    let login = IrcLogin::new(&env.bot_username, &env.oauth_token, &env.channel);
    let connection = irc::connect(&settings.irc.address, &login, settings.irc.max_frame_len).await?;

    let mut dispatcher = Dispatcher::new(connection, login.channel(), registry, Arc::new(operations));
    let result = dispatcher.run().await;
    refresh_task.abort();
    Ok(result?)
}
