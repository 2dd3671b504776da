//! HTTP clients for the upstream services and the credential refresher.
//!
//! - [`RiotClient`]: account, summoner, league, match, and spectator data
//! - [`HelixClient`]: Twitch stream state, authenticated with the shared
//!   app credential
//! - [`TwitchAuth`]: client-credentials grant issuing that app credential
//! - [`CredentialRefresher`]: keeps the app credential fresh in the
//!   background and hands out [`CredentialHandle`] snapshots
//!
//! Every client uses a shared `reqwest::Client` with a fixed timeout built by
//! [`build_http_client`]; a timeout surfaces as a service error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod helix;
mod http;
mod refresher;
mod riot;

pub use auth::TwitchAuth;
pub use helix::HelixClient;
pub use http::build_http_client;
pub use refresher::{
    CredentialHandle, CredentialRefresher, DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL,
};
pub use riot::{RiotClient, RiotHost};
