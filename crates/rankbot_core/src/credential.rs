//! Bearer credential shared by outbound Helix calls.

use std::time::{Duration, Instant};

/// A bearer token and when it was issued.
///
/// Held behind an `Arc` and replaced as a whole value, never mutated in
/// place. `Debug` redacts the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    issued_at: Instant,
    expires_in: Duration,
}

impl Credential {
    /// Wrap a freshly issued token.
    pub fn new(access_token: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            access_token: access_token.into(),
            issued_at: Instant::now(),
            expires_in,
        }
    }

    /// The raw token for the `Authorization` header.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// When the token was obtained.
    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    /// Lifetime reported by the issuer.
    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Whether the issuer-reported lifetime has elapsed.
    pub fn is_expired(&self) -> bool {
        self.issued_at.elapsed() >= self.expires_in
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
