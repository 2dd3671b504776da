//! Background refresh of the shared app credential.

use rankbot_core::Credential;
use rankbot_error::{ServiceError, ServiceErrorKind, ServiceResult};
use rankbot_interface::CredentialSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{error, info, instrument, warn};

/// Refresh period, well inside the lifetime of a Twitch app token.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(50 * 60);

/// Shortest refresh period; shorter requests are raised to it.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Read side of the shared credential.
///
/// Cloning is cheap. Each read takes a snapshot of the whole credential, so
/// a reader never sees a half-replaced value and never waits on a fetch.
#[derive(Debug, Clone)]
pub struct CredentialHandle {
    rx: watch::Receiver<Option<Arc<Credential>>>,
}

impl CredentialHandle {
    /// A handle over a fixed credential, for callers that do not refresh.
    pub fn fixed(credential: Credential) -> Self {
        let (_tx, rx) = watch::channel(Some(Arc::new(credential)));
        Self { rx }
    }

    /// The current credential, if one has been obtained.
    pub fn current(&self) -> Option<Arc<Credential>> {
        self.rx.borrow().clone()
    }

    /// The current credential, or a service error before the first
    /// successful fetch.
    pub fn require(&self) -> ServiceResult<Arc<Credential>> {
        self.current().ok_or_else(|| {
            ServiceError::new(ServiceErrorKind::CredentialUnavailable(
                "app token has not been obtained".to_string(),
            ))
        })
    }
}

/// Single writer of the shared credential.
///
/// States: uninitialized (no credential yet), then valid, then valid with a
/// newer token after each successful refresh. A failed fetch keeps the
/// previous credential.
///
/// # Example
///
/// ```rust,ignore
/// let refresher = CredentialRefresher::new(Arc::new(auth), DEFAULT_REFRESH_INTERVAL);
/// let (handle, task) = refresher.start().await;
/// let token = handle.require()?;
/// ```
pub struct CredentialRefresher {
    source: Arc<dyn CredentialSource>,
    interval: Duration,
    tx: watch::Sender<Option<Arc<Credential>>>,
}

impl CredentialRefresher {
    /// Create an uninitialized refresher. An interval below
    /// [`MIN_REFRESH_INTERVAL`] is raised to it.
    pub fn new(source: Arc<dyn CredentialSource>, interval: Duration) -> Self {
        let interval = if interval < MIN_REFRESH_INTERVAL {
            warn!(
                requested_ms = interval.as_millis() as u64,
                "Refresh interval too short, using minimum"
            );
            MIN_REFRESH_INTERVAL
        } else {
            interval
        };
        let (tx, _rx) = watch::channel(None);
        Self {
            source,
            interval,
            tx,
        }
    }

    /// Period between background refreshes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// A new read handle.
    pub fn handle(&self) -> CredentialHandle {
        CredentialHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Fetch once and publish on success. Returns whether a new credential
    /// was published.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        match self.source.fetch().await {
            Ok(credential) => {
                info!(
                    expires_in_secs = credential.expires_in().as_secs(),
                    "App token refreshed"
                );
                self.tx.send_replace(Some(Arc::new(credential)));
                true
            }
            Err(e) => {
                if self.tx.borrow().is_some() {
                    warn!(error = %e, "App token refresh failed, keeping previous token");
                } else {
                    error!(error = %e, "App token refresh failed, no token available");
                }
                false
            }
        }
    }

    /// Perform the initial fetch, then keep refreshing on a background task.
    ///
    /// The initial fetch completes (or fails) before this returns, so callers
    /// can start dispatching right after. The task ends once every handle has
    /// been dropped.
    pub async fn start(self) -> (CredentialHandle, JoinHandle<()>) {
        self.refresh().await;
        let handle = self.handle();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            loop {
                ticker.tick().await;
                if self.tx.is_closed() {
                    info!("All credential handles dropped, stopping refresher");
                    break;
                }
                self.refresh().await;
            }
        });

        (handle, task)
    }
}
