//! Shared HTTP plumbing.

use rankbot_error::{ConfigError, ServiceError, ServiceErrorKind, ServiceResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Build the HTTP client shared by every upstream call.
pub fn build_http_client(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rankbot/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))
}

/// Map a send failure (including timeouts) to a service error.
pub(crate) fn send_error(url: &str, e: reqwest::Error) -> ServiceError {
    error!(url, error = %e, "Request failed");
    ServiceError::new(ServiceErrorKind::Http(e.to_string()))
}

/// Check the status and decode a JSON body.
///
/// 404 becomes `NotFound`, any other non-success status becomes `Status`
/// with the body kept for the log.
pub(crate) async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ServiceResult<T> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        debug!(url, "Upstream returned 404");
        return Err(ServiceError::new(ServiceErrorKind::NotFound(url.to_string())));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(url, status = %status, body = %body, "Upstream returned error");
        return Err(ServiceError::new(ServiceErrorKind::Status {
            status: status.as_u16(),
            body,
        }));
    }

    response.json::<T>().await.map_err(|e| {
        error!(url, error = %e, "Failed to decode upstream response");
        ServiceError::new(ServiceErrorKind::Decode(e.to_string()))
    })
}
