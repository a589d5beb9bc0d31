//! Error types shared across the data layer.

use thiserror::Error;

/// Errors that can occur when talking to the product backends.
///
/// Transport failures and non-2xx responses both land here; neither is ever
/// retried by this layer. Missing optional response fields are *not* errors
/// (the catalog clients default them instead).
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// Request construction failed before anything was sent.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A cache refresh was cancelled and no cached value was available.
    #[error("Request cancelled")]
    Cancelled,

    /// A background fetch task died without producing a result.
    #[error("Background fetch failed: {0}")]
    Task(String),
}

/// Consume a response, returning it only on a success status.
///
/// On a non-success status the body is read as text (as far as possible)
/// and carried in the error for diagnostics.
///
/// # Errors
///
/// Returns `ApiError::Api` for any non-2xx status.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}
