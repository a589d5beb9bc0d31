//! Authenticated request gateway.
//!
//! Every outbound request - to the internal product service and to the
//! external catalog alike - is built here, so the bearer token from the
//! session store is attached in exactly one place. A failed token read is
//! logged and the request proceeds unauthenticated; the backend's own auth
//! errors take over from there.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// HTTP gateway with bearer-token injection.
///
/// Relative paths resolve against the configured internal base URL;
/// absolute `http(s)://` URLs pass through untouched, which is how external
/// catalog requests share the same pre-send hook.
#[derive(Clone)]
pub struct ApiGateway {
    inner: Arc<ApiGatewayInner>,
}

struct ApiGatewayInner {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiGateway {
    /// Create a new gateway.
    #[must_use]
    pub fn new(config: &ClientConfig, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(ApiGatewayInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                session,
            }),
        }
    }

    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the path cannot be resolved and
    /// `ApiError::Http` on transport failure. Non-2xx statuses are *not*
    /// flagged here; callers decide what a success looks like.
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.request(Method::GET, path)?;
        Ok(self.authorize(request).await.send().await?)
    }

    /// Issue a GET request with query parameters.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn get_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, ApiError> {
        let request = self.request(Method::GET, path)?.query(query);
        Ok(self.authorize(request).await.send().await?)
    }

    /// Issue a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self.request(Method::POST, path)?.json(body);
        Ok(self.authorize(request).await.send().await?)
    }

    /// Issue a DELETE request.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        Ok(self.authorize(request).await.send().await?)
    }

    /// Build a request for the resolved URL.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.resolve(path)?;
        Ok(self.inner.client.request(method, url))
    }

    /// Resolve a path against the base URL; absolute URLs pass through.
    fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        Ok(self.inner.base_url.join(path)?)
    }

    /// The pre-send hook: attach the bearer token if one can be read.
    ///
    /// A token-read failure is non-fatal - the request goes out without an
    /// `Authorization` header and the server rejects it if auth was needed.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.inner.session.token().await {
            Ok(Some(token)) => request.bearer_auth(token.expose_secret()),
            Ok(None) => request,
            Err(err) => {
                warn!(error = %err, "session token read failed, sending unauthenticated");
                request
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn gateway() -> ApiGateway {
        let config = ClientConfig::with_data_dir(PathBuf::from("/nonexistent"));
        let session = SessionStore::new(&config.data_dir);
        ApiGateway::new(&config, session)
    }

    #[test]
    fn test_resolve_relative_path() {
        let url = gateway().resolve("/product/96385074").unwrap();
        assert_eq!(url.as_str(), "https://api.shelfscan.app/product/96385074");
    }

    #[test]
    fn test_resolve_absolute_url_passthrough() {
        let url = gateway()
            .resolve("https://world.openfoodfacts.org/api/v2/product/96385074")
            .unwrap();
        assert_eq!(url.host_str(), Some("world.openfoodfacts.org"));
    }

    #[test]
    fn test_resolve_encodes_path() {
        let url = gateway().resolve("/product/search/oat drink").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.shelfscan.app/product/search/oat%20drink"
        );
    }
}
