//! The two seams between request building and the network.
//!
//! [`HttpClient`] executes a request. [`LogoApi`] adds the service base URL
//! and is what the entity clients are generic over.
//!
//! Implement [`LogoApi`] directly to plug a custom transport or a test double
//! under the entity clients.

use std::future::Future;

use bytes::Bytes;
use url::Url;

use crate::{Request, Response, Result};

/// A transport.
pub trait HttpClient: Send + Sync {
    /// Send `request` and buffer the response.
    ///
    /// Non-2xx statuses are not errors at this level.
    ///
    /// # Errors
    ///
    /// Connection, TLS and timeout failures.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// A client for one Logo Objects service instance.
///
/// Combines HTTP execution with the service base URL
/// (e.g. `https://erp.example.com/api/v1/`). Resource paths such as
/// `SalesOrders/42` are resolved relative to it.
pub trait LogoApi: Clone + Send + Sync {
    /// Send `request` through the client's middleware stack.
    ///
    /// # Errors
    ///
    /// Connection, TLS and timeout failures.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;

    /// Get the base URL for this client.
    ///
    /// Always ends with `/` so relative joins keep the base path.
    fn base_url(&self) -> &Url;

    /// Resolve a resource path (with optional query) against the base URL.
    ///
    /// A leading `/` is ignored so `"/Items"` and `"Items"` resolve alike.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if the joined URL is malformed.
    fn resolve(&self, path_and_query: &str) -> Result<Url> {
        let relative = path_and_query.trim_start_matches('/');
        Ok(self.base_url().join(relative)?)
    }
}

/// Normalize a base URL so it ends with `/`.
///
/// `Url::join` replaces the last segment of a base without a trailing slash,
/// which would drop `/v1` from `https://erp.example.com/api/v1`.
///
/// ```
/// use logo_objects_core::normalize_base_url;
///
/// let base = normalize_base_url("https://erp.example.com/api/v1".parse().expect("url"));
/// assert_eq!(base.as_str(), "https://erp.example.com/api/v1/");
/// ```
#[must_use]
pub fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
