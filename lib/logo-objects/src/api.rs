//! The Logo Objects service client.
//!
//! [`LogoClient`] binds an [`HttpClient`] to the service base URL and is the
//! single request routine every entity client goes through.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::entities::{Arps, Contacts, ItemSlips, Items, SalesOrders};
use crate::middleware::SharedToken;
use crate::resource::{Resource, ResourceClient};
use crate::{
    ClientConfig, Error, HttpClient, HyperClient, LogoApi, Method, PathTemplate, Request,
    Response, Result, normalize_base_url,
};

/// Client for one Logo Objects service instance.
///
/// # Example
///
/// ```ignore
/// use logo_objects::{LogoClient, QueryOptions};
///
/// let client = LogoClient::builder("https://erp.example.com/api/v1")
///     .with_logging()
///     .with_retry(3)
///     .build()?;
/// client.login(&credentials).await?;
///
/// let orders = client.sales_orders().get_all(&QueryOptions::new().limit(10)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct LogoClient<C = HyperClient> {
    client: C,
    base_url: Url,
    token: Option<SharedToken>,
}

impl<C> LogoClient<C> {
    /// Wrap an existing transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        Ok(Self::with_url(client, base_url))
    }

    /// Wrap an existing transport with a pre-parsed URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
            token: None,
        }
    }

    /// Attach the token slot the transport's [`BearerAuthLayer`] reads from,
    /// so [`login`](Self::login) can install the token it obtains.
    ///
    /// [`BearerAuthLayer`]: crate::middleware::BearerAuthLayer
    #[must_use]
    pub fn with_token(mut self, token: SharedToken) -> Self {
        self.token = Some(token);
        self
    }

    /// The token slot, if the client authenticates with a bearer token.
    #[must_use]
    pub const fn token(&self) -> Option<&SharedToken> {
        self.token.as_ref()
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.client
    }
}

impl LogoClient<HyperClient> {
    /// Create a builder for a hyper-backed client.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> LogoClientBuilder {
        LogoClientBuilder::new(base_url)
    }
}

impl<C> LogoApi for LogoClient<C>
where
    C: HttpClient + Clone + Send + Sync,
{
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send {
        self.client.execute(request)
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl<C> LogoClient<C>
where
    C: HttpClient + Clone + Send + Sync,
{
    /// Send `method path_and_query` with an optional JSON body and decode the
    /// JSON answer. An empty answer decodes as `null`.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] for a non-2xx status, with the vendor payload kept
    /// - transport and decoding errors
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        dispatch(self, method, path_and_query, None, body).await
    }

    /// Typed client for any [`Resource`].
    #[must_use]
    pub const fn resource<R: Resource>(&self) -> ResourceClient<'_, Self, R> {
        ResourceClient::new(self)
    }

    /// Customers and vendors (`Arps`).
    #[must_use]
    pub const fn arps(&self) -> ResourceClient<'_, Self, Arps> {
        self.resource()
    }

    /// Contacts.
    #[must_use]
    pub const fn contacts(&self) -> ResourceClient<'_, Self, Contacts> {
        self.resource()
    }

    /// Material cards.
    #[must_use]
    pub const fn items(&self) -> ResourceClient<'_, Self, Items> {
        self.resource()
    }

    /// Material slips.
    #[must_use]
    pub const fn item_slips(&self) -> ResourceClient<'_, Self, ItemSlips> {
        self.resource()
    }

    /// Sales orders.
    #[must_use]
    pub const fn sales_orders(&self) -> ResourceClient<'_, Self, SalesOrders> {
        self.resource()
    }
}

/// Resolve, send and decode one call. Shared by [`LogoClient::send`] and the
/// resource clients so every request gets the same headers and error mapping.
pub(crate) async fn dispatch<A, T>(
    api: &A,
    method: Method,
    path_and_query: &str,
    route: Option<(&'static str, PathTemplate)>,
    body: Option<&serde_json::Value>,
) -> Result<T>
where
    A: LogoApi,
    T: DeserializeOwned,
{
    let url = api.resolve(path_and_query)?;
    let mut builder = Request::builder(method, url).accept_json();
    if let Some((resource, template)) = route {
        builder = builder.route(resource, template);
    }
    if let Some(body) = body {
        builder = builder.json(body)?;
    }

    let response = api.execute(builder.build()).await?.error_for_status()?;
    response.json_or_null()
}

/// Builder for a hyper-backed [`LogoClient`].
///
/// Installs, outermost first: logging, retry, bearer auth.
#[derive(Debug)]
pub struct LogoClientBuilder {
    base_url: String,
    config: ClientConfig,
    token: SharedToken,
    logging: Option<crate::middleware::LogLevel>,
    max_retries: Option<u32>,
}

impl LogoClientBuilder {
    /// Start a builder for the given service base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            config: ClientConfig::default(),
            token: SharedToken::new(),
            logging: None,
            max_retries: None,
        }
    }

    /// Replace the transport configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Start with an access token obtained elsewhere.
    #[must_use]
    pub fn access_token(self, token: impl Into<String>) -> Self {
        self.token.set(token);
        self
    }

    /// Share an existing token slot.
    #[must_use]
    pub fn shared_token(mut self, token: SharedToken) -> Self {
        self.token = token;
        self
    }

    /// Log requests at info level.
    #[must_use]
    pub const fn with_logging(mut self) -> Self {
        self.logging = Some(crate::middleware::LogLevel::Info);
        self
    }

    /// Log requests at debug level.
    #[must_use]
    pub const fn with_debug_logging(mut self) -> Self {
        self.logging = Some(crate::middleware::LogLevel::Debug);
        self
    }

    /// Retry idempotent requests up to `max_retries` times.
    #[must_use]
    pub const fn with_retry(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be parsed.
    pub fn build(self) -> Result<LogoClient<HyperClient>> {
        let base_url = Url::parse(&self.base_url).map_err(Error::InvalidUrl)?;

        let mut http = HyperClient::builder().config(self.config);
        http = match self.logging {
            Some(crate::middleware::LogLevel::Debug) => http.with_debug_logging(),
            Some(crate::middleware::LogLevel::Info) => http.with_logging(),
            None => http,
        };
        if let Some(max_retries) = self.max_retries {
            http = http.with_retry(max_retries);
        }
        let http = http.with_shared_token(self.token.clone()).build();

        Ok(LogoClient::with_url(http, base_url).with_token(self.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = LogoClient::new(HyperClient::new(), "https://erp.example.com/api/v1")
            .expect("client");
        assert_eq!(client.base_url().as_str(), "https://erp.example.com/api/v1/");
        assert!(client.token().is_none());
    }

    #[test]
    fn invalid_base_url() {
        let result = LogoClient::new(HyperClient::new(), "not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn builder_wires_token_slot() {
        let client = LogoClient::builder("https://erp.example.com/api/v1")
            .access_token("abc")
            .with_logging()
            .with_retry(2)
            .build()
            .expect("client");
        let token = client.token().expect("token slot");
        assert_eq!(token.get().as_deref(), Some("abc"));
    }
}
