//! The hyper transport and its middleware stack.
//!
//! [`HyperClient`] is a pooled rustls client wrapped in whatever tower layers
//! the builder was given. Every [`LogoClient`](crate::LogoClient) request goes
//! through it.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::retry::RetryLayer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{
    Error, Request, Response, Result,
    config::{ClientConfig, ClientConfigBuilder},
    connector::https_connector,
    middleware::{BearerAuthLayer, LoggingLayer, RetryPolicy, SharedToken},
};

/// Type-erased service for middleware composition.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by every service in the stack.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

type LayerFn = Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>;

/// `BoxCloneService` is `Send` but not `Sync`; the mutex is only held while
/// cloning the stack for one call.
#[derive(Clone)]
struct SharedStack(Arc<Mutex<BoxedService>>);

impl SharedStack {
    fn new(service: BoxedService) -> Self {
        Self(Arc::new(Mutex::new(service)))
    }

    fn call(&self, request: Request<Bytes>) -> ServiceFuture {
        let mut service = self.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Box::pin(async move { service.call(request).await })
    }
}

/// Innermost service: turns a [`Request`] into a hyper exchange.
#[derive(Clone)]
struct Transport {
    pool: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: Arc<ClientConfig>,
}

impl Transport {
    fn new(config: Arc<ClientConfig>) -> Self {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .retry_canceled_requests(config.retry_on_connection_failure)
            .build(https_connector(&config));

        Self { pool, config }
    }

    fn to_hyper(&self, request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
        if self.config.https_only && request.url().scheme() != "https" {
            return Err(Error::invalid_request(format!(
                "refusing non-https URL {}",
                request.url()
            )));
        }

        let (method, url, headers, body) = request.into_parts();
        let has_user_agent = headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("user-agent"));

        let mut builder = http::Request::builder()
            .method(http::Method::from(method))
            .uri(url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !has_user_agent {
            builder = builder.header(http::header::USER_AGENT, self.config.user_agent.as_str());
        }

        builder
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    async fn exchange(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = self.to_hyper(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.pool.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(classify)?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();

        // The deadline covers the body as well: a stalled export must not hang.
        let body = tokio::time::timeout(self.config.timeout, response.into_body().collect())
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }
}

impl Service<Request<Bytes>> for Transport {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().exchange(request))
    }
}

/// TLS failures surface as connect errors wrapping an `io::Error` that wraps
/// a `rustls::Error`, so the chain is inspected before falling back.
#[allow(clippy::needless_pass_by_value)]
fn classify(err: hyper_util::client::legacy::Error) -> Error {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(current) = source {
        let is_tls = current.is::<rustls::Error>()
            || current
                .downcast_ref::<std::io::Error>()
                .and_then(std::io::Error::get_ref)
                .is_some_and(|inner| inner.is::<rustls::Error>());
        if is_tls {
            return Error::tls(current.to_string());
        }
        source = current.source();
    }

    let message = err.to_string();
    if message.contains("certificate") || message.contains("tls") {
        return Error::tls(message);
    }
    Error::connection(message)
}

/// Pooled HTTPS client with a tower middleware stack.
///
/// # Example
///
/// ```ignore
/// use logo_objects::HyperClient;
/// use std::time::Duration;
///
/// let client = HyperClient::builder()
///     .timeout(Duration::from_secs(120))
///     .with_logging()
///     .with_retry(3)
///     .build();
/// ```
#[derive(Clone)]
pub struct HyperClient {
    stack: SharedStack,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with default settings and no middleware.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client with the given settings and no middleware.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// The transport settings.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl logo_objects_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.stack.call(request).await
    }
}

impl Service<Request<Bytes>> for HyperClient {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        self.stack.call(request)
    }
}

/// Builder for [`HyperClient`].
///
/// The first layer added is the outermost: it sees the request first and the
/// response last.
#[derive(Default)]
pub struct HyperClientBuilder {
    config: ClientConfigBuilder,
    layers: Vec<LayerFn>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("config", &self.config)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Replace the transport settings.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config.into();
        self
    }

    /// Request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Connect deadline.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Idle connections kept per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Idle connection lifetime.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Only allow `https://` URLs.
    #[must_use]
    pub fn https_only(mut self, https_only: bool) -> Self {
        self.config = self.config.https_only(https_only);
        self
    }

    /// Add any tower layer.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        self.layers
            .push(Arc::new(move |inner| BoxCloneService::new(layer.layer(inner))));
        self
    }

    /// Replay idempotent requests on 5xx, 429, connection errors and timeouts.
    #[must_use]
    pub fn with_retry(self, max_retries: u32) -> Self {
        self.layer(RetryLayer::new(RetryPolicy::new(max_retries)))
    }

    /// Send a fixed bearer token.
    #[must_use]
    pub fn with_bearer_auth(self, token: impl Into<String>) -> Self {
        self.layer(BearerAuthLayer::new(token))
    }

    /// Send whatever token the slot holds at call time.
    #[must_use]
    pub fn with_shared_token(self, token: SharedToken) -> Self {
        self.layer(BearerAuthLayer::shared(token))
    }

    /// Info-level request logging.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Debug-level logging, with header names and vendor error payloads.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Assemble the stack.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let config = Arc::new(self.config.build());
        let transport: BoxedService = BoxCloneService::new(Transport::new(Arc::clone(&config)));

        let service = self
            .layers
            .into_iter()
            .rev()
            .fold(transport, |inner, wrap| wrap(inner));

        HyperClient {
            stack: SharedStack::new(service),
            config,
        }
    }
}
