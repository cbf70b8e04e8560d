//! Bearer token authentication middleware.
//!
//! This middleware adds an `Authorization: Bearer <token>` header to outgoing
//! requests. The token lives in a [`SharedToken`] so a fresh login can replace
//! it without rebuilding the client.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// A bearer token shared between the client and its auth middleware.
///
/// Cloning shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct SharedToken {
    inner: Arc<RwLock<Option<Arc<str>>>>,
}

impl SharedToken {
    /// Create an empty slot (requests go out unauthenticated).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot holding `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let shared = Self::new();
        shared.set(token);
        shared
    }

    /// Replace the token.
    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::from(token.into()));
    }

    /// Remove the token.
    pub fn clear(&self) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Current token, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<str>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if a token is set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}

/// Layer that adds bearer token authentication to requests.
///
/// # Example
///
/// ```ignore
/// use logo_objects::middleware::{BearerAuthLayer, SharedToken};
/// use tower::ServiceBuilder;
///
/// let token = SharedToken::with_token("access-token");
/// let service = ServiceBuilder::new()
///     .layer(BearerAuthLayer::shared(token.clone()))
///     .service(client);
/// token.set("refreshed-token");
/// ```
#[derive(Debug, Clone)]
pub struct BearerAuthLayer {
    token: SharedToken,
}

impl BearerAuthLayer {
    /// Create a new bearer auth layer with a fixed token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SharedToken::with_token(token),
        }
    }

    /// Create a bearer auth layer reading from a shared slot.
    #[must_use]
    pub const fn shared(token: SharedToken) -> Self {
        Self { token }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuth {
            inner,
            token: self.token.clone(),
        }
    }
}

/// Service that adds bearer token authentication to requests.
#[derive(Debug, Clone)]
pub struct BearerAuth<S> {
    inner: S,
    token: SharedToken,
}

impl<S> Service<Request<Bytes>> for BearerAuth<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        // An explicit Authorization header (the Basic login call) wins.
        if let Some(token) = self.token.get() {
            request.set_header_if_absent("Authorization", || format!("Bearer {token}"));
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tower::ServiceExt;

    use super::*;
    use crate::Method;

    /// Echoes the Authorization header back as the body.
    #[derive(Clone)]
    struct Echo;

    impl Service<Request<Bytes>> for Echo {
        type Response = Response<Bytes>;
        type Error = Error;
        type Future = std::future::Ready<Result<Response<Bytes>>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, request: Request<Bytes>) -> Self::Future {
            let header = request.header("Authorization").unwrap_or_default().to_string();
            std::future::ready(Ok(Response::new(200, HashMap::new(), Bytes::from(header))))
        }
    }

    fn request() -> Request<Bytes> {
        let url = url::Url::parse("https://erp.example.com/api/v1/Items").expect("url");
        Request::builder(Method::Get, url).build()
    }

    #[tokio::test]
    async fn adds_bearer_header() {
        let service = BearerAuthLayer::new("abc").layer(Echo);
        let response = service.oneshot(request()).await.expect("response");
        assert_eq!(response.body(), &Bytes::from_static(b"Bearer abc"));
    }

    #[tokio::test]
    async fn shared_token_is_replaceable() {
        let token = SharedToken::with_token("first");
        let service = BearerAuthLayer::shared(token.clone()).layer(Echo);

        token.set("second");
        let response = service.clone().oneshot(request()).await.expect("response");
        assert_eq!(response.body(), &Bytes::from_static(b"Bearer second"));

        token.clear();
        let response = service.oneshot(request()).await.expect("response");
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn explicit_authorization_is_kept() {
        let service = BearerAuthLayer::new("abc").layer(Echo);
        let mut request = request();
        request.set_header("authorization", "Basic xyz");
        let response = service.oneshot(request).await.expect("response");
        assert_eq!(response.body(), &Bytes::from_static(b"Basic xyz"));
    }
}
