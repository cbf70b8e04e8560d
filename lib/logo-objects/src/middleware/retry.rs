//! Retry middleware for HTTP requests.
//!
//! Only idempotent verbs (`GET`, `PUT`, `DELETE`) are replayed. A retried
//! `POST` could create a second sales order or apply a campaign twice.

use std::future;

use bytes::Bytes;
use tower::retry::Policy;

use crate::{Error, Request, Response};

/// A simple retry policy for HTTP requests.
///
/// Retries idempotent requests on:
/// - Connection errors and timeouts
/// - 5xx server errors
/// - 429 Too Many Requests
///
/// # Example
///
/// ```ignore
/// use logo_objects::middleware::{RetryLayer, RetryPolicy, ServiceBuilder};
///
/// let service = ServiceBuilder::new()
///     .layer(RetryLayer::new(RetryPolicy::new(3)))
///     .service(client);
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    remaining: u32,
}

impl RetryPolicy {
    /// Create a new retry policy with the given maximum number of retries.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            remaining: max_retries,
        }
    }

    fn should_retry_response(response: &Response<Bytes>) -> bool {
        let status = response.status();
        status >= 500 || status == 429
    }

    fn should_retry_error(error: &Error) -> bool {
        error.is_connection() || error.is_timeout()
    }
}

impl Policy<Request<Bytes>, Response<Bytes>, Error> for RetryPolicy {
    type Future = future::Ready<()>;

    fn retry(
        &mut self,
        req: &mut Request<Bytes>,
        result: &mut Result<Response<Bytes>, Error>,
    ) -> Option<Self::Future> {
        if self.remaining == 0 || !req.method().is_idempotent() {
            return None;
        }

        let should_retry = match result {
            Ok(response) => Self::should_retry_response(response),
            Err(error) => Self::should_retry_error(error),
        };

        if should_retry {
            self.remaining -= 1;
            tracing::debug!(
                method = %req.method(),
                url = %req.url(),
                remaining = self.remaining,
                "retrying request"
            );
            Some(future::ready(()))
        } else {
            None
        }
    }

    fn clone_request(&mut self, req: &Request<Bytes>) -> Option<Request<Bytes>> {
        req.method().is_idempotent().then(|| req.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::Method;

    fn request(method: Method) -> Request<Bytes> {
        let url = url::Url::parse("https://erp.example.com/api/v1/Items/1").expect("url");
        Request::builder(method, url).build()
    }

    #[test]
    fn retry_policy_new() {
        let policy = RetryPolicy::new(3);
        assert_eq!(policy.remaining, 3);
    }

    #[test]
    fn should_retry_5xx_and_429() {
        for status in [500, 503, 429] {
            let response = Response::new(status, HashMap::default(), Bytes::new());
            assert!(RetryPolicy::should_retry_response(&response), "{status}");
        }
    }

    #[test]
    fn should_not_retry_4xx_or_2xx() {
        for status in [200, 400, 401, 404] {
            let response = Response::new(status, HashMap::default(), Bytes::new());
            assert!(!RetryPolicy::should_retry_response(&response), "{status}");
        }
    }

    #[test]
    fn should_retry_transport_errors() {
        assert!(RetryPolicy::should_retry_error(&Error::connection("refused")));
        assert!(RetryPolicy::should_retry_error(&Error::Timeout));
        assert!(!RetryPolicy::should_retry_error(&Error::http(400, "Bad Request")));
    }

    #[test]
    fn retries_idempotent_until_exhausted() {
        let mut policy = RetryPolicy::new(1);
        let mut req = request(Method::Get);
        let mut result = Err(Error::Timeout);
        assert!(policy.retry(&mut req, &mut result).is_some());
        assert!(policy.retry(&mut req, &mut result).is_none());
    }

    #[test]
    fn never_retries_post_or_patch() {
        let mut policy = RetryPolicy::new(3);
        for method in [Method::Post, Method::Patch] {
            let mut req = request(method);
            let mut result = Err(Error::Timeout);
            assert!(policy.retry(&mut req, &mut result).is_none());
            assert!(policy.clone_request(&req).is_none());
        }
        assert!(policy.clone_request(&request(Method::Delete)).is_some());
    }
}
