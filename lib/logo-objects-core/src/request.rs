//! Outgoing requests.
//!
//! A [`Request`] is what travels through the middleware stack. Besides the
//! usual method, URL, headers and body it may carry a [`RouteTag`], the
//! resource and unresolved path template it was built from.
//!
//! ```
//! use logo_objects_core::{Method, PathTemplate, Request};
//! use bytes::Bytes;
//!
//! let url = "https://erp.example.com/api/v1/SalesOrders/7".parse().expect("url");
//! let request = Request::<Bytes>::builder(Method::Get, url)
//!     .accept_json()
//!     .route("SalesOrders", PathTemplate::new("/{id}"))
//!     .build();
//! assert_eq!(request.header("accept"), Some("application/json"));
//! assert_eq!(request.route().map(ToString::to_string).as_deref(), Some("SalesOrders/{id}"));
//! ```

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

use crate::{ContentType, Method, PathTemplate};

/// Resource name plus path template, e.g. `SalesOrders` + `/{id}`.
///
/// Logging reports this instead of the resolved path so lines group by
/// operation rather than by record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTag {
    /// Resource path segment.
    pub resource: &'static str,
    /// Template relative to the resource.
    pub template: PathTemplate,
}

impl fmt::Display for RouteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.resource, self.template)
    }
}

/// An HTTP request on its way to the service.
///
/// Header names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    route: Option<RouteTag>,
}

impl<B> Request<B> {
    /// Start a builder.
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Resolved URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// All headers, with names as they were set.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Value of a header, whatever the casing of `name`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any value stored under another casing.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Set a header only if it is not present yet. Returns `true` if it was
    /// set.
    pub fn set_header_if_absent(&mut self, name: &str, value: impl FnOnce() -> String) -> bool {
        if self.header(name).is_some() {
            return false;
        }
        self.headers.insert(name.to_string(), value());
        true
    }

    /// Body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Route the request was built from.
    #[must_use]
    pub const fn route(&self) -> Option<&RouteTag> {
        self.route.as_ref()
    }

    /// Split into method, URL, headers and body.
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    request: Request<B>,
}

impl<B> RequestBuilder<B> {
    /// Builder with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            request: Request {
                method,
                url,
                headers: HashMap::new(),
                body: None,
                route: None,
            },
        }
    }

    /// Set a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.set_header(name, value);
        self
    }

    /// `Accept: application/json`; every Logo Objects endpoint answers JSON.
    #[must_use]
    pub fn accept_json(self) -> Self {
        self.header("Accept", ContentType::Json.as_str())
    }

    /// Tag the request with the route it was built from.
    #[must_use]
    pub fn route(mut self, resource: &'static str, template: PathTemplate) -> Self {
        self.request.route = Some(RouteTag { resource, template });
        self
    }

    /// Set the body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Request<B> {
        self.request
    }
}

impl RequestBuilder<Bytes> {
    /// JSON body with its content type.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", ContentType::Json.as_str())
            .body(body))
    }

    /// Form-urlencoded body with its content type.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_form(value)?;
        Ok(self
            .header("Content-Type", ContentType::FormUrlEncoded.as_str())
            .body(body))
    }
}
