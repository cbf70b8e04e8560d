//! Declarative route tables for vendor sub-resource operations.
//!
//! Entities expose RPC-style operations below a record
//! (`/SalesOrders/{id}/ApplyCampaign/{campaignCode}`, `/ItemSlips/{id}/AddSeriLots`).
//! Each entity lists them in a static table of [`Route`]s, which a single
//! routine resolves and invokes by name.

use std::fmt;

use crate::{Error, Method, PathTemplate, QueryOptions, Result};

/// Where an operation parameter is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Substituted into the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// The JSON request body.
    Body,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// Metadata about a single operation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamMeta {
    /// Parameter name (path placeholder or query key).
    pub name: &'static str,
    /// Where the parameter is sent.
    pub location: ParamLocation,
    /// Whether the call must supply it.
    pub required: bool,
}

impl ParamMeta {
    /// Required path parameter.
    #[must_use]
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Path,
            required: true,
        }
    }

    /// Optional query parameter.
    #[must_use]
    pub const fn query(name: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Query,
            required: false,
        }
    }

    /// Required query parameter.
    #[must_use]
    pub const fn required_query(name: &'static str) -> Self {
        Self {
            name,
            location: ParamLocation::Query,
            required: true,
        }
    }

    /// Required JSON body.
    #[must_use]
    pub const fn body() -> Self {
        Self {
            name: "body",
            location: ParamLocation::Body,
            required: true,
        }
    }
}

/// One remote operation of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Operation name, e.g. `ApplyCampaign`.
    pub name: &'static str,
    /// HTTP verb.
    pub method: Method,
    /// Path below the entity collection, e.g. `/{id}/ApplyCampaign/{campaignCode}`.
    pub path: PathTemplate,
    /// Declared query and body parameters; path parameters come from the template.
    pub params: &'static [ParamMeta],
}

impl Route {
    /// Create a route without query or body parameters.
    #[must_use]
    pub const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            name,
            method,
            path: PathTemplate::new(path),
            params: &[],
        }
    }

    /// Declare query and body parameters.
    #[must_use]
    pub const fn with_params(mut self, params: &'static [ParamMeta]) -> Self {
        self.params = params;
        self
    }

    /// All parameters, path placeholders first.
    #[must_use]
    pub fn parameters(&self) -> Vec<ParamMeta> {
        self.path
            .placeholders()
            .into_iter()
            .map(ParamMeta::path)
            .chain(self.params.iter().copied())
            .collect()
    }

    /// Returns `true` if the route requires a JSON body.
    #[must_use]
    pub fn requires_body(&self) -> bool {
        self.params
            .iter()
            .any(|p| p.location == ParamLocation::Body && p.required)
    }

    /// Check that `call` supplies every required parameter and render the
    /// path below the collection.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingPathParameter`] for an unfilled placeholder
    /// - [`Error::InvalidRequest`] for a missing required query key or body
    pub fn render(&self, call: &OperationCall) -> Result<String> {
        for param in self.params.iter().filter(|p| p.required) {
            match param.location {
                ParamLocation::Query if !call.has_query_param(param.name) => {
                    return Err(Error::invalid_request(format!(
                        "operation {} requires query parameter '{}'",
                        self.name, param.name
                    )));
                }
                ParamLocation::Body if call.body.is_none() => {
                    return Err(Error::invalid_request(format!(
                        "operation {} requires a request body",
                        self.name
                    )));
                }
                _ => {}
            }
        }
        self.path.render(&call.path_params)
    }
}

/// Look up a route by operation name.
#[must_use]
pub fn find_route<'a>(routes: &'a [Route], name: &str) -> Option<&'a Route> {
    routes.iter().find(|route| route.name == name)
}

/// Arguments of a generic operation invocation.
///
/// # Example
///
/// ```
/// use logo_objects_core::OperationCall;
///
/// let call = OperationCall::new()
///     .path_param("id", 42)
///     .path_param("campaignCode", "SUMMER")
///     .query_param("simulate", true);
/// assert_eq!(call.path_params().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationCall {
    path_params: Vec<(String, String)>,
    query: QueryOptions,
    body: Option<serde_json::Value>,
}

impl OperationCall {
    /// Call without arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a path placeholder.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.push((name.into(), value.to_string()));
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query = self.query.param(name, value);
        self
    }

    /// Merge query options into the call. Parameters added with
    /// [`Self::query_param`] are kept, whatever the call order.
    #[must_use]
    pub fn query(mut self, query: QueryOptions) -> Self {
        self.query = self.query.merge(query);
        self
    }

    /// Set the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set an already-built JSON body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path parameters in insertion order.
    #[must_use]
    pub fn path_params(&self) -> &[(String, String)] {
        &self.path_params
    }

    /// Query options.
    #[must_use]
    pub const fn query_options(&self) -> &QueryOptions {
        &self.query
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body_value(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    fn has_query_param(&self, name: &str) -> bool {
        self.query.extra.iter().any(|(key, _)| key == name)
    }
}
