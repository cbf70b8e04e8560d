//! Core types for the Logo Objects REST client.
//!
//! This crate is transport-agnostic and provides:
//! - [`QueryOptions`] and [`build_query_string`] - list query strings
//!   (`limit`, `offset`, `fields`, `sort`, `q`, `count`, `expandLevel`)
//! - [`SearchCriteria`] and [`build_search_query`] - filter expressions for `q`
//! - [`VendorField`] and [`vendor_fields!`] - per-entity field catalogues
//! - [`Route`], [`PathTemplate`] and [`OperationCall`] - declarative route tables
//! - [`Method`], [`Request`], [`Response`], [`Error`] and [`Result`]
//! - [`HttpClient`] and [`LogoApi`] - execution traits
//! - [`StatusCode`] and [`header`] (re-exported from the `http` crate)
//!
//! # Example
//!
//! ```
//! use logo_objects_core::{Operators, QueryOptions, SearchCriteria, build_query_string, build_search_query};
//!
//! let criteria = SearchCriteria::new()
//!     .with("code", Operators::new().gte(100).lte(500))
//!     .with("status", vec![1, 2]);
//! let filter = build_search_query(&criteria);
//! assert_eq!(
//!     filter.as_deref(),
//!     Some("CODE gte 100 and CODE lte 500 and (STATUS eq 1 or STATUS eq 2)")
//! );
//!
//! let options = QueryOptions::new().limit(10).offset(0).sort("NAME");
//! assert_eq!(build_query_string(&options), "limit=10&offset=0&sort=NAME");
//! ```

mod body;
mod client;
mod error;
mod field;
mod filter;
mod method;
mod path_template;
pub mod prelude;
mod query;
mod request;
mod response;
mod route;

pub use body::{
    ContentType, from_json, from_json_or_null, to_form, to_json, to_query_pairs, to_query_string,
};
pub use client::{HttpClient, LogoApi, normalize_base_url};
pub use error::{Error, Result};
pub use field::{VendorField, catalogue_is_one_to_one, to_logical_field_name, to_vendor_field_name};
pub use filter::{
    Condition, Criterion, Operator, Operators, Scalar, SearchCriteria, build_query,
    build_search_query, build_search_query_with, prefix_filter,
};
pub use method::Method;
pub use path_template::PathTemplate;
pub use query::{QueryOptions, SortDirection, SortSpec, append_query, build_query_string};
pub use request::{Request, RequestBuilder, RouteTag};
pub use response::Response;
pub use route::{OperationCall, ParamLocation, ParamMeta, Route, find_route};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
