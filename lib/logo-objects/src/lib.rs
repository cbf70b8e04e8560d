//! Typed async client for the Logo Objects ERP REST service.
//!
//! Entities (`Arps`, `Contacts`, `Items`, `ItemSlips`, `SalesOrders`) share
//! one generic [`ResourceClient`]: CRUD calls, search helpers that build the
//! service's filter expressions, and a route table for the RPC-style
//! operations below a record (`ApplyCampaign`, `AddSeriLots`, ...).
//!
//! # Example
//!
//! ```ignore
//! use logo_objects::prelude::*;
//! use logo_objects::entities::SalesOrderField;
//!
//! let client = LogoClient::builder("https://erp.example.com/api/v1")
//!     .with_logging()
//!     .with_retry(3)
//!     .build()?;
//! client.login(&Credentials::new("app", "secret", "LOGO", "pass", 1)).await?;
//!
//! let criteria = SearchCriteria::new()
//!     .with("arpCode", "C-001")
//!     .with("status", vec![1, 4]);
//! let orders = client
//!     .sales_orders()
//!     .search(&criteria, QueryOptions::new().limit(20).sort(("DATE_", SortDirection::Desc)))
//!     .await?;
//!
//! client
//!     .sales_orders()
//!     .invoke(
//!         "ApplyCampaign",
//!         OperationCall::new().path_param("id", 42).path_param("campaignCode", "SUMMER"),
//!     )
//!     .await?;
//! ```

mod api;
mod auth;
mod client;
mod config;
mod connector;
pub mod entities;
pub mod middleware;
pub mod prelude;
mod resource;

pub use api::{LogoClient, LogoClientBuilder};
pub use auth::{AccessToken, Credentials};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_USER_AGENT};
pub use resource::{Page, Resource, ResourceClient};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use logo_objects_core::{
    Condition, ContentType, Criterion, Error, HttpClient, LogoApi, Method, OperationCall,
    Operator, Operators, ParamLocation, ParamMeta, PathTemplate, QueryOptions, Request,
    RequestBuilder, Response, Result, Route, RouteTag, Scalar, SearchCriteria, SortDirection, SortSpec,
    VendorField, append_query, build_query, build_query_string, build_search_query,
    build_search_query_with, catalogue_is_one_to_one, find_route, from_json, from_json_or_null,
    normalize_base_url, prefix_filter, to_form, to_json, to_logical_field_name, to_query_pairs,
    to_query_string, to_vendor_field_name, vendor_fields,
};

// Re-export http types for status codes and headers
pub use logo_objects_core::{StatusCode, header};
