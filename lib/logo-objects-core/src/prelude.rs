//! Prelude module for convenient imports.
//!
//! ```ignore
//! use logo_objects_core::prelude::*;
//! ```

pub use crate::{
    Criterion, Error, HttpClient, LogoApi, Method, OperationCall, Operators, QueryOptions,
    Request, Response, Result, Route, SearchCriteria, SortDirection, SortSpec, VendorField,
    build_query_string, build_search_query, vendor_fields,
};
