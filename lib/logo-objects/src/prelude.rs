//! Prelude module for convenient imports.
//!
//! ```ignore
//! use logo_objects::prelude::*;
//! ```

pub use crate::entities::{Arps, Contacts, ItemSlips, Items, SalesOrders};
pub use crate::{
    AccessToken, Credentials, Criterion, Error, HyperClient, LogoApi, LogoClient, Method,
    OperationCall, Operators, Page, QueryOptions, Resource, ResourceClient, Result,
    SearchCriteria, SortDirection, SortSpec, VendorField,
};
pub use serde::{Deserialize, Serialize};
