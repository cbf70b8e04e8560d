//! Generic entity client.
//!
//! Every entity of the service follows the same shape: a collection at
//! `/{Name}`, records at `/{Name}/{id}`, and a set of RPC-style operations
//! below a record. [`Resource`] describes one entity; [`ResourceClient`]
//! implements the calls once for all of them.

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::api::dispatch;
use crate::{
    Error, LogoApi, Method, OperationCall, PathTemplate, QueryOptions, Result, Route,
    SearchCriteria, VendorField, append_query, build_search_query_with, find_route,
    prefix_filter,
};

const COLLECTION: PathTemplate = PathTemplate::new("");
const MEMBER: PathTemplate = PathTemplate::new("/{id}");

/// Description of one entity of the service.
pub trait Resource: Send + Sync + 'static {
    /// Collection path segment, e.g. `SalesOrders`.
    const NAME: &'static str;

    /// Field catalogue.
    type Field: VendorField;

    /// Record DTO.
    type Record: DeserializeOwned + Serialize + Send;

    /// Remote operations below a record.
    const ROUTES: &'static [Route];

    /// Field matched by [`ResourceClient::search_by_code`].
    const CODE_FIELD: Self::Field;

    /// Field matched by [`ResourceClient::search_by_name`], if the entity has one.
    const NAME_FIELD: Option<Self::Field>;
}

/// A list response.
///
/// The service answers list calls with `{"items": [...], "count": n, ...}`;
/// some sub-resources return a bare array instead. Both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PageRepr<T>")]
pub struct Page<T> {
    /// Records of this page.
    pub items: Vec<T>,
    /// Number of records in this page, when reported.
    pub count: Option<u64>,
    /// Requested page size, when echoed.
    pub limit: Option<u64>,
    /// Requested offset, when echoed.
    pub offset: Option<u64>,
    /// Total number of matching records (requires `count=true`).
    pub total_count: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: None,
            limit: None,
            offset: None,
            total_count: None,
        }
    }
}

impl<T> Page<T> {
    /// Number of records in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page holds no record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    List(Vec<T>),
    Envelope {
        #[serde(alias = "Items")]
        items: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        limit: Option<u64>,
        #[serde(default)]
        offset: Option<u64>,
        #[serde(default, alias = "totalCount", alias = "TotalCount")]
        total_count: Option<u64>,
    },
}

impl<T> From<PageRepr<T>> for Page<T> {
    fn from(repr: PageRepr<T>) -> Self {
        match repr {
            PageRepr::List(items) => Self {
                items,
                ..Self::default()
            },
            PageRepr::Envelope {
                items,
                count,
                limit,
                offset,
                total_count,
            } => Self {
                items,
                count,
                limit,
                offset,
                total_count,
            },
        }
    }
}

/// Typed client for one entity.
///
/// Obtained from [`LogoClient::resource`](crate::LogoClient::resource) or one
/// of its entity shortcuts.
pub struct ResourceClient<'a, A, R> {
    api: &'a A,
    resource: PhantomData<fn() -> R>,
}

impl<A, R> std::fmt::Debug for ResourceClient<'_, A, R>
where
    R: Resource,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::NAME)
            .finish_non_exhaustive()
    }
}

impl<'a, A, R> ResourceClient<'a, A, R> {
    /// Bind an entity to a service client.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self {
            api,
            resource: PhantomData,
        }
    }
}

impl<A, R> ResourceClient<'_, A, R>
where
    A: LogoApi,
    R: Resource,
{
    /// The entity's remote operations.
    #[must_use]
    pub const fn operations(&self) -> &'static [Route] {
        R::ROUTES
    }

    /// `GET /{Name}?…`
    ///
    /// # Errors
    ///
    /// Returns transport, HTTP and decoding errors.
    pub async fn get_all(&self, options: &QueryOptions) -> Result<Page<R::Record>> {
        let path = append_query(R::NAME, options);
        self.call(Method::Get, COLLECTION, &path, None).await
    }

    /// `GET /{Name}/{id}?…`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] with status 404 for an unknown id, and
    /// transport or decoding errors.
    pub async fn get_by_id(&self, id: impl Display, options: &QueryOptions) -> Result<R::Record> {
        let path = append_query(&Self::member_path(&id)?, options);
        self.call(Method::Get, MEMBER, &path, None).await
    }

    /// `POST /{Name}`; returns the stored record when the service echoes it.
    ///
    /// # Errors
    ///
    /// Returns serialization, transport, HTTP and decoding errors.
    pub async fn create<B: Serialize>(&self, body: &B) -> Result<Option<R::Record>> {
        let body = serde_json::to_value(body)?;
        self.call(Method::Post, COLLECTION, R::NAME, Some(&body)).await
    }

    /// `PUT /{Name}/{id}`, replacing the record.
    ///
    /// # Errors
    ///
    /// Returns serialization, transport, HTTP and decoding errors.
    pub async fn update<B: Serialize>(
        &self,
        id: impl Display,
        body: &B,
    ) -> Result<Option<R::Record>> {
        let body = serde_json::to_value(body)?;
        let path = Self::member_path(&id)?;
        self.call(Method::Put, MEMBER, &path, Some(&body)).await
    }

    /// `PATCH /{Name}/{id}`, changing only the given attributes.
    ///
    /// # Errors
    ///
    /// Returns serialization, transport, HTTP and decoding errors.
    pub async fn patch<B: Serialize>(
        &self,
        id: impl Display,
        body: &B,
    ) -> Result<Option<R::Record>> {
        let body = serde_json::to_value(body)?;
        let path = Self::member_path(&id)?;
        self.call(Method::Patch, MEMBER, &path, Some(&body)).await
    }

    /// `DELETE /{Name}/{id}`
    ///
    /// # Errors
    ///
    /// Returns transport and HTTP errors.
    pub async fn delete(&self, id: impl Display) -> Result<()> {
        let path = Self::member_path(&id)?;
        let _: IgnoredAny = self.call(Method::Delete, MEMBER, &path, None).await?;
        Ok(())
    }

    /// List records matching `criteria`.
    ///
    /// Keys may be logical (`customerCode`) or vendor (`CUSTOMER_CODE`)
    /// names of the entity's catalogue. When no clause is produced `q` is
    /// left out and the call lists everything `options` selects.
    ///
    /// Only catalogue fields are accepted. To filter on an attribute the
    /// catalogue does not list (it still shows up in the record's `extra`
    /// map), build the filter without validation and pass it to
    /// [`Self::get_all`]:
    ///
    /// ```ignore
    /// let criteria = SearchCriteria::new().with("fax", "555");
    /// let options = QueryOptions::new().filter(build_search_query(&criteria));
    /// let page = client.contacts().get_all(&options).await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] for a key outside the catalogue, and
    /// transport, HTTP or decoding errors.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        options: QueryOptions,
    ) -> Result<Page<R::Record>> {
        let filter = build_search_query_with(criteria, |key| {
            R::Field::resolve(key)
                .map(|field| field.vendor_name().to_string())
                .ok_or_else(|| Error::unknown_field(R::NAME, key))
        })?;
        tracing::debug!(resource = R::NAME, filter = ?filter, "search");
        self.get_all(&options.filter(filter)).await
    }

    /// List records whose `field` starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns transport, HTTP and decoding errors.
    pub async fn search_by_prefix(
        &self,
        field: R::Field,
        prefix: &str,
        options: QueryOptions,
    ) -> Result<Page<R::Record>> {
        let filter = prefix_filter(field.vendor_name(), prefix);
        tracing::debug!(resource = R::NAME, %filter, "search by prefix");
        self.get_all(&options.q(filter)).await
    }

    /// List records whose code starts with `code`.
    ///
    /// # Errors
    ///
    /// Returns transport, HTTP and decoding errors.
    pub async fn search_by_code(
        &self,
        code: &str,
        options: QueryOptions,
    ) -> Result<Page<R::Record>> {
        self.search_by_prefix(R::CODE_FIELD, code, options).await
    }

    /// List records whose name starts with `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the entity has no name field, and
    /// transport, HTTP or decoding errors.
    pub async fn search_by_name(
        &self,
        name: &str,
        options: QueryOptions,
    ) -> Result<Page<R::Record>> {
        let field = R::NAME_FIELD.ok_or_else(|| Error::unknown_field(R::NAME, "name"))?;
        self.search_by_prefix(field, name, options).await
    }

    /// Invoke a remote operation from the entity's route table.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownOperation`] if `operation` is not in the table
    /// - [`Error::MissingPathParameter`] or [`Error::InvalidRequest`] for
    ///   missing arguments
    /// - transport, HTTP and decoding errors
    pub async fn invoke(&self, operation: &str, call: OperationCall) -> Result<serde_json::Value> {
        self.invoke_as(operation, call).await
    }

    /// Like [`invoke`](Self::invoke), decoding the answer as `T`.
    ///
    /// # Errors
    ///
    /// See [`invoke`](Self::invoke).
    pub async fn invoke_as<T: DeserializeOwned>(
        &self,
        operation: &str,
        call: OperationCall,
    ) -> Result<T> {
        let route = find_route(R::ROUTES, operation)
            .ok_or_else(|| Error::unknown_operation(R::NAME, operation))?;
        let rendered = route.render(&call)?;
        let path = append_query(&format!("{}{rendered}", R::NAME), call.query_options());
        tracing::debug!(
            resource = R::NAME,
            operation = route.name,
            method = %route.method,
            "invoke"
        );
        self.call(route.method, route.path, &path, call.body_value())
            .await
    }

    fn member_path(id: &dyn Display) -> Result<String> {
        let rendered = MEMBER.render(&[("id", id.to_string())])?;
        Ok(format!("{}{rendered}", R::NAME))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        template: PathTemplate,
        path_and_query: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T> {
        dispatch(
            self.api,
            method,
            path_and_query,
            Some((R::NAME, template)),
            body,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Row {
        #[serde(rename = "CODE")]
        code: String,
    }

    #[test]
    fn page_from_envelope() {
        let page: Page<Row> = logo_objects_core::from_json(
            br#"{"items":[{"CODE":"A"},{"CODE":"B"}],"count":2,"limit":2,"offset":0,"totalCount":7}"#,
        )
        .expect("page");
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_count, Some(7));
        assert_eq!(page.offset, Some(0));
    }

    #[test]
    fn page_from_bare_array() {
        let page: Page<Row> =
            logo_objects_core::from_json(br#"[{"CODE":"A"}]"#).expect("page");
        assert_eq!(page.count, None);
        let codes: Vec<_> = page.into_iter().map(|row| row.code).collect();
        assert_eq!(codes, vec!["A"]);
    }

    #[test]
    fn page_without_items_is_rejected() {
        let result: Result<Page<Row>> = logo_objects_core::from_json(br#"{"count":0}"#);
        assert!(result.is_err());
    }
}
