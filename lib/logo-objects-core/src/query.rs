//! Query string building for list and lookup endpoints.
//!
//! [`QueryOptions`] collects paging, projection, ordering and filtering
//! options; [`build_query_string`] turns them into the `key=value&...`
//! fragment the service expects after the `?`.
//!
//! # Example
//!
//! ```
//! use logo_objects_core::{QueryOptions, build_query_string};
//!
//! let options = QueryOptions::new().limit(10).offset(0).sort("NAME");
//! assert_eq!(build_query_string(&options), "limit=10&offset=0&sort=NAME");
//! ```

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::field::VendorField;

/// Characters left untouched in query keys and values.
///
/// Mirrors URI-component encoding (unreserved marks stay literal) and keeps
/// `,` readable so field lists stay `fields=NAME,MIDINIT`.
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b',');

/// Ordering direction for a sort spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Ascending, the service default.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Lower-case token (`asc` / `desc`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(crate::Error::invalid_request(format!(
                "unknown sort direction: {other}"
            ))),
        }
    }
}

/// Ordering specification.
///
/// The four shapes mirror the accepted sort grammar: a single field, a field
/// with a direction, a field list, and a field list with one direction
/// applied to every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortSpec {
    /// `[field]`, ascending.
    Field(String),
    /// `[field, direction]`.
    FieldWithDirection(String, SortDirection),
    /// `[fields]`, ascending. An empty list is sent as an empty `sort=`.
    Fields(Vec<String>),
    /// `[fields, direction]`.
    FieldsWithDirection(Vec<String>, SortDirection),
}

impl SortSpec {
    /// Fields in sort order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::Field(field) | Self::FieldWithDirection(field, _) => vec![field.as_str()],
            Self::Fields(fields) | Self::FieldsWithDirection(fields, _) => {
                fields.iter().map(String::as_str).collect()
            }
        }
    }

    /// Direction applied to every field.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        match self {
            Self::Field(_) | Self::Fields(_) => SortDirection::Asc,
            Self::FieldWithDirection(_, dir) | Self::FieldsWithDirection(_, dir) => *dir,
        }
    }

    /// Unencoded `sort` value: comma-joined fields, with ` desc` appended to
    /// each field when descending. Ascending carries no suffix.
    #[must_use]
    pub fn render(&self) -> String {
        let direction = self.direction();
        self.fields()
            .into_iter()
            .map(|field| match direction {
                SortDirection::Asc => field.to_string(),
                SortDirection::Desc => format!("{field} desc"),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<&str> for SortSpec {
    fn from(field: &str) -> Self {
        Self::Field(field.to_string())
    }
}

impl From<String> for SortSpec {
    fn from(field: String) -> Self {
        Self::Field(field)
    }
}

impl From<(&str, SortDirection)> for SortSpec {
    fn from((field, direction): (&str, SortDirection)) -> Self {
        Self::FieldWithDirection(field.to_string(), direction)
    }
}

impl<S: Into<String>> From<Vec<S>> for SortSpec {
    fn from(fields: Vec<S>) -> Self {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> From<(Vec<S>, SortDirection)> for SortSpec {
    fn from((fields, direction): (Vec<S>, SortDirection)) -> Self {
        Self::FieldsWithDirection(fields.into_iter().map(Into::into).collect(), direction)
    }
}

/// Options for list and lookup requests.
///
/// Every option is optional; only `None` means "absent". `count` is a flag:
/// it is sent as `count=true` when set and omitted otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Maximum number of records.
    pub limit: Option<u64>,
    /// Number of records to skip.
    pub offset: Option<u64>,
    /// Vendor field names to return. `Some(vec![])` is sent as `fields=`.
    pub fields: Option<Vec<String>>,
    /// Ordering.
    pub sort: Option<SortSpec>,
    /// Pre-built filter expression.
    pub q: Option<String>,
    /// Ask the service for the total record count.
    pub count: Option<bool>,
    /// Depth of expanded sub-collections (`expandLevel`).
    pub expand_level: Option<String>,
    /// Vendor-specific keys, sent after the standard ones in insertion order.
    pub extra: Vec<(String, String)>,
}

impl QueryOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of records to skip.
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Select returned fields by vendor name.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Select returned fields from an entity catalogue.
    #[must_use]
    pub fn select<F: VendorField>(self, fields: impl IntoIterator<Item = F>) -> Self {
        self.fields(fields.into_iter().map(|f| f.vendor_name()))
    }

    /// Set the ordering.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<SortSpec>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the filter expression.
    #[must_use]
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Set the filter expression only when there is one.
    ///
    /// Pairs with [`crate::build_search_query`], whose `None` must not turn
    /// into an empty `q=`.
    #[must_use]
    pub fn filter(mut self, filter: Option<String>) -> Self {
        if filter.is_some() {
            self.q = filter;
        }
        self
    }

    /// Request the total record count.
    #[must_use]
    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the `expandLevel` option.
    #[must_use]
    pub fn expand_level(mut self, level: impl Into<String>) -> Self {
        self.expand_level = Some(level.into());
        self
    }

    /// Append a vendor-specific key.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.extra.push((name.into(), value.to_string()));
        self
    }

    /// Overlay `other` on these options.
    ///
    /// Options set in `other` win; vendor-specific keys from `other` are
    /// appended after the existing ones.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.limit = other.limit.or(self.limit);
        self.offset = other.offset.or(self.offset);
        self.fields = other.fields.or(self.fields);
        self.sort = other.sort.or(self.sort);
        self.q = other.q.or(self.q);
        self.count = other.count.or(self.count);
        self.expand_level = other.expand_level.or(self.expand_level);
        self.extra.extend(other.extra);
        self
    }

    /// Append every key of a serializable struct as vendor-specific keys.
    pub fn params<T: serde::Serialize>(mut self, params: &T) -> crate::Result<Self> {
        self.extra.extend(crate::to_query_pairs(params)?);
        Ok(self)
    }

    /// Unencoded pairs in emission order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(fields) = &self.fields {
            pairs.push(("fields", fields.join(",")));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.render()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if self.count == Some(true) {
            pairs.push(("count", "true".to_string()));
        }
        if let Some(level) = &self.expand_level {
            pairs.push(("expandLevel", level.clone()));
        }
        pairs.extend(
            self.extra
                .iter()
                .map(|(name, value)| (name.as_str(), value.clone())),
        );
        pairs
    }

    /// Encoded query string; see [`build_query_string`].
    #[must_use]
    pub fn to_query_string(&self) -> String {
        build_query_string(self)
    }
}

/// Build the `&`-joined, URL-encoded query string for `options`.
///
/// Keys come out in a fixed order: `limit`, `offset`, `fields`, `sort`, `q`,
/// `count`, `expandLevel`, then extra keys. Empty options give `""`.
#[must_use]
pub fn build_query_string(options: &QueryOptions) -> String {
    options
        .pairs()
        .into_iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Append `options` to `path`, adding the `?` only when there is a query.
#[must_use]
pub fn append_query(path: &str, options: &QueryOptions) -> String {
    let query = build_query_string(options);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_build_empty_string() {
        assert_eq!(build_query_string(&QueryOptions::default()), "");
        assert_eq!(append_query("Contacts", &QueryOptions::default()), "Contacts");
    }

    #[test]
    fn paging_and_sort_keep_declared_order() {
        let options = QueryOptions::new().sort(vec!["NAME"]).offset(0).limit(10);
        assert_eq!(build_query_string(&options), "limit=10&offset=0&sort=NAME");
    }

    #[test]
    fn fields_are_comma_joined() {
        let options = QueryOptions::new().fields(["NAME", "MIDINIT"]);
        assert_eq!(build_query_string(&options), "fields=NAME,MIDINIT");
    }

    #[test]
    fn sort_grammar() {
        assert_eq!(SortSpec::from("NAME").render(), "NAME");
        assert_eq!(SortSpec::from(("NAME", SortDirection::Asc)).render(), "NAME");
        assert_eq!(
            SortSpec::from(("NAME", SortDirection::Desc)).render(),
            "NAME desc"
        );
        assert_eq!(SortSpec::from(vec!["CODE", "NAME"]).render(), "CODE,NAME");
        assert_eq!(
            SortSpec::from((vec!["CODE", "NAME"], SortDirection::Desc)).render(),
            "CODE desc,NAME desc"
        );
    }

    #[test]
    fn descending_sort_is_encoded() {
        let options = QueryOptions::new().sort(("DATE_", SortDirection::Desc));
        assert_eq!(build_query_string(&options), "sort=DATE_%20desc");
    }

    #[test]
    fn q_is_component_encoded_without_touching_quotes() {
        let options = QueryOptions::new().q("NAME like 'test*' and STATUS eq 1");
        insta::assert_snapshot!(
            build_query_string(&options),
            @"q=NAME%20like%20'test*'%20and%20STATUS%20eq%201"
        );
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let options = QueryOptions::new().q("CODE eq 'A&B=C/D?'");
        assert_eq!(
            build_query_string(&options),
            "q=CODE%20eq%20'A%26B%3DC%2FD%3F'"
        );
    }

    #[test]
    fn count_flag_only_when_true() {
        assert_eq!(build_query_string(&QueryOptions::new().count(true)), "count=true");
        assert_eq!(build_query_string(&QueryOptions::new().count(false)), "");
    }

    #[test]
    fn zero_and_empty_values_are_present() {
        let options = QueryOptions::new().limit(0).q("");
        assert_eq!(build_query_string(&options), "limit=0&q=");
    }

    #[test]
    fn filter_none_leaves_q_absent() {
        let options = QueryOptions::new().limit(5).filter(None);
        assert_eq!(options.q, None);
        assert_eq!(build_query_string(&options), "limit=5");
    }

    #[test]
    fn expand_level_and_extra_keys_come_last() {
        let options = QueryOptions::new()
            .param("withCount", true)
            .expand_level("full")
            .count(true)
            .limit(1);
        assert_eq!(
            build_query_string(&options),
            "limit=1&count=true&expandLevel=full&withCount=true"
        );
    }

    #[test]
    fn typed_extra_keys() {
        #[derive(serde::Serialize)]
        struct Export {
            #[serde(rename = "withLines")]
            with_lines: bool,
        }

        let options = QueryOptions::new()
            .params(&Export { with_lines: false })
            .expect("params");
        assert_eq!(build_query_string(&options), "withLines=false");
    }

    #[test]
    fn append_query_adds_separator() {
        let options = QueryOptions::new().limit(10);
        assert_eq!(append_query("Items", &options), "Items?limit=10");
    }

    #[test]
    fn building_twice_is_identical() {
        let options = QueryOptions::new()
            .limit(25)
            .fields(["CODE", "NAME"])
            .sort((vec!["CODE"], SortDirection::Desc))
            .q("CODE eq 'X'");
        assert_eq!(build_query_string(&options), build_query_string(&options));
    }

    #[test]
    fn merge_overlays_options_and_keeps_extras() {
        let base = QueryOptions::new().limit(5).sort("CODE").param("exportType", 1);
        let merged = base.merge(QueryOptions::new().limit(1).param("lang", "TR"));
        assert_eq!(
            build_query_string(&merged),
            "limit=1&sort=CODE&exportType=1&lang=TR"
        );
    }

    #[test]
    fn empty_lists_are_sent_empty() {
        let options = QueryOptions::new()
            .fields(Vec::<String>::new())
            .sort(Vec::<String>::new());
        assert_eq!(build_query_string(&options), "fields=&sort=");
    }

    #[test]
    fn sort_direction_parse() {
        assert_eq!("DESC".parse::<SortDirection>().expect("desc"), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
