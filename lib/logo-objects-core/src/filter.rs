//! Filter expressions for the `q` query option.
//!
//! [`SearchCriteria`] maps logical field names to a value, a list of values,
//! or a set of operator conditions. [`build_search_query`] renders it in the
//! service's OData-like filter language:
//!
//! ```
//! use logo_objects_core::{Operators, SearchCriteria, build_search_query};
//!
//! let criteria = SearchCriteria::new()
//!     .with("customerCode", "C001")
//!     .with("balance", Operators::new().gte(100).lte(500));
//!
//! assert_eq!(
//!     build_search_query(&criteria).as_deref(),
//!     Some("CUSTOMER_CODE eq 'C001' and BALANCE gte 100 and BALANCE lte 500"),
//! );
//! ```
//!
//! String literals are wrapped in single quotes as-is: a value containing `'`
//! is not escaped and will change the meaning of the expression. Callers
//! passing untrusted input must sanitize it first.

use std::convert::Infallible;
use std::fmt;

use crate::field::to_vendor_field_name;

/// A literal operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Rendered single-quoted.
    Str(String),
    /// Rendered bare.
    Int(i64),
    /// Rendered bare, with Rust's float formatting: `NaN` and `inf` pass
    /// through as-is.
    Float(f64),
    /// Rendered bare (`true` / `false`).
    Bool(bool),
}

impl Scalar {
    /// Text of the value without quoting.
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{s}'"),
            other => f.write_str(&other.raw()),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),+ $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::$variant(value $(as $cast)?)
                }
            }
        )+
    };
}

scalar_from! {
    i64 => Int,
    i32 => Int as i64,
    u32 => Int as i64,
    i16 => Int as i64,
    u16 => Int as i64,
    u8 => Int as i64,
    f64 => Float,
    bool => Bool,
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `eq`
    Eq,
    /// `ne`
    Ne,
    /// `gt`
    Gt,
    /// `gte`
    Gte,
    /// `lt`
    Lt,
    /// `lte`
    Lte,
    /// `like`, always a prefix match: the operand becomes `'value*'`.
    Like,
}

impl Operator {
    /// Operator token in the filter language.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an operator set.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `FIELD <op> <literal>`
    Compare(Operator, Scalar),
    /// `(FIELD eq v1 or FIELD eq v2 ...)`
    In(Vec<Scalar>),
}

/// Ordered set of conditions on one field, joined with `and`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operators(Vec<Condition>);

impl Operators {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comparison.
    #[must_use]
    pub fn compare(mut self, op: Operator, value: impl Into<Scalar>) -> Self {
        self.0.push(Condition::Compare(op, value.into()));
        self
    }

    /// `eq`
    #[must_use]
    pub fn eq(self, value: impl Into<Scalar>) -> Self {
        self.compare(Operator::Eq, value)
    }

    /// `ne`
    #[must_use]
    pub fn ne(self, value: impl Into<Scalar>) -> Self {
        self.compare(Operator::Ne, value)
    }

    /// `gt`
    #[must_use]
    pub fn gt(self, value: impl Into<Scalar>) -> Self {
        self.compare(Operator::Gt, value)
    }

    /// `gte`
    #[must_use]
    pub fn gte(self, value: impl Into<Scalar>) -> Self {
        self.compare(Operator::Gte, value)
    }

    /// `lt`
    #[must_use]
    pub fn lt(self, value: impl Into<Scalar>) -> Self {
        self.compare(Operator::Lt, value)
    }

    /// `lte`
    #[must_use]
    pub fn lte(self, value: impl Into<Scalar>) -> Self {
        self.compare(Operator::Lte, value)
    }

    /// `like`, rendered as a trailing-wildcard prefix match.
    #[must_use]
    pub fn like(self, prefix: impl Into<Scalar>) -> Self {
        self.compare(Operator::Like, prefix)
    }

    /// `in`, rendered as a parenthesized disjunction of equalities.
    #[must_use]
    pub fn any_of<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        self.0
            .push(Condition::In(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Conditions in insertion order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.0
    }
}

/// What a single criteria key asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Plain value, equality.
    Value(Scalar),
    /// List of values, OR of equalities.
    AnyOf(Vec<Scalar>),
    /// Operator conditions.
    Operators(Operators),
}

macro_rules! criterion_from_scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Criterion {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )+
    };
}

criterion_from_scalar!(&str, String, &String, i64, i32, u32, i16, u16, u8, f64, bool, Scalar);

impl<T: Into<Scalar>> From<Vec<T>> for Criterion {
    fn from(values: Vec<T>) -> Self {
        Self::AnyOf(values.into_iter().map(Into::into).collect())
    }
}

impl From<Operators> for Criterion {
    fn from(operators: Operators) -> Self {
        Self::Operators(operators)
    }
}

/// Ordered mapping from logical field name to criterion.
///
/// Keys keep their first insertion position; setting a key again replaces the
/// criterion in place. A key set to `None` is kept but ignored when building
/// the filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    entries: Vec<(String, Option<Criterion>)>,
}

impl SearchCriteria {
    /// Empty criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a criterion for `field`.
    #[must_use]
    pub fn with(self, field: impl Into<String>, criterion: impl Into<Criterion>) -> Self {
        self.with_optional(field, Some(criterion))
    }

    /// Set a criterion for `field` when there is one.
    #[must_use]
    pub fn with_optional<C: Into<Criterion>>(
        mut self,
        field: impl Into<String>,
        criterion: Option<C>,
    ) -> Self {
        let field = field.into();
        let criterion = criterion.map(Into::into);
        match self.entries.iter_mut().find(|(key, _)| *key == field) {
            Some((_, slot)) => *slot = criterion,
            None => self.entries.push((field, criterion)),
        }
        self
    }

    /// Keys with a defined criterion, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Criterion)> {
        self.entries
            .iter()
            .filter_map(|(key, criterion)| criterion.as_ref().map(|c| (key.as_str(), c)))
    }

    /// Returns `true` if no key has a defined criterion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<K, C> FromIterator<(K, C)> for SearchCriteria
where
    K: Into<String>,
    C: Into<Criterion>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |criteria, (key, criterion)| {
                criteria.with(key, criterion)
            })
    }
}

/// Render `criteria` as a filter expression.
///
/// Logical names are converted with [`to_vendor_field_name`]. Returns `None`
/// when no clause is produced, so callers can leave `q` out entirely.
#[must_use]
pub fn build_search_query(criteria: &SearchCriteria) -> Option<String> {
    let result: Result<Option<String>, Infallible> =
        build_search_query_with(criteria, |key| Ok(to_vendor_field_name(key)));
    match result {
        Ok(query) => query,
        Err(never) => match never {},
    }
}

/// Render `criteria`, resolving each key to a vendor field name with
/// `resolve`. The first resolution error aborts the build.
pub fn build_search_query_with<R, E>(
    criteria: &SearchCriteria,
    mut resolve: R,
) -> Result<Option<String>, E>
where
    R: FnMut(&str) -> Result<String, E>,
{
    let mut clauses = Vec::new();
    for (key, criterion) in criteria.iter() {
        let field = resolve(key)?;
        clauses.extend(render_criterion(&field, criterion));
    }
    if clauses.is_empty() {
        Ok(None)
    } else {
        Ok(Some(clauses.join(" and ")))
    }
}

/// `FIELD like 'prefix*'`, the prefix match used by the search helpers.
#[must_use]
pub fn prefix_filter(field: &str, prefix: &str) -> String {
    format!("{field} like '{prefix}*'")
}

/// Join pre-built conditions with ` and `.
///
/// ```
/// use logo_objects_core::build_query;
///
/// assert_eq!(
///     build_query(&["CODE eq 'ABC'", "STATUS eq 1"]),
///     "CODE eq 'ABC' and STATUS eq 1",
/// );
/// ```
#[must_use]
pub fn build_query<S: AsRef<str>>(conditions: &[S]) -> String {
    conditions
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" and ")
}

fn render_criterion(field: &str, criterion: &Criterion) -> Option<String> {
    match criterion {
        Criterion::Value(value) => Some(format!("{field} eq {value}")),
        Criterion::AnyOf(values) => render_any_of(field, values),
        Criterion::Operators(operators) => {
            let parts: Vec<String> = operators
                .conditions()
                .iter()
                .filter_map(|condition| render_condition(field, condition))
                .collect();
            (!parts.is_empty()).then(|| parts.join(" and "))
        }
    }
}

fn render_condition(field: &str, condition: &Condition) -> Option<String> {
    match condition {
        Condition::Compare(Operator::Like, value) => Some(prefix_filter(field, &value.raw())),
        Condition::Compare(op, value) => Some(format!("{field} {op} {value}")),
        Condition::In(values) => render_any_of(field, values),
    }
}

fn render_any_of(field: &str, values: &[Scalar]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let parts: Vec<String> = values
        .iter()
        .map(|value| format!("{field} eq {value}"))
        .collect();
    Some(format!("({})", parts.join(" or ")))
}
