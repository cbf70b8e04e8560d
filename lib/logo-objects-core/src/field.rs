//! Vendor field catalogue.
//!
//! The service names every attribute in `UPPER_SNAKE_CASE` (`CUSTOMER_CODE`),
//! while search criteria use the logical `camelCase` form (`customerCode`).
//! Each entity declares its catalogue once with [`vendor_fields!`]; the
//! logical names are derived from the vendor names, so the mapping is total
//! and one-to-one by construction.
//!
//! [`vendor_fields!`]: crate::vendor_fields

use std::fmt;

/// A field of an entity catalogue.
pub trait VendorField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every field of the catalogue, in declaration order.
    const ALL: &'static [Self];

    /// Vendor (`UPPER_SNAKE_CASE`) name.
    fn vendor_name(self) -> &'static str;

    /// Logical (`camelCase`) name.
    fn logical_name(self) -> String {
        to_logical_field_name(self.vendor_name())
    }

    /// Look up a field by vendor name.
    fn from_vendor(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.vendor_name() == name)
    }

    /// Look up a field by logical name.
    fn from_logical(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.logical_name() == name)
    }

    /// Look up a field by logical name, falling back to the vendor name.
    fn resolve(name: &str) -> Option<Self> {
        Self::from_logical(name).or_else(|| Self::from_vendor(name))
    }
}

/// Convert a logical `camelCase` name to the vendor `UPPER_SNAKE_CASE` form.
///
/// An underscore is inserted where a lower-case letter or digit is followed
/// by an upper-case letter; existing underscores are kept.
///
/// ```
/// use logo_objects_core::to_vendor_field_name;
///
/// assert_eq!(to_vendor_field_name("customerCode"), "CUSTOMER_CODE");
/// assert_eq!(to_vendor_field_name("name"), "NAME");
/// assert_eq!(to_vendor_field_name("date_"), "DATE_");
/// ```
#[must_use]
pub fn to_vendor_field_name(logical: &str) -> String {
    let mut result = String::with_capacity(logical.len() + 4);
    let mut prev: Option<char> = None;
    for c in logical.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            result.push('_');
        }
        result.extend(c.to_uppercase());
        prev = Some(c);
    }
    result
}

/// Convert a vendor `UPPER_SNAKE_CASE` name to the logical `camelCase` form.
///
/// A trailing underscore (`DATE_`) survives as `date_` so the conversion
/// stays reversible.
///
/// ```
/// use logo_objects_core::to_logical_field_name;
///
/// assert_eq!(to_logical_field_name("CUSTOMER_CODE"), "customerCode");
/// assert_eq!(to_logical_field_name("DATE_"), "date_");
/// ```
#[must_use]
pub fn to_logical_field_name(vendor: &str) -> String {
    let mut result = String::with_capacity(vendor.len());
    let mut capitalize_next = false;
    for (i, c) in vendor.chars().enumerate() {
        if c == '_' {
            if i + 1 == vendor.len() {
                result.push('_');
            } else {
                capitalize_next = !result.is_empty();
            }
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.extend(c.to_lowercase());
        }
    }
    result
}

/// Returns `true` if no two fields of the catalogue share a logical or
/// vendor name.
#[must_use]
pub fn catalogue_is_one_to_one<F: VendorField>() -> bool {
    let mut vendor: Vec<&str> = F::ALL.iter().map(|f| f.vendor_name()).collect();
    let mut logical: Vec<String> = F::ALL.iter().map(|f| f.logical_name()).collect();
    vendor.sort_unstable();
    vendor.dedup();
    logical.sort_unstable();
    logical.dedup();
    vendor.len() == F::ALL.len() && logical.len() == F::ALL.len()
}

/// Declare an entity field catalogue.
///
/// Generates a `Copy` enum implementing [`VendorField`] and `Display` (vendor
/// name).
///
/// ```
/// use logo_objects_core::{VendorField, vendor_fields};
///
/// vendor_fields! {
///     /// Customer card fields.
///     pub enum ArpField {
///         Code => "CODE",
///         CustomerCode => "CUSTOMER_CODE",
///     }
/// }
///
/// assert_eq!(ArpField::CustomerCode.vendor_name(), "CUSTOMER_CODE");
/// assert_eq!(ArpField::from_logical("customerCode"), Some(ArpField::CustomerCode));
/// ```
#[macro_export]
macro_rules! vendor_fields {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $vendor:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::VendorField for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn vendor_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $vendor ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::VendorField::vendor_name(*self))
            }
        }
    };
}
