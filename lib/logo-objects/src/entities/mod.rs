//! The entity catalogue.
//!
//! Each entity declares its field catalogue with [`vendor_fields!`], a record
//! DTO in the vendor's `UPPER_SNAKE_CASE` casing, and the table of remote
//! operations below a record. Attributes without a typed field are kept in the
//! record's `extra` map, so a record read and written back loses nothing.
//!
//! [`vendor_fields!`]: crate::vendor_fields

mod arps;
mod contacts;
mod item_slips;
mod items;
mod sales_orders;

pub use arps::{Arp, ArpField, Arps};
pub use contacts::{Contact, ContactField, Contacts};
pub use item_slips::{ItemSlip, ItemSlipField, ItemSlipLine, ItemSlips, SeriLot};
pub use items::{Item, ItemField, Items};
pub use sales_orders::{SalesOrder, SalesOrderField, SalesOrderLine, SalesOrders};

use serde::{Deserialize, Serialize};

use crate::{Method, ParamMeta, Route};

/// Nested document lines, serialized as `{"items": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transactions<T> {
    /// The lines.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Transactions<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Transactions<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Parameters of operations taking a JSON body.
pub(crate) const BODY: &[ParamMeta] = &[ParamMeta::body()];

/// `GET /{Name}/{id}/ExportToXmlStr`, available on every entity.
pub(crate) const EXPORT_TO_XML: Route =
    Route::new("ExportToXmlStr", Method::Get, "/{id}/ExportToXmlStr");

/// `POST /{Name}/ImportFromXmlStr`, available on every entity.
pub(crate) const IMPORT_FROM_XML: Route =
    Route::new("ImportFromXmlStr", Method::Post, "/ImportFromXmlStr").with_params(BODY);

#[cfg(test)]
mod tests {
    use logo_objects_core::{VendorField, catalogue_is_one_to_one, to_vendor_field_name};

    use super::*;
    use crate::resource::Resource;

    fn check_catalogue<R: Resource>() {
        assert!(catalogue_is_one_to_one::<R::Field>(), "{}", R::NAME);
        for field in <R::Field as VendorField>::ALL {
            assert_eq!(
                to_vendor_field_name(&field.logical_name()),
                field.vendor_name(),
                "{}",
                R::NAME
            );
        }
    }

    fn check_routes<R: Resource>() {
        let mut names: Vec<_> = R::ROUTES.iter().map(|route| route.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "{} has duplicate operations", R::NAME);
        assert!(
            R::ROUTES.iter().any(|route| route.name == "ExportToXmlStr"),
            "{}",
            R::NAME
        );
    }

    #[test]
    fn catalogues_round_trip() {
        check_catalogue::<Arps>();
        check_catalogue::<Contacts>();
        check_catalogue::<Items>();
        check_catalogue::<ItemSlips>();
        check_catalogue::<SalesOrders>();
    }

    #[test]
    fn route_tables_are_unique() {
        check_routes::<Arps>();
        check_routes::<Contacts>();
        check_routes::<Items>();
        check_routes::<ItemSlips>();
        check_routes::<SalesOrders>();
    }

    #[test]
    fn unmodelled_attributes_survive_round_trip() {
        let order: SalesOrder = serde_json::from_str(
            r#"{"NUMBER":"SO-1","STATUS":4,"TRANSACTIONS":{"items":[{"TYPE":0,"MASTER_CODE":"M-1"}]},"NOTES1":"rush"}"#,
        )
        .expect("order");

        assert_eq!(order.status, Some(4));
        insta::assert_snapshot!(
            serde_json::to_string(&order).expect("json"),
            @r#"{"NUMBER":"SO-1","STATUS":4,"TRANSACTIONS":{"items":[{"TYPE":0,"MASTER_CODE":"M-1"}]},"NOTES1":"rush"}"#
        );
    }
}
