//! Material slips (`ItemSlips`).

use serde::{Deserialize, Serialize};

use super::{BODY, EXPORT_TO_XML, IMPORT_FROM_XML, Transactions};
use crate::resource::Resource;
use crate::{Method, Route, vendor_fields};

vendor_fields! {
    /// Material slip header fields.
    pub enum ItemSlipField {
        InternalReference => "INTERNAL_REFERENCE",
        Group => "GROUP",
        Type => "TYPE",
        Number => "NUMBER",
        Date => "DATE_",
        DocNumber => "DOC_NUMBER",
        SourceIndex => "SOURCE_INDEX",
        DestIndex => "DEST_INDEX",
        Status => "STATUS",
    }
}

/// A material slip (transfer, consumption, production entry, ...).
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ItemSlip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<i32>,
    #[serde(rename = "TYPE", default, skip_serializing_if = "Option::is_none")]
    pub slip_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "DATE_", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Transactions<ItemSlipLine>>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One line of a material slip.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ItemSlipLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A serial or lot number assignment, the body of `AddSeriLots`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SeriLot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_no: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const ITEM_SLIP_ROUTES: &[Route] = &[
    EXPORT_TO_XML,
    IMPORT_FROM_XML,
    Route::new("AddSeriLots", Method::Post, "/{id}/AddSeriLots").with_params(BODY),
];

/// The `ItemSlips` entity.
#[derive(Debug, Clone, Copy)]
pub struct ItemSlips;

impl Resource for ItemSlips {
    const NAME: &'static str = "ItemSlips";
    type Field = ItemSlipField;
    type Record = ItemSlip;
    const ROUTES: &'static [Route] = ITEM_SLIP_ROUTES;
    const CODE_FIELD: ItemSlipField = ItemSlipField::Number;
    const NAME_FIELD: Option<ItemSlipField> = None;
}
