//! Material cards (`Items`).

use serde::{Deserialize, Serialize};

use super::{EXPORT_TO_XML, IMPORT_FROM_XML};
use crate::resource::Resource;
use crate::{Method, ParamMeta, Route, vendor_fields};

vendor_fields! {
    /// Material card fields.
    pub enum ItemField {
        InternalReference => "INTERNAL_REFERENCE",
        CardType => "CARD_TYPE",
        Code => "CODE",
        Name => "NAME",
        GroupCode => "GROUP_CODE",
        ProducerCode => "PRODUCER_CODE",
        AuxilCode => "AUXIL_CODE",
        UnitsetCode => "UNITSET_CODE",
        Vat => "VAT",
        RecordStatus => "RECORD_STATUS",
    }
}

/// A material card.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unitset_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_status: Option<i32>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const WAREHOUSE: &[ParamMeta] = &[ParamMeta::query("warehouse")];

const ITEM_ROUTES: &[Route] = &[
    EXPORT_TO_XML,
    IMPORT_FROM_XML,
    Route::new("Stock", Method::Get, "/{id}/Stock").with_params(WAREHOUSE),
];

/// The `Items` entity.
#[derive(Debug, Clone, Copy)]
pub struct Items;

impl Resource for Items {
    const NAME: &'static str = "Items";
    type Field = ItemField;
    type Record = Item;
    const ROUTES: &'static [Route] = ITEM_ROUTES;
    const CODE_FIELD: ItemField = ItemField::Code;
    const NAME_FIELD: Option<ItemField> = Some(ItemField::Name);
}
