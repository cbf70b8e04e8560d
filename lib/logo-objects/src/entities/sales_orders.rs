//! Sales orders.

use serde::{Deserialize, Serialize};

use super::{EXPORT_TO_XML, IMPORT_FROM_XML, Transactions};
use crate::resource::Resource;
use crate::{Method, Route, vendor_fields};

vendor_fields! {
    /// Sales order header fields.
    pub enum SalesOrderField {
        InternalReference => "INTERNAL_REFERENCE",
        Number => "NUMBER",
        Date => "DATE_",
        DocNumber => "DOC_NUMBER",
        ArpCode => "ARP_CODE",
        SalesmanCode => "SALESMAN_CODE",
        SourceWh => "SOURCE_WH",
        Status => "STATUS",
        TotalDiscounted => "TOTAL_DISCOUNTED",
        TotalVat => "TOTAL_VAT",
        TotalNet => "TOTAL_NET",
    }
}

/// A sales order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SalesOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "DATE_", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arp_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salesman_code: Option<String>,
    /// 1 proposal, 4 approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_net: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Transactions<SalesOrderLine>>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One line of a sales order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SalesOrderLine {
    /// 0 material, 2 discount, 4 service.
    #[serde(rename = "TYPE", default, skip_serializing_if = "Option::is_none")]
    pub line_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const SALES_ORDER_ROUTES: &[Route] = &[
    EXPORT_TO_XML,
    IMPORT_FROM_XML,
    Route::new("ApplyCampaign", Method::Post, "/{id}/ApplyCampaign/{campaignCode}"),
];

/// The `SalesOrders` entity.
#[derive(Debug, Clone, Copy)]
pub struct SalesOrders;

impl Resource for SalesOrders {
    const NAME: &'static str = "SalesOrders";
    type Field = SalesOrderField;
    type Record = SalesOrder;
    const ROUTES: &'static [Route] = SALES_ORDER_ROUTES;
    const CODE_FIELD: SalesOrderField = SalesOrderField::Number;
    const NAME_FIELD: Option<SalesOrderField> = None;
}
