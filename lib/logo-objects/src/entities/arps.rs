//! Customers and vendors (`Arps`).

use serde::{Deserialize, Serialize};

use super::{EXPORT_TO_XML, IMPORT_FROM_XML};
use crate::resource::Resource;
use crate::{Method, Route, vendor_fields};

vendor_fields! {
    /// Current account card fields.
    pub enum ArpField {
        InternalReference => "INTERNAL_REFERENCE",
        AccountType => "ACCOUNT_TYPE",
        Code => "CODE",
        Title => "TITLE",
        Address1 => "ADDRESS1",
        Address2 => "ADDRESS2",
        District => "DISTRICT",
        Town => "TOWN",
        City => "CITY",
        Country => "COUNTRY",
        PostalCode => "POSTAL_CODE",
        Telephone1 => "TELEPHONE1",
        EMailAddr => "E_MAIL_ADDR",
        TaxId => "TAX_ID",
        TaxOffice => "TAX_OFFICE",
        AuxilCode => "AUXIL_CODE",
        AuthCode => "AUTH_CODE",
        SalesmanCode => "SALESMAN_CODE",
        RecordStatus => "RECORD_STATUS",
    }
}

/// A current account card (customer, vendor or both).
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Arp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    /// 1 customer, 2 vendor, 3 both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_mail_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_status: Option<i32>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const ARP_ROUTES: &[Route] = &[
    EXPORT_TO_XML,
    IMPORT_FROM_XML,
    Route::new("Addresses", Method::Get, "/{id}/Addresses"),
];

/// The `Arps` entity.
#[derive(Debug, Clone, Copy)]
pub struct Arps;

impl Resource for Arps {
    const NAME: &'static str = "Arps";
    type Field = ArpField;
    type Record = Arp;
    const ROUTES: &'static [Route] = ARP_ROUTES;
    const CODE_FIELD: ArpField = ArpField::Code;
    const NAME_FIELD: Option<ArpField> = Some(ArpField::Title);
}
