//! Contacts.

use serde::{Deserialize, Serialize};

use super::{EXPORT_TO_XML, IMPORT_FROM_XML};
use crate::resource::Resource;
use crate::{Route, vendor_fields};

vendor_fields! {
    /// Contact card fields.
    pub enum ContactField {
        InternalReference => "INTERNAL_REFERENCE",
        Code => "CODE",
        Name => "NAME",
        Midinit => "MIDINIT",
        Surname => "SURNAME",
        Title => "TITLE",
        ArpCode => "ARP_CODE",
        Telephone => "TELEPHONE",
        MobilePhone => "MOBILE_PHONE",
        EMailAddr => "E_MAIL_ADDR",
        Status => "STATUS",
    }
}

/// A contact person.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_reference: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midinit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arp_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_mail_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const CONTACT_ROUTES: &[Route] = &[EXPORT_TO_XML, IMPORT_FROM_XML];

/// The `Contacts` entity.
#[derive(Debug, Clone, Copy)]
pub struct Contacts;

impl Resource for Contacts {
    const NAME: &'static str = "Contacts";
    type Field = ContactField;
    type Record = Contact;
    const ROUTES: &'static [Route] = CONTACT_ROUTES;
    const CODE_FIELD: ContactField = ContactField::Code;
    const NAME_FIELD: Option<ContactField> = Some(ContactField::Name);
}
