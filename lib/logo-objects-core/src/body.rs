//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Content types exchanged with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`), used by every resource.
    Json,
    /// Form URL-encoded content type, used by the token endpoint.
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize a value to JSON bytes.
///
/// # Example
///
/// ```
/// use logo_objects_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// struct Contact { code: String }
///
/// let bytes = to_json(&Contact { code: "C001".to_string() }).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"CODE":"C001"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// # Example
///
/// ```
/// use logo_objects_core::to_form;
///
/// let bytes = to_form(&[("grant_type", "password"), ("firmno", "1")]).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"grant_type=password&firmno=1");
/// ```
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_urlencoded::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// Used for vendor-specific extra keys that callers describe with their own
/// `Serialize` struct; `Vec<T>` fields become repeated keys.
pub fn to_query_string<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).map_err(Into::into)
}

/// Serialize a value to ordered query pairs.
pub fn to_query_pairs<T: serde::Serialize>(value: &T) -> Result<Vec<(String, String)>> {
    let encoded = to_query_string(value)?;
    Ok(url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect())
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Example
///
/// ```
/// use logo_objects_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Item { #[serde(rename = "CODE")] code: String }
///
/// let item: Item = from_json(br#"{"CODE":"ITM-1"}"#).expect("deserialize");
/// assert_eq!(item.code, "ITM-1");
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Like [`from_json`], but an empty (or whitespace-only) body reads as JSON `null`.
///
/// `DELETE` and several sub-resource operations answer `204 No Content`.
pub fn from_json_or_null<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        from_json(b"null")
    } else {
        from_json(bytes)
    }
}
