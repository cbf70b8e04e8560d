//! Responses coming back from the service.

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Error, Result};

/// A fully read HTTP response.
///
/// Bodies are small JSON documents (or XML strings wrapped in JSON), so the
/// transport buffers them before handing the response over.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Assemble a response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// All headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Value of a header, whatever the casing of `name`.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

impl Response<Bytes> {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// [`Error::JsonDeserialization`] with the failing path.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Decode the body as JSON, reading an empty body as `null`.
    ///
    /// `DELETE` and most sub-resource calls answer `204` or an empty `200`.
    ///
    /// # Errors
    ///
    /// [`Error::JsonDeserialization`] with the failing path.
    pub fn json_or_null<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        crate::from_json_or_null(&self.body)
    }

    /// Body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Turn a non-2xx response into [`Error::Http`], keeping the body so the
    /// vendor's explanation can still be read.
    ///
    /// # Errors
    ///
    /// Returns the HTTP error for any status outside `200..300`.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let reason = http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status");
        Err(Error::http_with_body(
            self.status,
            format!("HTTP {} {reason}", self.status),
            self.body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn headers_ignore_case() {
        let headers = HashMap::from([("content-type".to_string(), "application/json".to_string())]);
        let response = Response::new(200, headers, Bytes::from(r#"{"LOGICALREF":1}"#));

        check!(response.status() == 200);
        check!(response.header("Content-Type") == Some("application/json"));
        check!(response.is_success());
    }

    #[test]
    fn decode_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        struct Item {
            code: String,
            name: String,
        }

        let body = Bytes::from(r#"{"CODE":"ITM-1","NAME":"Bolt"}"#);
        let item: Item = Response::new(200, HashMap::new(), body)
            .json()
            .expect("deserialize");
        check!(
            item == Item {
                code: "ITM-1".to_string(),
                name: "Bolt".to_string()
            }
        );
    }

    #[test]
    fn empty_body_reads_as_null() {
        let response = Response::new(204, HashMap::new(), Bytes::new());
        let value: serde_json::Value = response.json_or_null().expect("null");
        check!(value.is_null());
    }

    #[test]
    fn text_body() {
        let response = Response::new(200, HashMap::new(), Bytes::from("<Items/>"));
        check!(response.text().expect("text") == "<Items/>");
    }

    #[test]
    fn error_for_status_keeps_body() {
        let body = Bytes::from(r#"{"Message":"Record not found"}"#);
        let response = Response::new(404, HashMap::new(), body.clone());

        let_assert!(Err(err) = response.error_for_status());
        check!(err.status() == Some(404));
        check!(err.body() == Some(&body));
        check!(err.to_string().contains("404 Not Found"));
        check!(err.vendor_message().as_deref() == Some("Record not found"));
    }

    #[test]
    fn error_for_status_passes_success() {
        let response = Response::new(201, HashMap::new(), Bytes::new());
        check!(response.error_for_status().is_ok());
    }
}
