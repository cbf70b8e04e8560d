//! Error types for the Logo Objects client.

use derive_more::{Display, Error, From};

/// Main error type for Logo Objects operations.
///
/// Query and filter builders never produce errors; everything here comes from
/// request construction, the transport, or the vendor's response.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The service answered with a non-2xx status.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Raw response body, kept for vendor error payload decoding.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "items[0].CODE").
        path: String,
        /// Error message.
        message: String,
    },

    /// Form URL-encoded serialization error (token endpoint).
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_urlencoded::ser::Error),

    /// Extra query keys could not be serialized.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// A search criterion names a field that is not in the entity catalogue.
    #[display("unknown field '{field}' for resource {resource}")]
    #[from(skip)]
    UnknownField {
        /// Resource path segment (e.g. `Contacts`).
        resource: &'static str,
        /// Logical or vendor field name as given by the caller.
        field: String,
    },

    /// The route table has no operation with this name.
    #[display("unknown operation '{operation}' for resource {resource}")]
    #[from(skip)]
    UnknownOperation {
        /// Resource path segment.
        resource: &'static str,
        /// Operation name as given by the caller.
        operation: String,
    },

    /// A `{placeholder}` in a path template had no value.
    #[display("missing path parameter '{name}' for template {template}")]
    #[from(skip)]
    MissingPathParameter {
        /// The template being rendered.
        template: &'static str,
        /// The placeholder name.
        name: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(resource: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            resource,
            field: field.into(),
        }
    }

    /// Create an unknown operation error.
    #[must_use]
    pub fn unknown_operation(resource: &'static str, operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            resource,
            operation: operation.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the service rejected the credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Returns `None` if there is no body or this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }

    /// Best-effort human readable message from a vendor error payload.
    ///
    /// The service reports failures as JSON objects carrying one of
    /// `Message`, `message`, `error_description` or `error`.
    #[must_use]
    pub fn vendor_message(&self) -> Option<String> {
        let value = self.decode_body::<serde_json::Value>()?.ok()?;
        ["Message", "message", "error_description", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::http(404, "Not Found");
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::unknown_field("Contacts", "nickName");
        assert_eq!(
            err.to_string(),
            "unknown field 'nickName' for resource Contacts"
        );

        let err = Error::unknown_operation("ItemSlips", "Explode");
        assert_eq!(
            err.to_string(),
            "unknown operation 'Explode' for resource ItemSlips"
        );

        let err = Error::MissingPathParameter {
            template: "/{id}/ApplyCampaign",
            name: "id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing path parameter 'id' for template /{id}/ApplyCampaign"
        );
    }

    #[test]
    fn error_status() {
        let err = Error::http(404, "Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(err.is_not_found());
        assert!(!err.is_server_error());

        let err = Error::http(500, "Internal Server Error");
        assert!(err.is_server_error());

        let err = Error::http(401, "Unauthorized");
        assert!(err.is_unauthorized());

        assert_eq!(Error::Timeout.status(), None);
        assert!(Error::Timeout.is_timeout());
        assert!(Error::connection("refused").is_connection());
    }

    #[test]
    fn error_decode_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct VendorError {
            #[serde(rename = "Message")]
            message: String,
        }

        let body = bytes::Bytes::from(r#"{"Message": "Record not found"}"#);
        let err = Error::http_with_body(404, "Not Found", body);

        let decoded = err
            .decode_body::<VendorError>()
            .expect("should have body")
            .expect("should decode");
        assert_eq!(decoded.message, "Record not found");

        assert!(Error::http(404, "Not Found").decode_body::<VendorError>().is_none());
        assert!(Error::Timeout.decode_body::<VendorError>().is_none());
    }

    #[test]
    fn vendor_message_lookup() {
        let err = Error::http_with_body(
            400,
            "Bad Request",
            bytes::Bytes::from(r#"{"error":"invalid_grant","error_description":"bad password"}"#),
        );
        assert_eq!(err.vendor_message().as_deref(), Some("bad password"));

        let err = Error::http_with_body(500, "Internal", bytes::Bytes::from("<html/>"));
        assert_eq!(err.vendor_message(), None);
    }
}
