//! Token acquisition.
//!
//! The service issues OAuth-style password-grant tokens at `/token`. The
//! application identity travels as HTTP Basic credentials, the ERP user and
//! firm number as form fields.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::api::LogoClient;
use crate::{Error, HttpClient, LogoApi, Method, Request, Result};

/// Login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Application client id.
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
    /// ERP user name.
    pub username: String,
    /// ERP user password.
    pub password: String,
    /// Firm number to log into.
    pub firm_no: u32,
    /// Optional UI language code (e.g. `TRTR`).
    pub lang: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("firm_no", &self.firm_no)
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Credentials without a language override.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        firm_no: u32,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            firm_no,
            lang: None,
        }
    }

    /// Set the UI language code.
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    fn basic_authorization(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {encoded}")
    }

    fn form(&self) -> TokenForm<'_> {
        TokenForm {
            grant_type: "password",
            username: &self.username,
            firmno: self.firm_no,
            password: &self.password,
            lang: self.lang.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct TokenForm<'a> {
    grant_type: &'static str,
    username: &'a str,
    firmno: u32,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'a str>,
}

/// Token returned by `/token`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// The bearer token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl<C> LogoClient<C>
where
    C: HttpClient + Clone + Send + Sync,
{
    /// Obtain an access token and install it for subsequent requests.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] (401/400) when the service rejects the credentials
    /// - transport and decoding errors
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
        let url = self.resolve("token")?;
        let request = Request::builder(Method::Post, url)
            .accept_json()
            .header("Authorization", credentials.basic_authorization())
            .form(&credentials.form())?
            .build();

        let response = self.execute(request).await?.error_for_status()?;
        let token: AccessToken = response.json()?;
        if token.access_token.is_empty() {
            return Err(Error::invalid_request("token endpoint returned an empty access_token"));
        }

        if let Some(slot) = self.token() {
            slot.set(token.access_token.clone());
        }
        tracing::info!(
            username = %credentials.username,
            firm_no = credentials.firm_no,
            expires_in = ?token.expires_in,
            "logged in"
        );
        Ok(token)
    }

    /// Revoke the current token and clear it locally.
    ///
    /// # Errors
    ///
    /// Returns transport or HTTP errors from `/revoke`; the local token is
    /// cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        let url = self.resolve("revoke")?;
        let request = Request::builder(Method::Get, url)
            .accept_json()
            .build();
        let result = self.execute(request).await.and_then(|r| r.error_for_status());

        if let Some(slot) = self.token() {
            slot.clear();
        }
        tracing::info!("logged out");
        result.map(|_| ())
    }
}
