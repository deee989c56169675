//! Authenticated HTTP plumbing for the Cloudflare v4 API
//!
//! Construction is free of I/O. Network calls only happen through the
//! zone and record operations layered on top of [`CloudflareClient`].

use std::time::Duration;

use cfddns_core::config::{DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS};
use cfddns_core::{Error, ProviderConfig, RecordId, Result, ZoneId};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::response::parse_and_validate;

/// Header carrying the account email
pub const AUTH_EMAIL_HEADER: &str = "X-Auth-Email";

/// Header carrying the API key
pub const AUTH_KEY_HEADER: &str = "X-Auth-Key";

/// Account email and API key
///
/// Both values are treated as secrets: `Debug` never prints them.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    api_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &"<REDACTED>")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl Credentials {
    /// # Errors
    ///
    /// `InvalidArgument` if either value is empty.
    pub fn new(email: impl Into<String>, api_token: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let api_token = api_token.into();

        if email.is_empty() || api_token.is_empty() {
            return Err(Error::invalid_argument("user email and api token should be set"));
        }

        Ok(Self { email, api_token })
    }
}

/// Where and how to reach the API
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API root without the version segment
    pub base_url: String,
    /// Version number, becomes the `/v{n}` path segment
    pub api_version: u32,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            api_version: DEFAULT_API_VERSION,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Cloudflare API client
///
/// Holds credentials and the versioned API root for its whole lifetime.
/// Does not know its zone yet; see [`CloudflareClient::open`].
pub struct CloudflareClient {
    /// ⚠️ NEVER log these values
    credentials: Credentials,

    /// `{base_url}/v{api_version}`
    api_url: String,

    http: reqwest::Client,
}

impl std::fmt::Debug for CloudflareClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareClient")
            .field("credentials", &self.credentials)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl CloudflareClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// `Transport` if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::transport_with("failed to build HTTP client", e))?;

        let api_url = format!(
            "{}/v{}",
            options.base_url.trim_end_matches('/'),
            options.api_version
        );

        Ok(Self {
            credentials,
            api_url,
            http,
        })
    }

    /// Create a client from provider configuration
    ///
    /// The configured zone is not resolved here.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        match config {
            ProviderConfig::Cloudflare {
                email,
                api_token,
                api_version,
                base_url,
                timeout_secs,
                ..
            } => Self::new(
                Credentials::new(email.clone(), api_token.clone())?,
                ClientOptions {
                    base_url: base_url.clone(),
                    api_version: *api_version,
                    timeout: Duration::from_secs(*timeout_secs),
                },
            ),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn zones_url(&self) -> String {
        format!("{}/zones", self.api_url)
    }

    pub(crate) fn dns_records_url(&self, zone_id: &ZoneId) -> String {
        format!("{}/{}/dns_records", self.zones_url(), zone_id)
    }

    pub(crate) fn record_url(&self, zone_id: &ZoneId, record_id: &RecordId) -> String {
        format!("{}/{}", self.dns_records_url(zone_id), record_id)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(AUTH_EMAIL_HEADER, &self.credentials.email)
            .header(AUTH_KEY_HEADER, &self.credentials.api_token)
            .header(CONTENT_TYPE, "application/json")
    }

    /// GET `url` and return the validated envelope's `result`
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|e| Error::transport_with(format!("GET {} failed", url), e))?;

        parse_and_validate(response).await?.into_result()
    }

    /// PUT `body` to `url` and return the validated envelope's `result`
    pub(crate) async fn put<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorized(self.http.put(url))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::transport_with(format!("PUT {} failed", url), e))?;

        parse_and_validate(response).await?.into_result()
    }
}
