// # HTTP IP Source
//
// This crate determines the address cfddns publishes.
//
// - `HttpIpSource` asks a well-known service for the caller's public
//   address with a single GET and trims the plain-text body.
// - `StaticIpSource` hands back an address the caller already supplied.
//
// Neither caches, polls nor retries.

use cfddns_core::config::IpSourceConfig;
use cfddns_core::traits::IpSource;
use cfddns_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Timeout for the lookup request
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP-based public IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// URL returning the caller's address as plain text
    url: String,

    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org?format=text")
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::transport_with("failed to build HTTP client", e))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch current IP from HTTP service
    async fn fetch_ip(&self) -> Result<IpAddr> {
        tracing::debug!("Finding the external ip. URL={}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport_with(format!("GET {} failed", self.url), e))?;

        let response = response.error_for_status().map_err(|e| {
            Error::transport_with(format!("IP lookup at {} failed", self.url), e)
        })?;

        let ip_text = response
            .text()
            .await
            .map_err(|e| Error::transport_with("failed to read response body", e))?;

        let ip_text = ip_text.trim();

        let ip: IpAddr = ip_text.parse().map_err(|e| {
            Error::invalid_response_with(format!("invalid IP address: {}", ip_text), e)
        })?;

        tracing::info!("External IP is {}", ip);
        Ok(ip)
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        self.fetch_ip().await
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

/// IP source returning a fixed, caller-supplied address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticIpSource {
    ip: IpAddr,
}

impl StaticIpSource {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip }
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<IpAddr> {
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// Build the IP source described by `config`
pub fn from_config(config: &IpSourceConfig) -> Result<Box<dyn IpSource>> {
    config.validate()?;

    match config {
        IpSourceConfig::Http { url } => Ok(Box::new(HttpIpSource::new(url.clone())?)),
        IpSourceConfig::Static { ip } => Ok(Box::new(StaticIpSource::new(*ip))),
    }
}
