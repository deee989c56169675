//! Configuration types for cfddns
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::types::{AUTOMATIC_TTL, RecordType, RecordUpdate};

/// Default Cloudflare API root, without the version segment
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client";

/// Default Cloudflare API version
pub const DEFAULT_API_VERSION: u32 = 4;

/// Default HTTP timeout for API requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default public IP lookup endpoint
pub const DEFAULT_IP_URL: &str = "https://api.ipify.org?format=text";

/// Main update configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// Where the published address comes from
    pub ip_source: IpSourceConfig,

    /// The record to rewrite
    pub record: RecordConfig,

    /// Look everything up but skip the write
    #[serde(default)]
    pub dry_run: bool,
}

impl UpdateConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;
        self.ip_source.validate()?;
        self.record.validate()?;
        Ok(())
    }
}

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Cloudflare provider
    Cloudflare {
        /// Account email, sent as the identity header
        email: String,
        /// API key, sent as the secret header
        api_token: String,
        /// Zone id, or a domain name to resolve into one
        zone: String,
        #[serde(default = "default_api_version")]
        api_version: u32,
        #[serde(default = "default_api_base")]
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

// Hand-written so credentials never reach logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Cloudflare {
                zone,
                api_version,
                base_url,
                timeout_secs,
                ..
            } => f
                .debug_struct("Cloudflare")
                .field("email", &"<REDACTED>")
                .field("api_token", &"<REDACTED>")
                .field("zone", zone)
                .field("api_version", api_version)
                .field("base_url", base_url)
                .field("timeout_secs", timeout_secs)
                .finish(),
        }
    }
}

impl ProviderConfig {
    /// Cloudflare configuration with default version, base URL and timeout
    pub fn cloudflare(
        email: impl Into<String>,
        api_token: impl Into<String>,
        zone: impl Into<String>,
    ) -> Self {
        ProviderConfig::Cloudflare {
            email: email.into(),
            api_token: api_token.into(),
            zone: zone.into(),
            api_version: DEFAULT_API_VERSION,
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Cloudflare {
                email,
                api_token,
                zone,
                base_url,
                timeout_secs,
                ..
            } => {
                if email.is_empty() || api_token.is_empty() || zone.is_empty() {
                    return Err(crate::Error::invalid_argument(
                        "email, api token and zone must all be set",
                    ));
                }
                if base_url.is_empty() {
                    return Err(crate::Error::invalid_argument("API base URL cannot be empty"));
                }
                if *timeout_secs == 0 {
                    return Err(crate::Error::invalid_argument("HTTP timeout must be > 0"));
                }
                Ok(())
            }
        }
    }

    /// Zone id or domain name to resolve
    pub fn zone(&self) -> &str {
        match self {
            ProviderConfig::Cloudflare { zone, .. } => zone,
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Cloudflare { .. } => "cloudflare",
        }
    }
}

/// IP source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IpSourceConfig {
    /// Look the public address up over HTTP
    Http {
        /// URL returning the caller's address as plain text
        url: String,
    },

    /// Publish a fixed, caller-supplied address
    Static {
        ip: IpAddr,
    },
}

impl IpSourceConfig {
    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            IpSourceConfig::Http { url } => {
                if url.is_empty() {
                    return Err(crate::Error::invalid_argument("HTTP IP source URL cannot be empty"));
                }
                Ok(())
            }
            IpSourceConfig::Static { .. } => Ok(()),
        }
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        IpSourceConfig::Http {
            url: DEFAULT_IP_URL.to_string(),
        }
    }
}

/// DNS record configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordConfig {
    /// DNS record name (e.g., "www.example.com")
    pub name: String,

    #[serde(default)]
    pub record_type: RecordType,

    /// Time to live in seconds, 1 = automatic
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Route through the provider's proxy
    #[serde(default = "default_proxied")]
    pub proxied: bool,
}

impl RecordConfig {
    /// Create a new record configuration with default type, TTL and proxying
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: RecordType::A,
            ttl: AUTOMATIC_TTL,
            proxied: true,
        }
    }

    /// Set the record type
    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_proxied(mut self, proxied: bool) -> Self {
        self.proxied = proxied;
        self
    }

    /// Validate the record configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.name.is_empty() {
            return Err(crate::Error::invalid_argument("record name cannot be empty"));
        }
        if self.ttl == 0 {
            return Err(crate::Error::invalid_argument("TTL must be > 0 (1 = automatic)"));
        }
        Ok(())
    }

    /// Build the update request publishing `content`
    pub fn to_update(&self, content: impl Into<String>) -> RecordUpdate {
        RecordUpdate::new(self.name.clone(), content)
            .with_record_type(self.record_type)
            .with_ttl(self.ttl)
            .with_proxied(self.proxied)
    }
}

/// Zone to use when none is given: everything after the first "."
///
/// `www.example.com` gives `example.com`. A name without a dot is returned
/// unchanged.
pub fn default_zone_for(host: &str) -> &str {
    host.split_once('.').map_or(host, |(_, rest)| rest)
}

fn default_api_version() -> u32 {
    DEFAULT_API_VERSION
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_ttl() -> u32 {
    AUTOMATIC_TTL
}

fn default_proxied() -> bool {
    true
}
