//! Shared record and zone types
//!
//! These mirror the objects the provider hands back. Identifier fields are
//! optional on purpose: a listing entry without an `id` is a classified
//! `InvalidResponse`, not a deserialization failure of the whole listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TTL value meaning "let the provider choose"
pub const AUTOMATIC_TTL: u32 = 1;

/// DNS record type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[default]
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Whether an address of this family belongs in this record type
    pub fn accepts(&self, ip: &std::net::IpAddr) -> bool {
        match self {
            RecordType::A => ip.is_ipv4(),
            RecordType::Aaaa => ip.is_ipv6(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(RecordType::A),
            "AAAA" | "aaaa" => Ok(RecordType::Aaaa),
            other => Err(crate::Error::invalid_argument(format!(
                "unsupported record type '{}', expected A or AAAA",
                other
            ))),
        }
    }
}

/// Provider-assigned zone identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-assigned record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A zone as listed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A DNS record as listed or returned by the provider
///
/// Fields the provider sends that are not modelled here are kept in `extra`
/// so an updated record can be handed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Everything needed to rewrite one existing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    /// Hostname of the record, as given by the caller
    pub host: String,
    /// New record content, normally an IP address
    pub content: String,
    pub record_type: RecordType,
    /// Seconds; [`AUTOMATIC_TTL`] lets the provider decide
    pub ttl: u32,
    /// Route traffic through the provider's proxy rather than DNS only
    pub proxied: bool,
}

impl RecordUpdate {
    /// Create an update with the defaults: `A`, automatic TTL, proxied
    pub fn new(host: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            content: content.into(),
            record_type: RecordType::A,
            ttl: AUTOMATIC_TTL,
            proxied: true,
        }
    }

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
}
