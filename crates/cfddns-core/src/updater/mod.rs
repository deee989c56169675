//! One-shot record update
//!
//! The Updater runs a single pass of:
//! 1. Ask the IpSource for the address to publish
//! 2. Build the update request for the configured record
//! 3. Hand it to the DnsProvider, which looks the record up and rewrites it
//!
//! ```text
//! ┌─────────────┐   IpAddr   ┌──────────┐  RecordUpdate  ┌─────────────┐
//! │  IpSource   │──────────▶│ Updater  │──────────────▶│ DnsProvider │
//! └─────────────┘            └──────────┘                └─────────────┘
//! ```
//!
//! Nothing is retried and nothing is remembered between runs.

use std::net::IpAddr;

use tracing::{debug, info, warn};

use crate::config::RecordConfig;
use crate::error::Result;
use crate::traits::{DnsProvider, IpSource};
use crate::types::DnsRecord;

/// What a completed run published
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Hostname of the rewritten record
    pub host: String,
    /// Address that was (or in dry-run mode would have been) published
    pub ip: IpAddr,
    /// Record as the provider reported it
    pub record: DnsRecord,
    /// True if the provider skipped the write
    pub dry_run: bool,
}

/// Single-shot updater for one record
pub struct Updater {
    ip_source: Box<dyn IpSource>,
    provider: Box<dyn DnsProvider>,
    record: RecordConfig,
}

impl Updater {
    /// Create a new updater
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the record configuration is incomplete.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        record: RecordConfig,
    ) -> Result<Self> {
        record.validate()?;

        Ok(Self {
            ip_source,
            provider,
            record,
        })
    }

    /// Determine the address and push it to the provider
    pub async fn run_once(&self) -> Result<UpdateOutcome> {
        debug!(
            "Determining address via {} source",
            self.ip_source.source_name()
        );
        let ip = self.ip_source.current().await?;
        info!("Address to publish: {}", ip);

        if !self.record.record_type.accepts(&ip) {
            warn!(
                "Publishing {} into a {} record for {}",
                ip, self.record.record_type, self.record.name
            );
        }

        let update = self.record.to_update(ip.to_string());
        debug!(
            "Updating {} through {}",
            update.host,
            self.provider.provider_name()
        );
        let record = self.provider.update_record(&update).await?;

        Ok(UpdateOutcome {
            host: update.host,
            ip,
            record,
            dry_run: self.provider.is_dry_run(),
        })
    }
}
