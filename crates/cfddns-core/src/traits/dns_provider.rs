// # DNS Provider Trait
//
// Defines the interface for updating DNS records via provider APIs.
//
// ## Implementations
//
// - Cloudflare: `cfddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cfddns_core::{DnsProvider, RecordUpdate};
//
// async fn publish(provider: &dyn DnsProvider) -> cfddns_core::Result<()> {
//     let update = RecordUpdate::new("www.example.com", "203.0.113.7");
//     provider.update_record(&update).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::types::{DnsRecord, RecordId, RecordUpdate};

/// Trait for DNS provider implementations
///
/// A provider only ever rewrites records that already exist; it never
/// creates one. Every call to [`DnsProvider::update_record`] performs its
/// own fresh lookup of the record id immediately before the write, so two
/// updates never share a possibly stale id.
///
/// # Errors
///
/// Implementations return the [`crate::Error`] kind matching the failure and
/// never retry internally.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Find the provider id of the record named `host`
    ///
    /// The lookup key is lower-cased before matching.
    async fn find_record_id(&self, host: &str) -> Result<RecordId, crate::Error>;

    /// Rewrite the record named `update.host`
    ///
    /// # Returns
    ///
    /// - `Ok(DnsRecord)`: The record as the provider reports it after the update
    /// - `Err(Error)`: If lookup or update failed
    async fn update_record(&self, update: &RecordUpdate) -> Result<DnsRecord, crate::Error>;

    /// Whether writes are skipped (lookups still happen)
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
