// # cfddns-core
//
// Core library for the cfddns record updater.
//
// ## Architecture Overview
//
// - **IpSource**: Trait for determining the address to publish
// - **DnsProvider**: Trait for rewriting an existing record via a provider API
// - **Updater**: One-shot orchestration of IpSource → DnsProvider
// - **Error**: Closed set of failure kinds shared by every crate
//
// Provider and IP source implementations live in their own crates and only
// depend on this one.

pub mod traits;
pub mod updater;
pub mod config;
pub mod error;
pub mod types;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider};
pub use updater::{Updater, UpdateOutcome};
pub use config::{UpdateConfig, IpSourceConfig, ProviderConfig, RecordConfig};
pub use error::{Error, ErrorKind, Result};
pub use types::{DnsRecord, RecordId, RecordType, RecordUpdate, Zone, ZoneId};
