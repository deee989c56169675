//! Core traits for cfddns
//!
//! - [`DnsProvider`]: rewrite an existing record through a provider API
//! - [`IpSource`]: determine the address to publish

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::DnsProvider;
