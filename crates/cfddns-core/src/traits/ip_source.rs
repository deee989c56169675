// # IP Source Trait
//
// Defines the interface for determining the address to publish.
//
// ## Implementations
//
// - HTTP lookup of the public address: `cfddns-ip-http` crate
// - Fixed, caller-supplied address: `cfddns-ip-http::StaticIpSource`

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for IP source implementations
///
/// A source is asked once per run. It does not cache, poll or retry.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The address to publish
    /// - `Err(Error)`: If the address could not be determined
    async fn current(&self) -> Result<IpAddr, crate::Error>;

    /// Short name of the source (for logging)
    fn source_name(&self) -> &'static str;
}
