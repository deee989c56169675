//! Zone resolution
//!
//! A zone string with no "." is taken as an opaque zone id and used as-is.
//! Anything else is a domain name, resolved by listing the zones the
//! credentials can see (first page only) and matching `name` exactly.

use cfddns_core::{Error, Result, Zone, ZoneId};
use tracing::{debug, info};

use crate::client::CloudflareClient;

/// Whether `zone` should be resolved as a domain name
pub fn is_domain(zone: &str) -> bool {
    zone.contains('.')
}

/// Pick the id of the zone whose name equals `domain`
///
/// The match is exact and case-sensitive; the first match wins.
pub fn find_zone_id(zones: &[Zone], domain: &str) -> Result<ZoneId> {
    let zone = zones
        .iter()
        .find(|zone| zone.name.as_deref() == Some(domain))
        .ok_or_else(|| {
            Error::invalid_domain(format!("cannot find zone information for {}", domain))
        })?;

    zone.id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(ZoneId::new)
        .ok_or_else(|| Error::invalid_response(format!("cannot extract zone id for {}", domain)))
}

impl CloudflareClient {
    /// List all zones visible to the credentials
    ///
    /// ```http
    /// GET /zones
    /// ```
    pub async fn list_zones(&self) -> Result<Vec<Zone>> {
        let url = self.zones_url();
        debug!("Fetching all zone information. URL={}", url);

        let zones: Vec<Zone> = self.get(&url).await?;
        debug!("Found {} zones", zones.len());
        Ok(zones)
    }

    /// Turn a zone id or domain name into a zone id
    ///
    /// No request is made when `zone_or_domain` has no ".".
    pub async fn resolve_zone(&self, zone_or_domain: &str) -> Result<ZoneId> {
        if zone_or_domain.is_empty() {
            return Err(Error::invalid_argument("zone should be set"));
        }

        if !is_domain(zone_or_domain) {
            debug!("Using zone id as given");
            return Ok(ZoneId::new(zone_or_domain));
        }

        let zones = self.list_zones().await?;
        debug!("Finding zone information for {}", zone_or_domain);
        let zone_id = find_zone_id(&zones, zone_or_domain)?;

        info!("Found zone id for {}", zone_or_domain);
        Ok(zone_id)
    }
}
