//! DNS record lookup and update calls
//!
//! Lookups list every record in the zone (first page only) and match on
//! the lower-cased hostname. Nothing is cached between calls.

use cfddns_core::{DnsRecord, Error, RecordId, RecordType, RecordUpdate, Result, ZoneId};
use serde::Serialize;
use tracing::debug;

use crate::client::CloudflareClient;

/// Body of `PUT /zones/:zone_id/dns_records/:record_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload<'a> {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
    pub proxied: bool,
}

impl<'a> From<&'a RecordUpdate> for RecordPayload<'a> {
    fn from(update: &'a RecordUpdate) -> Self {
        Self {
            record_type: update.record_type,
            name: &update.host,
            content: &update.content,
            ttl: update.ttl,
            proxied: update.proxied,
        }
    }
}

/// Find the record named `host`, compared in lower case
pub fn find_record<'r>(records: &'r [DnsRecord], host: &str) -> Result<&'r DnsRecord> {
    let host = host.to_lowercase();

    records
        .iter()
        .find(|record| record.name.as_deref() == Some(host.as_str()))
        .ok_or_else(|| Error::record_not_found(format!("cannot find DNS record for {}", host)))
}

/// Extract the provider id of a listed record
pub fn record_id(record: &DnsRecord, host: &str) -> Result<RecordId> {
    record
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(RecordId::new)
        .ok_or_else(|| {
            Error::invalid_response(format!("cannot extract DNS record id for {}", host))
        })
}

impl CloudflareClient {
    /// List the records of a zone
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records
    /// ```
    pub async fn list_records(&self, zone_id: &ZoneId) -> Result<Vec<DnsRecord>> {
        let url = self.dns_records_url(zone_id);
        debug!("Fetching all DNS records. URL={}", url);

        let records: Vec<DnsRecord> = self.get(&url).await?;
        debug!("Found {} DNS records", records.len());
        Ok(records)
    }

    /// Replace an existing record
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// { "type": "A", "name": "...", "content": "...", "ttl": 1, "proxied": true }
    /// ```
    pub async fn put_record(
        &self,
        zone_id: &ZoneId,
        record_id: &RecordId,
        payload: &RecordPayload<'_>,
    ) -> Result<DnsRecord> {
        let url = self.record_url(zone_id, record_id);
        debug!(
            "Updating DNS record, sending type={} name={} content={} ttl={} proxied={}",
            payload.record_type, payload.name, payload.content, payload.ttl, payload.proxied
        );

        self.put(&url, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfddns_core::ErrorKind;
    use serde_json::json;

    fn record(id: Option<&str>, name: &str) -> DnsRecord {
        serde_json::from_value(json!({
            "id": id,
            "name": name,
            "type": "A",
            "content": "198.51.100.1",
        }))
        .unwrap()
    }

    #[test]
    fn test_lookup_lower_cases_host() {
        let records = vec![record(Some("r0"), "example.com"), record(Some("r1"), "www.example.com")];

        let found = find_record(&records, "WWW.Example.com").unwrap();
        assert_eq!(record_id(found, "WWW.Example.com").unwrap(), RecordId::new("r1"));
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let records = vec![record(Some("r0"), "example.com")];
        let err = find_record(&records, "mail.example.com").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RecordNotFound);
    }

    #[test]
    fn test_record_without_id_is_invalid_response() {
        let records = vec![record(None, "www.example.com")];
        let found = find_record(&records, "www.example.com").unwrap();
        let err = record_id(found, "www.example.com").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_payload_shape() {
        let update = RecordUpdate::new("www.example.com", "203.0.113.7");
        let payload = RecordPayload::from(&update);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "A",
                "name": "www.example.com",
                "content": "203.0.113.7",
                "ttl": 1,
                "proxied": true,
            })
        );
    }

    #[test]
    fn test_payload_keeps_host_case() {
        let update = RecordUpdate::new("WWW.Example.com", "203.0.113.7")
            .with_record_type(RecordType::Aaaa)
            .with_proxied(false);
        let payload = RecordPayload::from(&update);

        assert_eq!(payload.name, "WWW.Example.com");
        assert_eq!(payload.record_type, RecordType::Aaaa);
        assert!(!payload.proxied);
    }
}
