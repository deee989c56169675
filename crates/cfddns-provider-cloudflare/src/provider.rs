//! Cloudflare DNS provider bound to one resolved zone

use async_trait::async_trait;
use cfddns_core::{DnsProvider, DnsRecord, RecordId, RecordUpdate, Result, ZoneId};
use tracing::{debug, info};

use crate::client::CloudflareClient;
use crate::records::{RecordPayload, find_record, record_id};

/// Cloudflare DNS provider
///
/// The zone id is fixed when the provider is opened and never changes.
/// Every update re-lists the zone's records right before writing.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Perform all GET requests (zone lookup, record lookup)
/// - Log the intended PUT payload
/// - **NOT** actually modify DNS records, returning the record as listed
#[derive(Debug)]
pub struct CloudflareProvider {
    client: CloudflareClient,
    zone_id: ZoneId,
    dry_run: bool,
}

impl CloudflareClient {
    /// Resolve `zone` and bind the client to it
    ///
    /// A zone containing a "." is looked up by name, costing one request.
    /// Anything else is taken as the zone id.
    pub async fn open(self, zone: &str) -> Result<CloudflareProvider> {
        let zone_id = self.resolve_zone(zone).await?;
        Ok(CloudflareProvider::with_zone_id(self, zone_id))
    }
}

impl CloudflareProvider {
    /// Bind a client to an already known zone id
    pub fn with_zone_id(client: CloudflareClient, zone_id: ZoneId) -> Self {
        Self {
            client,
            zone_id,
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn zone_id(&self) -> &ZoneId {
        &self.zone_id
    }

    /// Look up the record named `host` in the bound zone
    pub async fn find_record(&self, host: &str) -> Result<DnsRecord> {
        let records = self.client.list_records(&self.zone_id).await?;
        debug!("Finding DNS record for {}", host.to_lowercase());
        find_record(&records, host).cloned()
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn find_record_id(&self, host: &str) -> Result<RecordId> {
        let record = self.find_record(host).await?;
        let id = record_id(&record, host)?;
        info!("Found host id for {}", host);
        Ok(id)
    }

    async fn update_record(&self, update: &RecordUpdate) -> Result<DnsRecord> {
        info!(
            "Updating DNS record for {} [mode: {}]",
            update.host,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        let current = self.find_record(&update.host).await?;
        let id = record_id(&current, &update.host)?;
        info!("Found host id for {}", update.host);

        let payload = RecordPayload::from(update);

        if self.dry_run {
            info!(
                "[DRY-RUN] Would send PUT to record {} with payload: {}",
                id,
                serde_json::to_string(&payload).unwrap_or_default()
            );
            return Ok(current);
        }

        let updated = self.client.put_record(&self.zone_id, &id, &payload).await?;
        info!("Update successful");
        Ok(updated)
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientOptions, Credentials};
    use cfddns_core::ErrorKind;
    use serde_json::json;
    use tokio_test::assert_ok;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CloudflareClient {
        CloudflareClient::new(
            Credentials::new("me@example.com", "key").unwrap(),
            ClientOptions {
                base_url: server.uri(),
                ..ClientOptions::default()
            },
        )
        .unwrap()
    }

    async fn mount_zones(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/v4/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{ "id": "z1", "name": "example.com" }],
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_records(server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/v4/zones/z1/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [
                    { "id": "r0", "name": "example.com", "type": "A", "content": "198.51.100.1" },
                    { "id": "r1", "name": "www.example.com", "type": "A", "content": "198.51.100.1",
                      "ttl": 1, "proxied": true },
                ],
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_end_to_end_update() {
        let server = MockServer::start().await;
        mount_zones(&server).await;
        mount_records(&server, 1).await;

        let updated = json!({
            "id": "r1",
            "name": "www.example.com",
            "type": "A",
            "content": "203.0.113.7",
            "ttl": 1,
            "proxied": true,
            "modified_on": "2026-01-01T00:00:00Z",
        });

        Mock::given(method("PUT"))
            .and(path("/v4/zones/z1/dns_records/r1"))
            .and(body_json(json!({
                "type": "A",
                "name": "www.example.com",
                "content": "203.0.113.7",
                "ttl": 1,
                "proxied": true,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "messages": [],
                "result": updated.clone(),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = client(&server).open("example.com").await.unwrap();
        assert_eq!(provider.zone_id().as_str(), "z1");

        let update = RecordUpdate::new("www.example.com", "203.0.113.7");
        let record = provider.update_record(&update).await.unwrap();

        assert_eq!(serde_json::to_value(&record).unwrap(), updated);
    }

    #[tokio::test]
    async fn test_each_update_looks_the_record_up_again() {
        let server = MockServer::start().await;
        mount_records(&server, 2).await;

        Mock::given(method("PUT"))
            .and(path("/v4/zones/z1/dns_records/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": { "id": "r1", "name": "www.example.com" },
            })))
            .expect(2)
            .mount(&server)
            .await;

        let provider = client(&server).open("z1").await.unwrap();
        let update = RecordUpdate::new("www.example.com", "203.0.113.7");

        assert_ok!(provider.update_record(&update).await);
        assert_ok!(provider.update_record(&update).await);
    }

    #[tokio::test]
    async fn test_find_record_id_lower_cases_host() {
        let server = MockServer::start().await;
        mount_records(&server, 1).await;

        let provider = CloudflareProvider::with_zone_id(client(&server), ZoneId::new("z1"));
        let id = provider.find_record_id("WWW.Example.com").await.unwrap();
        assert_eq!(id, RecordId::new("r1"));
    }

    #[tokio::test]
    async fn test_unknown_host_never_puts() {
        let server = MockServer::start().await;
        mount_records(&server, 1).await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = CloudflareProvider::with_zone_id(client(&server), ZoneId::new("z1"));
        let update = RecordUpdate::new("mail.example.com", "203.0.113.7");
        let err = provider.update_record(&update).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RecordNotFound);
    }

    #[tokio::test]
    async fn test_dry_run_skips_put() {
        let server = MockServer::start().await;
        mount_records(&server, 1).await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = CloudflareProvider::with_zone_id(client(&server), ZoneId::new("z1"))
            .with_dry_run(true);
        assert!(provider.is_dry_run());

        let update = RecordUpdate::new("www.example.com", "203.0.113.7");
        let record = provider.update_record(&update).await.unwrap();
        assert_eq!(record.id.as_deref(), Some("r1"));
        assert_eq!(record.content.as_deref(), Some("198.51.100.1"));
    }

    #[tokio::test]
    async fn test_rejected_update_is_request_unsuccessful() {
        let server = MockServer::start().await;
        mount_records(&server, 1).await;

        Mock::given(method("PUT"))
            .and(path("/v4/zones/z1/dns_records/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "errors": [{ "code": 1004, "message": "DNS Validation Error" }],
            })))
            .mount(&server)
            .await;

        let provider = CloudflareProvider::with_zone_id(client(&server), ZoneId::new("z1"));
        let update = RecordUpdate::new("www.example.com", "not-an-ip");
        let err = provider.update_record(&update).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestUnsuccessful);
        assert!(err.to_string().contains("DNS Validation Error"));
    }

    #[tokio::test]
    async fn test_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/zones/z1/dns_records"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
            .mount(&server)
            .await;

        let provider = CloudflareProvider::with_zone_id(client(&server), ZoneId::new("z1"));
        let err = provider.find_record_id("www.example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_malformed_listing_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/zones/z1/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ truncated"))
            .mount(&server)
            .await;

        let provider = CloudflareProvider::with_zone_id(client(&server), ZoneId::new("z1"));
        let err = provider.find_record_id("www.example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport() {
        // Nothing listens on a port we just released
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = CloudflareClient::new(
            Credentials::new("me@example.com", "key").unwrap(),
            ClientOptions {
                base_url: format!("http://127.0.0.1:{}", port),
                ..ClientOptions::default()
            },
        )
        .unwrap();

        let err = client.open("example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
