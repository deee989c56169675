//! Test doubles shared by the updater contract tests

use cfddns_core::error::{Error, Result};
use cfddns_core::traits::{DnsProvider, IpSource};
use cfddns_core::types::{DnsRecord, RecordId, RecordUpdate};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource returning a fixed address and counting calls
pub struct FixedIpSource {
    ip: IpAddr,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            ip,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the current() call counter
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<IpAddr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// An IpSource that always fails with a transport error
pub struct UnreachableIpSource;

#[async_trait::async_trait]
impl IpSource for UnreachableIpSource {
    async fn current(&self) -> Result<IpAddr> {
        Err(Error::transport("connection refused"))
    }

    fn source_name(&self) -> &'static str {
        "unreachable"
    }
}

/// A mock DnsProvider that records every update it receives
pub struct MockDnsProvider {
    updates: Arc<Mutex<Vec<RecordUpdate>>>,
    known_hosts: Vec<String>,
    dry_run: bool,
}

impl MockDnsProvider {
    /// Provider that knows the given (lower-case) hostnames
    pub fn with_hosts(hosts: &[&str]) -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
            known_hosts: hosts.iter().map(|h| h.to_string()).collect(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Shared handle to the received updates
    pub fn updates(&self) -> Arc<Mutex<Vec<RecordUpdate>>> {
        Arc::clone(&self.updates)
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn find_record_id(&self, host: &str) -> Result<RecordId> {
        let host = host.to_lowercase();
        self.known_hosts
            .iter()
            .position(|h| *h == host)
            .map(|i| RecordId::new(format!("record-{}", i)))
            .ok_or_else(|| Error::record_not_found(format!("cannot find DNS record for {}", host)))
    }

    async fn update_record(&self, update: &RecordUpdate) -> Result<DnsRecord> {
        let id = self.find_record_id(&update.host).await?;
        self.updates.lock().unwrap().push(update.clone());

        Ok(DnsRecord {
            id: Some(id.to_string()),
            name: Some(update.host.clone()),
            record_type: Some(update.record_type.to_string()),
            content: Some(update.content.clone()),
            ttl: Some(update.ttl),
            proxied: Some(update.proxied),
            extra: serde_json::Map::new(),
        })
    }

    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
