// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare API v4 client used by cfddns.
//
// ## Flow
//
// 1. `CloudflareClient::new` stores credentials and the versioned API root.
//    No I/O happens here.
// 2. `CloudflareClient::open(zone)` resolves the zone. A string without a
//    "." is an opaque zone id; otherwise the zone list is fetched and the
//    entry with exactly that name is used.
// 3. `CloudflareProvider::update_record` lists the zone's records, matches
//    the lower-cased hostname, then PUTs the new content to that record.
//
// Records are only ever rewritten, never created. Nothing is retried.
//
// ## Security Requirements
//
// - Email and API key NEVER appear in logs or `Debug` output
// - Both are sent only as the `X-Auth-Email` / `X-Auth-Key` headers
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones`
// - List DNS Records: GET `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

pub mod client;
pub mod provider;
pub mod records;
pub mod response;
pub mod zone;

pub use client::{ClientOptions, CloudflareClient, Credentials};
pub use provider::CloudflareProvider;
pub use records::RecordPayload;
pub use response::{ApiMessage, Envelope, parse_and_validate};
