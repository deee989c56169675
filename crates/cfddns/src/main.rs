// # cfddns - Cloudflare record updater
//
// One-shot command: resolve the zone, find the record for a hostname,
// determine the address to publish and write it through the Cloudflare API.
//
// The binary is a THIN integration layer: it parses arguments, sets up
// logging and wires the core crates together. Every option can also be
// given through the environment variable listed in `--help`.
//
// ## Example
//
// ```bash
// export CFDDNS_EMAIL=me@example.com
// export CFDDNS_TOKEN=your_api_key
//
// cfddns www.example.com                     # zone "example.com", auto-detected IP
// cfddns -z 023e105f4ecef8ad9ca31a8372d0c353 -r AAAA -i 2001:db8::1 v6.example.com
// ```

use anyhow::{Context, Result};
use cfddns_core::config::{
    DEFAULT_API_BASE, DEFAULT_API_VERSION, DEFAULT_IP_URL, DEFAULT_TIMEOUT_SECS, default_zone_for,
};
use cfddns_core::{
    IpSourceConfig, ProviderConfig, RecordConfig, RecordType, UpdateConfig, UpdateOutcome, Updater,
};
use cfddns_provider_cloudflare::CloudflareClient;
use clap::{Parser, ValueEnum};
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Record updated (or dry run completed), or `--help`/`--version` shown
/// - 1: Configuration or startup error, including invalid arguments
/// - 2: Runtime error (lookup or update failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CfddnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<CfddnsExitCode> for ExitCode {
    fn from(code: CfddnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Quiet,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Quiet => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cfddns", version)]
#[command(about = "A simple Cloudflare A/AAAA record updater")]
struct Args {
    /// Email address associated with the account
    #[arg(short, long, env = "CFDDNS_EMAIL", hide_env_values = true)]
    email: String,

    /// API key for the account
    #[arg(short, long, env = "CFDDNS_TOKEN", hide_env_values = true)]
    token: String,

    /// Zone id or domain name [default: the host without its first label]
    #[arg(short, long, env = "CFDDNS_ZONE")]
    zone: Option<String>,

    /// DNS record type (A or AAAA)
    #[arg(short = 'r', long = "rtype", env = "CFDDNS_RECORD_TYPE", default_value = "A")]
    record_type: RecordType,

    /// Time to live for the DNS record (1 = automatic)
    #[arg(short = 'l', long, env = "CFDDNS_TTL", default_value_t = 1)]
    ttl: u32,

    /// DNS record content, defaults to auto detection of the public IP
    #[arg(short, long, env = "CFDDNS_IP")]
    ip: Option<IpAddr>,

    /// DNS only, no Cloudflare proxy
    #[arg(short = 'p', long, env = "CFDDNS_NOT_PROXIED")]
    not_proxied: bool,

    /// Look up zone and record but do not write anything
    #[arg(long, env = "CFDDNS_DRY_RUN")]
    dry_run: bool,

    /// Set logging level
    #[arg(short = 'g', long = "log", env = "CFDDNS_LOG", value_enum, default_value_t = LogLevel::Info)]
    log: LogLevel,

    /// Cloudflare API root, without the version segment
    #[arg(long, env = "CFDDNS_API_URL", default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Cloudflare API version
    #[arg(long, env = "CFDDNS_API_VERSION", default_value_t = DEFAULT_API_VERSION)]
    api_version: u32,

    /// HTTP timeout for API requests, in seconds
    #[arg(long, env = "CFDDNS_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Service returning the public IP as plain text
    #[arg(long, env = "CFDDNS_IP_URL", default_value = DEFAULT_IP_URL)]
    ip_url: String,

    /// DNS record name (e.g. www.example.com)
    host: String,
}

/// Exit code for a failed argument parse
///
/// Usage errors map to 1 rather than clap's own 2.
fn parse_error_exit_code(err: &clap::Error) -> CfddnsExitCode {
    if err.use_stderr() {
        CfddnsExitCode::ConfigError
    } else {
        CfddnsExitCode::Success
    }
}

impl Args {
    /// Turn parsed arguments into the update configuration
    fn into_config(self) -> UpdateConfig {
        let zone = self
            .zone
            .unwrap_or_else(|| default_zone_for(&self.host).to_string());

        let ip_source = match self.ip {
            Some(ip) => IpSourceConfig::Static { ip },
            None => IpSourceConfig::Http { url: self.ip_url },
        };

        UpdateConfig {
            provider: ProviderConfig::Cloudflare {
                email: self.email,
                api_token: self.token,
                zone,
                api_version: self.api_version,
                base_url: self.api_url,
                timeout_secs: self.timeout,
            },
            ip_source,
            record: RecordConfig::new(self.host)
                .with_record_type(self.record_type)
                .with_ttl(self.ttl)
                .with_proxied(!self.not_proxied),
            dry_run: self.dry_run,
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return parse_error_exit_code(&e).into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::from(args.log))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CfddnsExitCode::ConfigError.into();
    }

    let config = args.into_config();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        return CfddnsExitCode::ConfigError.into();
    }

    // Every request is sequential; a single-threaded runtime is enough
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CfddnsExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(config)) {
        Ok(outcome) => {
            if outcome.dry_run {
                info!("[DRY-RUN] {} would point to {}", outcome.host, outcome.ip);
            } else {
                info!("{} now points to {}", outcome.host, outcome.ip);
            }
            CfddnsExitCode::Success.into()
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            CfddnsExitCode::RuntimeError.into()
        }
    }
}

/// Resolve the zone, then determine the address and publish it
async fn run(config: UpdateConfig) -> Result<UpdateOutcome> {
    debug!("Initializing Cloudflare client");
    let client = CloudflareClient::from_config(&config.provider)
        .context("failed to create Cloudflare client")?;

    let zone = config.provider.zone();
    let provider = client
        .open(zone)
        .await
        .with_context(|| format!("failed to resolve zone {}", zone))?
        .with_dry_run(config.dry_run);

    let ip_source = cfddns_ip_http::from_config(&config.ip_source)?;
    let updater = Updater::new(ip_source, Box::new(provider), config.record)?;

    debug!("Updating the DNS entry");
    let outcome = updater
        .run_once()
        .await
        .context("failed to update DNS record")?;

    Ok(outcome)
}
