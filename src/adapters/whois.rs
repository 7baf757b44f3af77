//! Port-43 WHOIS client.
//!
//! The configured server (IANA by default) is asked first. If it answers with
//! a `refer:` line the registry it names is asked next, and that answer is
//! parsed. Only one referral is followed.

use crate::config::ProvidersConfig;
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub const WHOIS_PORT: u16 = 43;
const MAX_RESPONSE_BYTES: u64 = 256 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WhoisRecord {
    pub registrar: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub name_servers: Option<Vec<String>>,
    pub status: Option<Vec<String>>,
    pub registrant_name: Option<String>,
    pub registrant_org: Option<String>,
    pub registrant_country: Option<String>,
}

impl WhoisRecord {
    fn is_empty(&self) -> bool {
        *self == WhoisRecord::default()
    }
}

#[derive(Debug, Clone)]
pub struct WhoisClient {
    server: String,
    timeout: Duration,
}

impl WhoisClient {
    pub fn new(config: &ProvidersConfig) -> Self {
        Self {
            server: config.whois_server.clone(),
            timeout: config.timeout(),
        }
    }

    pub async fn query(&self, server: &str, query: &str) -> Result<String> {
        let address = with_default_port(server);
        tracing::debug!("WHOIS query for {} at {}", query, address);

        let mut stream = TcpStream::connect(&address).await?;
        stream.write_all(format!("{}\r\n", query).as_bytes()).await?;

        let mut raw = Vec::new();
        (&mut stream).take(MAX_RESPONSE_BYTES).read_to_end(&mut raw).await?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let lookup = async {
            let first = self.query(&self.server, domain).await?;
            let response = match find_referral(&first) {
                Some(next) if next != self.server => self.query(&next, domain).await?,
                _ => first,
            };
            parse_whois(&response).ok_or_else(|| PortalError::WhoisError {
                message: format!("no registration data for {}", domain),
            })
        };

        tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| PortalError::WhoisError {
                message: format!("timed out after {:?}", self.timeout),
            })?
    }
}

pub struct WhoisProvider {
    client: WhoisClient,
}

impl WhoisProvider {
    pub fn new(client: WhoisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Provider for WhoisProvider {
    fn name(&self) -> &'static str {
        "whois"
    }

    async fn lookup(&self, domain: &str) -> ProviderOutcome {
        match self.client.lookup(domain).await {
            Ok(record) => ProviderOutcome::success(&record),
            Err(e) => {
                tracing::warn!("WHOIS error: {}", e);
                ProviderOutcome::Unavailable
            }
        }
    }
}

fn with_default_port(server: &str) -> String {
    match server.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => server.to_string(),
        _ => format!("{}:{}", server, WHOIS_PORT),
    }
}

fn fields(text: &str) -> impl Iterator<Item = (String, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('%') && !line.starts_with('#') && !line.starts_with(">>>"))
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim()))
        .filter(|(_, value)| !value.is_empty())
}

pub fn find_referral(text: &str) -> Option<String> {
    fields(text)
        .find(|(key, _)| key == "refer" || key == "whois")
        .map(|(_, value)| value.to_string())
}

pub fn parse_whois(text: &str) -> Option<WhoisRecord> {
    let mut record = WhoisRecord::default();
    let mut name_servers: Vec<String> = Vec::new();
    let mut statuses: Vec<String> = Vec::new();

    for (key, value) in fields(text) {
        match key.as_str() {
            "registrar" | "registrar name" | "sponsoring registrar" => {
                set_once(&mut record.registrar, value);
            }
            "creation date" | "created" | "created on" | "registered on" | "registration time"
            | "domain registration date" => {
                set_once(&mut record.creation_date, &normalize_date(value));
            }
            "registry expiry date"
            | "registrar registration expiration date"
            | "expiration date"
            | "expiry date"
            | "expires"
            | "expires on"
            | "paid-till"
            | "expiration time" => {
                set_once(&mut record.expiration_date, &normalize_date(value));
            }
            "name server" | "nserver" | "nameserver" | "name servers" => {
                if let Some(host) = value.split_whitespace().next() {
                    let host = host.trim_end_matches('.').to_ascii_lowercase();
                    if !name_servers.contains(&host) {
                        name_servers.push(host);
                    }
                }
            }
            "domain status" | "status" => {
                let status = value.to_string();
                if !statuses.contains(&status) {
                    statuses.push(status);
                }
            }
            "registrant name" => set_once(&mut record.registrant_name, value),
            "registrant organization" | "registrant organisation" => {
                set_once(&mut record.registrant_org, value);
            }
            "registrant country" | "registrant country/economy" => {
                set_once(&mut record.registrant_country, value);
            }
            _ => {}
        }
    }

    if !name_servers.is_empty() {
        record.name_servers = Some(name_servers);
    }
    if !statuses.is_empty() {
        record.status = Some(statuses);
    }

    (!record.is_empty()).then_some(record)
}

fn set_once(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

/// Renders registry timestamps as `YYYY-MM-DD HH:MM:SS`; unknown formats pass through.
pub fn normalize_date(value: &str) -> String {
    const OUTPUT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return parsed.naive_utc().format(OUTPUT).to_string();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y.%m.%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return parsed.format(OUTPUT).to_string();
        }
    }
    for format in ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
                return midnight.format(OUTPUT).to_string();
            }
        }
    }
    value.to_string()
}
