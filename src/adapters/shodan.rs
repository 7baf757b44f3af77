use crate::adapters::http;
use crate::config::{Credentials, ProvidersConfig};
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ApiHost {
    ip_str: Option<String>,
    org: Option<String>,
    os: Option<String>,
    #[serde(default)]
    ports: Vec<u16>,
    #[serde(default)]
    vulns: Vec<String>,
    #[serde(default)]
    data: Vec<ApiBanner>,
}

#[derive(Debug, Deserialize)]
struct ApiBanner {
    port: Option<u16>,
    transport: Option<String>,
    product: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposedService {
    pub port: Option<u16>,
    pub protocol: Option<String>,
    pub service: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostReport {
    pub ip: Option<String>,
    pub organization: Option<String>,
    pub operating_system: Option<String>,
    pub ports: Vec<u16>,
    pub vulnerabilities: Vec<String>,
    pub services: Vec<ExposedService>,
}

impl From<ApiHost> for HostReport {
    fn from(host: ApiHost) -> Self {
        Self {
            ip: host.ip_str,
            organization: host.org,
            operating_system: host.os,
            ports: host.ports,
            vulnerabilities: host.vulns,
            services: host
                .data
                .into_iter()
                .map(|banner| ExposedService {
                    port: banner.port,
                    protocol: banner.transport,
                    service: banner.product,
                    version: banner.version,
                })
                .collect(),
        }
    }
}

// Placeholder host exposure served when Shodan cannot be asked. Fictional.
pub const MOCK_ORGANIZATION: &str = "Example ISP";
pub const MOCK_OPERATING_SYSTEM: &str = "Linux 3.x";
pub const MOCK_PORTS: [u16; 4] = [22, 80, 443, 8080];
pub const MOCK_VULNERABILITIES: [&str; 2] = ["CVE-2021-44228", "CVE-2021-4034"];
pub const MOCK_SERVICES: [(u16, &str, &str, &str); 3] = [
    (22, "tcp", "OpenSSH", "7.4"),
    (80, "tcp", "nginx", "1.18.0"),
    (443, "tcp", "nginx", "1.18.0"),
];

pub fn mock_host_report(ip: &str) -> HostReport {
    HostReport {
        ip: Some(ip.to_string()),
        organization: Some(MOCK_ORGANIZATION.to_string()),
        operating_system: Some(MOCK_OPERATING_SYSTEM.to_string()),
        ports: MOCK_PORTS.to_vec(),
        vulnerabilities: MOCK_VULNERABILITIES.iter().map(|v| v.to_string()).collect(),
        services: MOCK_SERVICES
            .iter()
            .map(|(port, protocol, service, version)| ExposedService {
                port: Some(*port),
                protocol: Some(protocol.to_string()),
                service: Some(service.to_string()),
                version: Some(version.to_string()),
            })
            .collect(),
    }
}

pub struct ShodanService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ShodanService {
    pub fn new(config: &ProvidersConfig, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.shodan_base_url.clone(),
            api_key: credentials.shodan_api_key.clone(),
        })
    }

    pub async fn get_host_info(&self, ip: &str) -> ProviderOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return ProviderOutcome::mock(&mock_host_report(ip));
        };

        match self.fetch_live(api_key, ip).await {
            Ok(Some(report)) => ProviderOutcome::success(&report),
            Ok(None) => ProviderOutcome::mock(&mock_host_report(ip)),
            Err(e) => {
                tracing::debug!("Shodan request failed, serving mock data: {}", e);
                ProviderOutcome::mock(&mock_host_report(ip))
            }
        }
    }

    async fn fetch_live(&self, api_key: &str, ip: &str) -> Result<Option<HostReport>> {
        let url = http::endpoint(&self.base_url, &["shodan", "host", ip])?;
        let response = self
            .client
            .get(url)
            .query(&[("key", api_key)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::debug!("Shodan responded {}", response.status());
            return Ok(None);
        }

        let host: ApiHost = response.json().await?;
        Ok(Some(host.into()))
    }
}

#[async_trait]
impl Provider for ShodanService {
    fn name(&self) -> &'static str {
        "shodan"
    }

    async fn lookup(&self, ip: &str) -> ProviderOutcome {
        self.get_host_info(ip).await
    }

    fn fallback(&self, ip: &str) -> ProviderOutcome {
        ProviderOutcome::mock(&mock_host_report(ip))
    }
}
