use crate::adapters::http;
use crate::config::{Credentials, ProvidersConfig};
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ApiIpInfo {
    ip: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    loc: Option<String>,
    org: Option<String>,
    postal: Option<String>,
    timezone: Option<String>,
    hostname: Option<String>,
    #[serde(default)]
    anycast: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpInfoReport {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub organization: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
    pub hostname: Option<String>,
    pub anycast: bool,
}

impl From<ApiIpInfo> for IpInfoReport {
    fn from(info: ApiIpInfo) -> Self {
        Self {
            ip: info.ip,
            city: info.city,
            region: info.region,
            country: info.country,
            location: info.loc,
            organization: info.org,
            postal: info.postal,
            timezone: info.timezone,
            hostname: info.hostname,
            anycast: info.anycast,
        }
    }
}

// Placeholder location reported when ipinfo cannot be asked. Fictional.
pub const MOCK_CITY: &str = "New York";
pub const MOCK_REGION: &str = "New York";
pub const MOCK_COUNTRY: &str = "US";
pub const MOCK_LOCATION: &str = "40.7128,-74.0060";
pub const MOCK_ORGANIZATION: &str = "AS13335 Cloudflare, Inc.";
pub const MOCK_POSTAL: &str = "10001";
pub const MOCK_TIMEZONE: &str = "America/New_York";
pub const MOCK_HOSTNAME: &str = "example.com";

pub fn mock_ip_report(ip: &str) -> IpInfoReport {
    IpInfoReport {
        ip: Some(ip.to_string()),
        city: Some(MOCK_CITY.to_string()),
        region: Some(MOCK_REGION.to_string()),
        country: Some(MOCK_COUNTRY.to_string()),
        location: Some(MOCK_LOCATION.to_string()),
        organization: Some(MOCK_ORGANIZATION.to_string()),
        postal: Some(MOCK_POSTAL.to_string()),
        timezone: Some(MOCK_TIMEZONE.to_string()),
        hostname: Some(MOCK_HOSTNAME.to_string()),
        anycast: false,
    }
}

pub struct IpInfoService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl IpInfoService {
    pub fn new(config: &ProvidersConfig, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.ipinfo_base_url.clone(),
            api_key: credentials.ipinfo_api_key.clone(),
        })
    }

    pub async fn get_ip_info(&self, ip: &str) -> ProviderOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return ProviderOutcome::mock(&mock_ip_report(ip));
        };

        match self.fetch_live(api_key, ip).await {
            Ok(Some(report)) => ProviderOutcome::success(&report),
            Ok(None) => ProviderOutcome::mock(&mock_ip_report(ip)),
            Err(e) => {
                tracing::debug!("ipinfo request failed, serving mock data: {}", e);
                ProviderOutcome::mock(&mock_ip_report(ip))
            }
        }
    }

    async fn fetch_live(&self, api_key: &str, ip: &str) -> Result<Option<IpInfoReport>> {
        let url = http::endpoint(&self.base_url, &[ip])?;
        let response = self
            .client
            .get(url)
            .query(&[("token", api_key)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::debug!("ipinfo responded {}", response.status());
            return Ok(None);
        }

        let info: ApiIpInfo = response.json().await?;
        Ok(Some(info.into()))
    }
}

#[async_trait]
impl Provider for IpInfoService {
    fn name(&self) -> &'static str {
        "ipinfo"
    }

    async fn lookup(&self, ip: &str) -> ProviderOutcome {
        self.get_ip_info(ip).await
    }

    fn fallback(&self, ip: &str) -> ProviderOutcome {
        ProviderOutcome::mock(&mock_ip_report(ip))
    }
}
