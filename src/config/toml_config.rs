use crate::utils::error::{PortalError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Upper bound for every provider call, network or not.
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub github_base_url: String,
    pub reddit_base_url: String,
    pub ip_api_base_url: String,
    pub hibp_base_url: String,
    pub ipinfo_base_url: String,
    pub shodan_base_url: String,
    /// `host:port` of the first WHOIS server asked; referrals are followed from there.
    pub whois_server: String,
    /// Resolver to query instead of the system configuration.
    pub dns_nameserver: Option<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("osint-portal/", env!("CARGO_PKG_VERSION")).to_string(),
            github_base_url: "https://api.github.com".to_string(),
            reddit_base_url: "https://www.reddit.com".to_string(),
            ip_api_base_url: "http://ip-api.com".to_string(),
            hibp_base_url: "https://haveibeenpwned.com/api/v3".to_string(),
            ipinfo_base_url: "https://ipinfo.io".to_string(),
            shodan_base_url: "https://api.shodan.io".to_string(),
            whois_server: "whois.iana.org:43".to_string(),
            dns_nameserver: None,
        }
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn nameserver(&self) -> Result<Option<SocketAddr>> {
        self.dns_nameserver
            .as_deref()
            .map(|addr| validation::validate_socket_addr("providers.dns_nameserver", addr))
            .transpose()
    }
}

impl PortalConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortalError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PortalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_BASE_URL})
    fn substitute_env_vars(content: &str) -> String {
        use once_cell::sync::Lazy;
        use regex::Regex;
        static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for PortalConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        let providers = &self.providers;
        validation::validate_range(
            "providers.timeout_seconds",
            providers.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_non_empty_string("providers.user_agent", &providers.user_agent)?;

        for (field, url) in [
            ("providers.github_base_url", &providers.github_base_url),
            ("providers.reddit_base_url", &providers.reddit_base_url),
            ("providers.ip_api_base_url", &providers.ip_api_base_url),
            ("providers.hibp_base_url", &providers.hibp_base_url),
            ("providers.ipinfo_base_url", &providers.ipinfo_base_url),
            ("providers.shodan_base_url", &providers.shodan_base_url),
        ] {
            validation::validate_url(field, url)?;
        }

        validation::validate_non_empty_string("providers.whois_server", &providers.whois_server)?;
        providers.nameserver()?;

        Ok(())
    }
}
