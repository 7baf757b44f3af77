//! Have I Been Pwned `breachedaccount` lookups.
//!
//! Two adapters share the endpoint. [`BreachLookupProvider`] backs the email
//! handler and returns the raw breach list or nothing. [`HibpService`] always
//! answers: it normalizes live data and falls back to a fixed mock payload.

use crate::adapters::http;
use crate::config::{Credentials, ProvidersConfig};
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const API_KEY_HEADER: &str = "hibp-api-key";
pub const LOOKUP_USER_AGENT: &str = "OSINT-Portal";
pub const SERVICE_USER_AGENT: &str = "OSINT-Tool";

fn breach_request(
    client: &Client,
    base_url: &str,
    api_key: Option<&str>,
    user_agent: &str,
    email: &str,
) -> Result<RequestBuilder> {
    let url = http::endpoint(base_url, &["breachedaccount", email])?;
    let mut request = client.get(url).header("user-agent", user_agent);
    if let Some(key) = api_key {
        request = request.header(API_KEY_HEADER, key);
    }
    Ok(request)
}

/// Raw breach list for the email handler. No mock.
pub struct BreachLookupProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BreachLookupProvider {
    pub fn new(config: &ProvidersConfig, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.hibp_base_url.clone(),
            api_key: credentials.hibp_api_key.clone(),
        })
    }

    async fn fetch(&self, email: &str) -> Result<Option<Value>> {
        let response = breach_request(
            &self.client,
            &self.base_url,
            self.api_key.as_deref(),
            LOOKUP_USER_AGENT,
            email,
        )?
        .send()
        .await?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl Provider for BreachLookupProvider {
    fn name(&self) -> &'static str {
        "breaches"
    }

    async fn lookup(&self, email: &str) -> ProviderOutcome {
        match self.fetch(email).await {
            Ok(Some(breaches)) => ProviderOutcome::from_payload(breaches),
            // failure reasons are not surfaced
            Ok(None) | Err(_) => ProviderOutcome::Unavailable,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiBreach {
    name: Option<String>,
    domain: Option<String>,
    breach_date: Option<String>,
    added_date: Option<String>,
    #[serde(default)]
    data_classes: Vec<String>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreachRecord {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub breach_date: Option<String>,
    pub added_date: Option<String>,
    pub data_classes: Vec<String>,
    pub description: Option<String>,
}

impl From<ApiBreach> for BreachRecord {
    fn from(breach: ApiBreach) -> Self {
        Self {
            name: breach.name,
            domain: breach.domain,
            breach_date: breach.breach_date,
            added_date: breach.added_date,
            data_classes: breach.data_classes,
            description: breach.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreachReport {
    pub email: String,
    pub breached: bool,
    pub breach_count: usize,
    pub breaches: Vec<BreachRecord>,
}

impl BreachReport {
    fn clean(email: &str) -> Self {
        Self {
            email: email.to_string(),
            breached: false,
            breach_count: 0,
            breaches: Vec::new(),
        }
    }
}

// Placeholder breach data served whenever HIBP cannot be asked. Fictional.
const MOCK_BREACHES: [MockBreach; 2] = [
    MockBreach {
        name: "LinkedIn",
        domain: "linkedin.com",
        breach_date: "2012-05-05",
        added_date: "2016-05-21",
        data_classes: &["Email addresses", "Passwords"],
        description: "In May 2012, LinkedIn disclosed a data breach...",
    },
    MockBreach {
        name: "Adobe",
        domain: "adobe.com",
        breach_date: "2013-10-04",
        added_date: "2013-12-04",
        data_classes: &["Email addresses", "Password hints", "Passwords", "Usernames"],
        description: "In October 2013, 153 million Adobe accounts were breached...",
    },
];

struct MockBreach {
    name: &'static str,
    domain: &'static str,
    breach_date: &'static str,
    added_date: &'static str,
    data_classes: &'static [&'static str],
    description: &'static str,
}

impl MockBreach {
    fn to_record(&self) -> BreachRecord {
        BreachRecord {
            name: Some(self.name.to_string()),
            domain: Some(self.domain.to_string()),
            breach_date: Some(self.breach_date.to_string()),
            added_date: Some(self.added_date.to_string()),
            data_classes: self.data_classes.iter().map(|c| c.to_string()).collect(),
            description: Some(self.description.to_string()),
        }
    }
}

pub fn mock_breach_report(email: &str) -> BreachReport {
    BreachReport {
        email: email.to_string(),
        breached: true,
        breach_count: MOCK_BREACHES.len(),
        breaches: MOCK_BREACHES.iter().map(MockBreach::to_record).collect(),
    }
}

/// Breach report that is never empty-handed.
pub struct HibpService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HibpService {
    pub fn new(config: &ProvidersConfig, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.hibp_base_url.clone(),
            api_key: credentials.hibp_api_key.clone(),
        })
    }

    pub async fn check_email_breaches(&self, email: &str) -> ProviderOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return ProviderOutcome::mock(&mock_breach_report(email));
        };

        match self.fetch_live(api_key, email).await {
            Ok(Some(report)) => ProviderOutcome::success(&report),
            Ok(None) => ProviderOutcome::mock(&mock_breach_report(email)),
            Err(e) => {
                tracing::debug!("HIBP request failed, serving mock data: {}", e);
                ProviderOutcome::mock(&mock_breach_report(email))
            }
        }
    }

    async fn fetch_live(&self, api_key: &str, email: &str) -> Result<Option<BreachReport>> {
        let response = breach_request(
            &self.client,
            &self.base_url,
            Some(api_key),
            SERVICE_USER_AGENT,
            email,
        )?
        .send()
        .await?;

        match response.status() {
            StatusCode::OK => {
                let breaches: Vec<ApiBreach> = response.json().await?;
                let breaches: Vec<BreachRecord> = breaches.into_iter().map(Into::into).collect();
                Ok(Some(BreachReport {
                    email: email.to_string(),
                    breached: true,
                    breach_count: breaches.len(),
                    breaches,
                }))
            }
            StatusCode::NOT_FOUND => Ok(Some(BreachReport::clean(email))),
            status => {
                tracing::debug!("HIBP responded {}", status);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Provider for HibpService {
    fn name(&self) -> &'static str {
        "hibp"
    }

    async fn lookup(&self, email: &str) -> ProviderOutcome {
        self.check_email_breaches(email).await
    }

    fn fallback(&self, email: &str) -> ProviderOutcome {
        ProviderOutcome::mock(&mock_breach_report(email))
    }
}
