use crate::adapters::http;
use crate::config::ProvidersConfig;
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// ip-api.com lookup, passed through as returned. No key required.
pub struct GeolocationProvider {
    client: Client,
    base_url: String,
}

impl GeolocationProvider {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.ip_api_base_url.clone(),
        })
    }

    async fn fetch(&self, ip: &str) -> Result<Option<Value>> {
        let url = http::endpoint(&self.base_url, &["json", ip])?;
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl Provider for GeolocationProvider {
    fn name(&self) -> &'static str {
        "geolocation"
    }

    async fn lookup(&self, ip: &str) -> ProviderOutcome {
        match self.fetch(ip).await {
            Ok(Some(body)) => ProviderOutcome::from_payload(body),
            Ok(None) => ProviderOutcome::Unavailable,
            Err(e) => {
                tracing::debug!("geolocation lookup for {} failed: {}", ip, e);
                ProviderOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn provider_for(base_url: String) -> GeolocationProvider {
        let config = ProvidersConfig {
            ip_api_base_url: base_url,
            timeout_seconds: 2,
            ..ProvidersConfig::default()
        };
        GeolocationProvider::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_body_is_passed_through() {
        let server = MockServer::start();
        let body = json!({
            "status": "success",
            "country": "United States",
            "city": "Ashburn",
            "isp": "Google LLC",
            "query": "8.8.8.8"
        });
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/json/8.8.8.8");
            then.status(200).json_body(body.clone());
        });

        let outcome = provider_for(server.base_url()).lookup("8.8.8.8").await;

        api_mock.assert();
        assert_eq!(outcome, ProviderOutcome::Success(body));
    }

    #[tokio::test]
    async fn test_failed_status_body_is_still_data() {
        // ip-api reports bad input in a 200 body
        let server = MockServer::start();
        let body = json!({"status": "fail", "message": "invalid query", "query": "nope"});
        server.mock(|when, then| {
            when.method(GET).path("/json/nope");
            then.status(200).json_body(body.clone());
        });

        let outcome = provider_for(server.base_url()).lookup("nope").await;
        assert_eq!(outcome, ProviderOutcome::Success(body));
    }

    #[tokio::test]
    async fn test_empty_body_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/json/10.0.0.1");
            then.status(200).json_body(json!({}));
        });

        let outcome = provider_for(server.base_url()).lookup("10.0.0.1").await;
        assert!(outcome.is_unavailable());
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/json/1.1.1.1");
            then.status(503);
        });

        let outcome = provider_for(server.base_url()).lookup("1.1.1.1").await;
        assert!(outcome.is_unavailable());
    }
}
