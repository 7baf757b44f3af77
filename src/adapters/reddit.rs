use crate::adapters::http;
use crate::config::ProvidersConfig;
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const PROFILE_URL_PREFIX: &str = "https://reddit.com/u/";

#[derive(Debug, Deserialize)]
struct AboutResponse {
    data: AboutData,
}

#[derive(Debug, Deserialize)]
struct AboutData {
    created_utc: f64,
    comment_karma: i64,
    link_karma: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedditProfile {
    pub exists: bool,
    pub created: f64,
    pub comment_karma: i64,
    pub link_karma: i64,
    pub profile_url: String,
}

pub struct RedditProvider {
    client: Client,
    base_url: String,
}

impl RedditProvider {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.reddit_base_url.clone(),
        })
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<Option<RedditProfile>> {
        let url = http::endpoint(&self.base_url, &["user", username, "about.json"])?;
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        // all three fields are required; a partial body counts as no profile
        let about: AboutResponse = response.json().await?;
        Ok(Some(RedditProfile {
            exists: true,
            created: about.data.created_utc,
            comment_karma: about.data.comment_karma,
            link_karma: about.data.link_karma,
            profile_url: format!("{}{}", PROFILE_URL_PREFIX, username),
        }))
    }
}

#[async_trait]
impl Provider for RedditProvider {
    fn name(&self) -> &'static str {
        "reddit"
    }

    async fn lookup(&self, username: &str) -> ProviderOutcome {
        match self.fetch_profile(username).await {
            Ok(Some(profile)) => ProviderOutcome::success(&profile),
            Ok(None) => ProviderOutcome::Unavailable,
            Err(e) => {
                tracing::debug!("Reddit lookup for {} failed: {}", username, e);
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

    fn provider_for(base_url: String) -> RedditProvider {
        let config = ProvidersConfig {
            reddit_base_url: base_url,
            timeout_seconds: 2,
            ..ProvidersConfig::default()
        };
        RedditProvider::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_about_json_is_normalized() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/user/spez/about.json");
            then.status(200).json_body(json!({
                "kind": "t2",
                "data": {
                    "name": "spez",
                    "created_utc": 1118030400.0,
                    "comment_karma": 1234,
                    "link_karma": 567
                }
            }));
        });

        let outcome = provider_for(server.base_url()).lookup("spez").await;

        api_mock.assert();
        assert_eq!(
            outcome,
            ProviderOutcome::Success(json!({
                "exists": true,
                "created": 1118030400.0,
                "comment_karma": 1234,
                "link_karma": 567,
                "profile_url": "https://reddit.com/u/spez"
            }))
        );
    }

    #[tokio::test]
    async fn test_partial_body_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/user/suspended/about.json");
            then.status(200).json_body(json!({
                "kind": "t2",
                "data": {"name": "suspended", "is_suspended": true}
            }));
        });

        let outcome = provider_for(server.base_url()).lookup("suspended").await;
        assert!(outcome.is_unavailable());
    }

    #[tokio::test]
    async fn test_not_found_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/user/nobody/about.json");
            then.status(404);
        });

        let outcome = provider_for(server.base_url()).lookup("nobody").await;
        assert!(outcome.is_unavailable());
    }
}
