use crate::adapters::http;
use crate::config::ProvidersConfig;
use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct GithubUser {
    name: Option<String>,
    bio: Option<String>,
    followers: Option<u64>,
    following: Option<u64>,
    public_repos: Option<u64>,
    created_at: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    blog: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GithubProfile {
    pub exists: bool,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub public_repos: Option<u64>,
    pub created_at: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
}

impl From<GithubUser> for GithubProfile {
    fn from(user: GithubUser) -> Self {
        Self {
            exists: true,
            name: user.name,
            bio: user.bio,
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            created_at: user.created_at,
            avatar_url: user.avatar_url,
            profile_url: user.html_url,
            blog: user.blog,
            location: user.location,
        }
    }
}

pub struct GithubProvider {
    client: Client,
    base_url: String,
}

impl GithubProvider {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.github_base_url.clone(),
        })
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<Option<GithubProfile>> {
        let url = http::endpoint(&self.base_url, &["users", username])?;
        tracing::debug!("Making GitHub request to: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::debug!("GitHub responded {} for {}", response.status(), username);
            return Ok(None);
        }

        let user: GithubUser = response.json().await?;
        Ok(Some(user.into()))
    }
}

#[async_trait]
impl Provider for GithubProvider {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn lookup(&self, username: &str) -> ProviderOutcome {
        match self.fetch_profile(username).await {
            Ok(Some(profile)) => ProviderOutcome::success(&profile),
            Ok(None) => ProviderOutcome::Unavailable,
            Err(e) => {
                tracing::error!("GitHub API error: {}", e);
                ProviderOutcome::Unavailable
            }
        }
    }
}
