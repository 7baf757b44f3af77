use crate::config::ProvidersConfig;
use crate::utils::error::{PortalError, Result};
use reqwest::Client;
use url::Url;

/// HTTP client shared by one adapter, bounded by the provider timeout.
pub fn build_client(config: &ProvidersConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(PortalError::HttpError)
}

/// Appends percent-encoded path segments to a provider base URL.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| PortalError::ConfigError {
            message: format!("base URL cannot carry a path: {}", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
