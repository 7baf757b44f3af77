use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use async_trait::async_trait;
use serde::Serialize;

/// Placeholder: Twitter is never queried, every username gets this note.
pub const MANUAL_VERIFICATION_NOTE: &str = "Manual verification required";
pub const PROFILE_URL_PREFIX: &str = "https://twitter.com/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterPlaceholder {
    pub exists: &'static str,
    pub profile_url: String,
    pub note: &'static str,
}

/// Builds a profile link without any network call.
pub struct TwitterProvider;

#[async_trait]
impl Provider for TwitterProvider {
    fn name(&self) -> &'static str {
        "twitter"
    }

    async fn lookup(&self, username: &str) -> ProviderOutcome {
        ProviderOutcome::mock(&TwitterPlaceholder {
            exists: "unknown",
            profile_url: format!("{}{}", PROFILE_URL_PREFIX, username),
            note: MANUAL_VERIFICATION_NOTE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_placeholder_payload() {
        let outcome = TwitterProvider.lookup("jack").await;

        assert_eq!(
            outcome,
            ProviderOutcome::MockSubstituted(json!({
                "exists": "unknown",
                "profile_url": "https://twitter.com/jack",
                "note": "Manual verification required"
            }))
        );
    }
}
