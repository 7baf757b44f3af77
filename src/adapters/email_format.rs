use crate::domain::model::ProviderOutcome;
use crate::domain::ports::Provider;
use crate::utils::identifiers::validate_email;
use async_trait::async_trait;
use serde_json::json;

/// Local syntax check reported next to the breach lookup.
pub struct EmailFormatProvider;

#[async_trait]
impl Provider for EmailFormatProvider {
    fn name(&self) -> &'static str {
        "validation"
    }

    async fn lookup(&self, email: &str) -> ProviderOutcome {
        ProviderOutcome::Success(json!({ "valid": validate_email(email) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reports_format_validity() {
        assert_eq!(
            EmailFormatProvider.lookup("user@example.com").await,
            ProviderOutcome::Success(json!({"valid": true}))
        );
        assert_eq!(
            EmailFormatProvider.lookup("not-an-email").await,
            ProviderOutcome::Success(json!({"valid": false}))
        );
    }
}
