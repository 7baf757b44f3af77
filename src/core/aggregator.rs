use crate::domain::model::{AggregateResult, IdentifierKind, LookupResponse, ProviderOutcome};
use crate::domain::ports::Provider;
use crate::utils::error::{PortalError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Fans one identifier out to a fixed provider list and collects the outcomes.
///
/// All providers run concurrently. Their outcomes are collected in list order,
/// so the results object keeps the same key order on every call. A provider
/// that outlives `timeout` is replaced by its fallback.
pub struct Aggregator {
    kind: IdentifierKind,
    providers: Vec<Arc<dyn Provider>>,
    timeout: Duration,
}

impl Aggregator {
    pub fn new(kind: IdentifierKind, providers: Vec<Arc<dyn Provider>>, timeout: Duration) -> Self {
        Self {
            kind,
            providers,
            timeout,
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn run(&self, identifier: &str) -> Result<LookupResponse> {
        tracing::debug!(
            "{} lookup for {} across {} providers",
            self.kind,
            identifier,
            self.providers.len()
        );

        let tasks: Vec<_> = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let identifier = identifier.to_string();
                let timeout = self.timeout;
                tokio::spawn(async move { bounded_lookup(provider.as_ref(), &identifier, timeout).await })
            })
            .collect();

        let mut results = AggregateResult::new();
        for (provider, task) in self.providers.iter().zip(tasks) {
            let outcome = task.await.map_err(|e| {
                tracing::error!("{} provider task failed: {}", provider.name(), e);
                PortalError::AggregationError {
                    message: format!("{} lookup could not be completed", self.kind),
                }
            })?;
            tracing::debug!("{} -> {}", provider.name(), outcome.status());
            results.push(provider.name(), provider.presence(), outcome);
        }

        Ok(LookupResponse {
            kind: self.kind,
            identifier: identifier.to_string(),
            results,
        })
    }
}

async fn bounded_lookup(provider: &dyn Provider, identifier: &str, timeout: Duration) -> ProviderOutcome {
    match tokio::time::timeout(timeout, provider.lookup(identifier)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!("{} did not answer within {:?}", provider.name(), timeout);
            provider.fallback(identifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Presence;
    use async_trait::async_trait;
    use serde_json::json;

    struct Fixed {
        name: &'static str,
        presence: Presence,
        outcome: ProviderOutcome,
        delay: Duration,
    }

    impl Fixed {
        fn new(name: &'static str, outcome: ProviderOutcome) -> Self {
            Self {
                name,
                presence: Presence::Optional,
                outcome,
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl Provider for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn presence(&self) -> Presence {
            self.presence
        }

        async fn lookup(&self, _identifier: &str) -> ProviderOutcome {
            tokio::time::sleep(self.delay).await;
            self.outcome.clone()
        }

        fn fallback(&self, identifier: &str) -> ProviderOutcome {
            ProviderOutcome::MockSubstituted(json!({ "fallback_for": identifier }))
        }
    }

    struct Panics;

    #[async_trait]
    impl Provider for Panics {
        fn name(&self) -> &'static str {
            "panics"
        }

        async fn lookup(&self, _identifier: &str) -> ProviderOutcome {
            panic!("provider bug")
        }
    }

    fn aggregator(providers: Vec<Arc<dyn Provider>>) -> Aggregator {
        Aggregator::new(IdentifierKind::Username, providers, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_outcomes_follow_provider_order() {
        let mut slow = Fixed::new("first", ProviderOutcome::Success(json!(1)));
        slow.delay = Duration::from_millis(100);
        let agg = aggregator(vec![
            Arc::new(slow),
            Arc::new(Fixed::new("second", ProviderOutcome::Success(json!(2)))),
        ]);

        let response = agg.run("octocat").await.unwrap();
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"username":"octocat","results":{"first":1,"second":2}}"#);
        assert_eq!(agg.provider_names(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_unavailable_provider_does_not_fail_the_lookup() {
        let mut always = Fixed::new("always", ProviderOutcome::Unavailable);
        always.presence = Presence::Always;
        let agg = aggregator(vec![
            Arc::new(Fixed::new("gone", ProviderOutcome::Unavailable)),
            Arc::new(always),
        ]);

        let response = agg.run("octocat").await.unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"username": "octocat", "results": {"always": null}})
        );
    }

    #[tokio::test]
    async fn test_providers_run_concurrently() {
        let providers: Vec<Arc<dyn Provider>> = (0..3)
            .map(|i| {
                let mut p = Fixed::new(["a", "b", "c"][i], ProviderOutcome::Success(json!(i)));
                p.delay = Duration::from_millis(300);
                Arc::new(p) as Arc<dyn Provider>
            })
            .collect();
        let agg = aggregator(providers);

        let started = std::time::Instant::now();
        agg.run("x").await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let mut stuck = Fixed::new("stuck", ProviderOutcome::Success(json!("late")));
        stuck.delay = Duration::from_secs(30);
        let agg = Aggregator::new(
            IdentifierKind::Ip,
            vec![Arc::new(stuck)],
            Duration::from_millis(100),
        );

        let response = agg.run("1.2.3.4").await.unwrap();
        let outcome = response.results.outcome("stuck").unwrap();
        assert!(outcome.is_mock());
        assert_eq!(outcome.data().unwrap(), &json!({"fallback_for": "1.2.3.4"}));
    }

    #[tokio::test]
    async fn test_panicking_provider_is_an_aggregation_error() {
        let agg = aggregator(vec![
            Arc::new(Fixed::new("ok", ProviderOutcome::Success(json!(true)))),
            Arc::new(Panics),
        ]);

        let err = agg.run("octocat").await.unwrap_err();
        assert!(matches!(err, PortalError::AggregationError { .. }));
        assert_eq!(
            err.to_string(),
            "internal aggregation failure: username lookup could not be completed"
        );
    }
}
