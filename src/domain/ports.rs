use crate::domain::model::{DnsRecordType, Presence, ProviderOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};

/// One external data source queried for a single identifier.
///
/// Implementations never return an error: a failed lookup becomes
/// [`ProviderOutcome::Unavailable`] or, for mock-backed services, a
/// [`ProviderOutcome::MockSubstituted`] payload.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Key used in the aggregated results object.
    fn name(&self) -> &'static str;

    fn presence(&self) -> Presence {
        Presence::Optional
    }

    async fn lookup(&self, identifier: &str) -> ProviderOutcome;

    /// Outcome recorded when the lookup does not finish in time.
    fn fallback(&self, _identifier: &str) -> ProviderOutcome {
        ProviderOutcome::Unavailable
    }
}

#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn lookup_records(&self, name: &str, record_type: DnsRecordType) -> Result<Vec<String>>;

    async fn resolve_ipv4(&self, name: &str) -> Result<Option<Ipv4Addr>>;

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Option<String>>;
}
