use crate::config::ProvidersConfig;
use crate::domain::model::{DnsRecordType, Presence, ProviderOutcome};
use crate::domain::ports::{NameResolver, Provider};
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::future::join_all;
use hickory_resolver::config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use serde_json::{Map, Value};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

impl From<DnsRecordType> for RecordType {
    fn from(record_type: DnsRecordType) -> Self {
        match record_type {
            DnsRecordType::A => RecordType::A,
            DnsRecordType::Aaaa => RecordType::AAAA,
            DnsRecordType::Mx => RecordType::MX,
            DnsRecordType::Txt => RecordType::TXT,
            DnsRecordType::Ns => RecordType::NS,
            DnsRecordType::Cname => RecordType::CNAME,
        }
    }
}

/// Resolver built fresh for every query, from the system configuration or
/// a single configured nameserver.
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    nameserver: Option<SocketAddr>,
    timeout: Duration,
}

impl HickoryResolver {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self {
            nameserver: config.nameserver()?,
            timeout: config.timeout(),
        })
    }

    fn build(&self) -> Result<TokioAsyncResolver> {
        let (config, mut opts) = match self.nameserver {
            Some(addr) => {
                let group = NameServerConfigGroup::from_ips_clear(&[addr.ip()], addr.port(), true);
                (ResolverConfig::from_parts(None, vec![], group), ResolverOpts::default())
            }
            None => hickory_resolver::system_conf::read_system_conf()?,
        };
        opts.timeout = self.timeout;
        opts.attempts = 1;
        opts.ip_strategy = LookupIpStrategy::Ipv4Only;

        Ok(TokioAsyncResolver::tokio(config, opts))
    }
}

fn strip_root(name: String) -> String {
    match name.strip_suffix('.') {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name,
    }
}

#[async_trait]
impl NameResolver for HickoryResolver {
    async fn lookup_records(&self, name: &str, record_type: DnsRecordType) -> Result<Vec<String>> {
        let lookup = self.build()?.lookup(name, record_type.into()).await?;
        Ok(lookup.iter().map(|rdata| rdata.to_string()).collect())
    }

    /// IP literals come back as themselves without a query.
    async fn resolve_ipv4(&self, name: &str) -> Result<Option<Ipv4Addr>> {
        let lookup = self.build()?.lookup_ip(name).await?;
        Ok(lookup.iter().find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        }))
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Option<String>> {
        let lookup = self.build()?.reverse_lookup(ip).await?;
        Ok(lookup.iter().next().map(|ptr| strip_root(ptr.to_string())))
    }
}

/// A, AAAA, MX, TXT, NS and CNAME records keyed by type.
pub struct DnsRecordsProvider {
    resolver: Arc<dyn NameResolver>,
}

impl DnsRecordsProvider {
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Provider for DnsRecordsProvider {
    fn name(&self) -> &'static str {
        "dns"
    }

    async fn lookup(&self, domain: &str) -> ProviderOutcome {
        let queries = DnsRecordType::ALL
            .iter()
            .map(|record_type| self.resolver.lookup_records(domain, *record_type));
        let answers = join_all(queries).await;

        if answers.iter().all(|answer| answer.is_err()) {
            tracing::debug!("no DNS query for {} succeeded", domain);
            return ProviderOutcome::Unavailable;
        }

        let mut records = Map::new();
        for (record_type, answer) in DnsRecordType::ALL.iter().zip(answers) {
            // a failed record type is reported as an empty list
            let values = answer.unwrap_or_default();
            records.insert(
                record_type.as_str().to_string(),
                Value::from(values),
            );
        }
        ProviderOutcome::Success(Value::Object(records))
    }
}

/// First IPv4 address of the domain; always reported, `null` on failure.
pub struct ForwardIpProvider {
    resolver: Arc<dyn NameResolver>,
}

impl ForwardIpProvider {
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Provider for ForwardIpProvider {
    fn name(&self) -> &'static str {
        "ip"
    }

    fn presence(&self) -> Presence {
        Presence::Always
    }

    async fn lookup(&self, domain: &str) -> ProviderOutcome {
        match self.resolver.resolve_ipv4(domain).await {
            Ok(Some(ip)) => ProviderOutcome::Success(Value::String(ip.to_string())),
            Ok(None) => ProviderOutcome::Unavailable,
            Err(e) => {
                tracing::debug!("could not resolve {}: {}", domain, e);
                ProviderOutcome::Unavailable
            }
        }
    }
}

/// PTR name for an address; always reported, `null` on failure.
pub struct ReverseDnsProvider {
    resolver: Arc<dyn NameResolver>,
}

impl ReverseDnsProvider {
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Provider for ReverseDnsProvider {
    fn name(&self) -> &'static str {
        "reverse_dns"
    }

    fn presence(&self) -> Presence {
        Presence::Always
    }

    async fn lookup(&self, ip: &str) -> ProviderOutcome {
        let Ok(address) = ip.parse::<IpAddr>() else {
            return ProviderOutcome::Unavailable;
        };

        match self.resolver.reverse_lookup(address).await {
            Ok(Some(hostname)) => ProviderOutcome::Success(Value::String(hostname)),
            Ok(None) => ProviderOutcome::Unavailable,
            Err(e) => {
                tracing::debug!("reverse lookup for {} failed: {}", ip, e);
                ProviderOutcome::Unavailable
            }
        }
    }
}
