use crate::adapters::{
    BreachLookupProvider, DnsRecordsProvider, EmailFormatProvider, ForwardIpProvider,
    GeolocationProvider, GithubProvider, HibpService, HickoryResolver, IpInfoService,
    RedditProvider, ReverseDnsProvider, ShodanService, TwitterProvider, WhoisClient, WhoisProvider,
};
use crate::config::{Credentials, PortalConfig};
use crate::core::aggregator::Aggregator;
use crate::domain::model::{IdentifierKind, LookupResponse};
use crate::domain::ports::{NameResolver, Provider};
use crate::utils::error::Result;
use std::sync::Arc;

/// The four lookup handlers plus the standalone intelligence services.
pub struct Portal {
    domain: Aggregator,
    email: Aggregator,
    ip: Aggregator,
    username: Aggregator,
    hibp: Aggregator,
    ipinfo: Aggregator,
    shodan: Aggregator,
}

impl Portal {
    pub fn new(config: &PortalConfig, credentials: Credentials) -> Result<Self> {
        let resolver = Arc::new(HickoryResolver::new(&config.providers)?);
        Self::with_resolver(config, credentials, resolver)
    }

    pub fn with_resolver(
        config: &PortalConfig,
        credentials: Credentials,
        resolver: Arc<dyn NameResolver>,
    ) -> Result<Self> {
        let providers = &config.providers;
        let timeout = providers.timeout();
        let handler = |kind, list: Vec<Arc<dyn Provider>>| Aggregator::new(kind, list, timeout);

        Ok(Self {
            domain: handler(
                IdentifierKind::Domain,
                vec![
                    Arc::new(WhoisProvider::new(WhoisClient::new(providers))),
                    Arc::new(DnsRecordsProvider::new(Arc::clone(&resolver))),
                    Arc::new(ForwardIpProvider::new(Arc::clone(&resolver))),
                ],
            ),
            email: handler(
                IdentifierKind::Email,
                vec![
                    Arc::new(BreachLookupProvider::new(providers, &credentials)?),
                    Arc::new(EmailFormatProvider),
                ],
            ),
            ip: handler(
                IdentifierKind::Ip,
                vec![
                    Arc::new(GeolocationProvider::new(providers)?),
                    Arc::new(ReverseDnsProvider::new(Arc::clone(&resolver))),
                ],
            ),
            username: handler(
                IdentifierKind::Username,
                vec![
                    Arc::new(GithubProvider::new(providers)?),
                    Arc::new(RedditProvider::new(providers)?),
                    Arc::new(TwitterProvider),
                ],
            ),
            hibp: handler(
                IdentifierKind::Email,
                vec![Arc::new(HibpService::new(providers, &credentials)?)],
            ),
            ipinfo: handler(
                IdentifierKind::Ip,
                vec![Arc::new(IpInfoService::new(providers, &credentials)?)],
            ),
            shodan: handler(
                IdentifierKind::Ip,
                vec![Arc::new(ShodanService::new(providers, &credentials)?)],
            ),
        })
    }

    pub async fn domain(&self, domain: &str) -> Result<LookupResponse> {
        self.domain.run(domain).await
    }

    pub async fn email(&self, email: &str) -> Result<LookupResponse> {
        self.email.run(email).await
    }

    pub async fn ip(&self, ip: &str) -> Result<LookupResponse> {
        self.ip.run(ip).await
    }

    pub async fn username(&self, username: &str) -> Result<LookupResponse> {
        self.username.run(username).await
    }

    pub async fn hibp(&self, email: &str) -> Result<LookupResponse> {
        self.hibp.run(email).await
    }

    pub async fn ipinfo(&self, ip: &str) -> Result<LookupResponse> {
        self.ipinfo.run(ip).await
    }

    pub async fn shodan(&self, ip: &str) -> Result<LookupResponse> {
        self.shodan.run(ip).await
    }
}
