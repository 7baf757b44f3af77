//! Provider adapters: one module per external source, plus shared HTTP plumbing.

pub mod dns;
pub mod email_format;
pub mod geolocation;
pub mod github;
pub mod hibp;
pub mod http;
pub mod ipinfo;
pub mod reddit;
pub mod shodan;
pub mod twitter;
pub mod whois;

pub use dns::{DnsRecordsProvider, ForwardIpProvider, HickoryResolver, ReverseDnsProvider};
pub use email_format::EmailFormatProvider;
pub use geolocation::GeolocationProvider;
pub use github::GithubProvider;
pub use hibp::{BreachLookupProvider, HibpService};
pub use ipinfo::IpInfoService;
pub use reddit::RedditProvider;
pub use shodan::ShodanService;
pub use twitter::TwitterProvider;
pub use whois::{WhoisClient, WhoisProvider};
