pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Credentials, PortalConfig};

pub use core::{Aggregator, Portal};
pub use domain::model::{AggregateResult, IdentifierKind, LookupResponse, ProviderOutcome};
pub use utils::error::{PortalError, Result};
