#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use credentials::Credentials;
pub use toml_config::{PortalConfig, ProvidersConfig, ServerConfig};
