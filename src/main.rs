use anyhow::Context;
use clap::Parser;
use osint_portal::config::cli::{Command, LookupTarget};
use osint_portal::utils::{logger, validation::Validate};
use osint_portal::{api, CliConfig, Credentials, Portal, PortalConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let mut config = match &cli.config {
        Some(path) => PortalConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => PortalConfig::default(),
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    tracing::debug!("Effective configuration: {:?}", config);

    let credentials = Credentials::from_env();
    let configured = credentials.configured();
    if configured.is_empty() {
        tracing::info!("No provider API keys configured, intelligence services will serve mock data");
    } else {
        tracing::info!("API keys configured for: {}", configured.join(", "));
    }

    let portal = Arc::new(Portal::new(&config, credentials).context("failed to build providers")?);

    match cli.command() {
        Command::Serve => api::serve(&config, portal).await?,
        Command::Lookup { target, identifier } => {
            let response = match target {
                LookupTarget::Domain => portal.domain(&identifier).await?,
                LookupTarget::Email => portal.email(&identifier).await?,
                LookupTarget::Ip => portal.ip(&identifier).await?,
                LookupTarget::Username => portal.username(&identifier).await?,
                LookupTarget::Hibp => portal.hibp(&identifier).await?,
                LookupTarget::Ipinfo => portal.ipinfo(&identifier).await?,
                LookupTarget::Shodan => portal.shodan(&identifier).await?,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
