use crate::config::toml_config::PortalConfig;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "osint-portal")]
#[command(about = "Aggregate open-source intelligence for domains, emails, IPs and usernames")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub host: Option<String>,

    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Per-provider timeout
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Run a single lookup and print the JSON response
    Lookup {
        #[arg(value_enum)]
        target: LookupTarget,
        identifier: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupTarget {
    Domain,
    Email,
    Ip,
    Username,
    Hibp,
    Ipinfo,
    Shodan,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Command line flags win over the file.
    pub fn apply_overrides(&self, config: &mut PortalConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.providers.timeout_seconds = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = CliConfig::parse_from(["osint-portal"]);
        assert!(matches!(cli.command(), Command::Serve));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_lookup_subcommand() {
        let cli = CliConfig::parse_from(["osint-portal", "lookup", "username", "octocat", "-v"]);
        match cli.command() {
            Command::Lookup { target, identifier } => {
                assert_eq!(target, LookupTarget::Username);
                assert_eq!(identifier, "octocat");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = CliConfig::parse_from([
            "osint-portal",
            "--port",
            "9000",
            "--timeout-seconds",
            "4",
            "serve",
        ]);
        let mut config = PortalConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.providers.timeout_seconds, 4);
    }
}
