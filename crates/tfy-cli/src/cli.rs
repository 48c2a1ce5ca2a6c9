use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "threadify",
    about = "Threadify: threads, comments and likes behind bearer-token auth",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server with in-memory storage
    Serve(ConfigSource),
    /// Print the effective configuration as TOML
    Config(ConfigSource),
}

impl Command {
    pub fn source(&self) -> &ConfigSource {
        match self {
            Self::Serve(source) | Self::Config(source) => source,
        }
    }
}

/// Where configuration comes from: defaults, an optional file, then flags.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigSource {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overriding the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["threadify", "serve"]).unwrap();
        let Command::Serve(source) = cli.command else {
            panic!("expected serve");
        };
        assert!(source.config.is_none());
        assert!(source.bind.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "threadify",
            "serve",
            "--config",
            "threadify.toml",
            "--bind",
            "0.0.0.0:8080",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let source = cli.command.source();
        assert_eq!(source.config, Some(PathBuf::from("threadify.toml")));
        assert_eq!(source.bind, Some("0.0.0.0:8080".parse().unwrap()));
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["threadify", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config(_)));
    }

    #[test]
    fn rejects_bad_bind() {
        assert!(Cli::try_parse_from(["threadify", "serve", "--bind", "nowhere"]).is_err());
    }
}
