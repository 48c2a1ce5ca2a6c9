use anyhow::Context;
use colored::Colorize;
use tfy_server::{ServerConfig, ThreadifyServer};

use crate::cli::{Cli, Command, ConfigSource};

/// Defaults, then the config file, then command-line overrides.
pub fn load_config(source: &ConfigSource) -> anyhow::Result<ServerConfig> {
    let mut config = match &source.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = source.bind {
        config.bind_addr = bind;
    }
    Ok(config)
}

pub async fn run_command(cli: Cli, config: ServerConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(_) => cmd_serve(config).await,
        Command::Config(_) => cmd_config(&config),
    }
}

async fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    let server = ThreadifyServer::new(config).context("invalid server configuration")?;
    println!(
        "{} threadify on {} (bcrypt cost {}, photo limit {} bytes)",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold(),
        server.config().auth.bcrypt_cost.to_string().cyan(),
        server.config().max_photo_bytes.to_string().cyan(),
    );
    server.serve().await?;
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = load_config(&ConfigSource::default()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn bind_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:9000\"\nmax_photo_bytes = 1024").unwrap();

        let source = ConfigSource {
            config: Some(file.path().to_path_buf()),
            bind: Some("127.0.0.1:7000".parse().unwrap()),
        };
        let config = load_config(&source).unwrap();
        assert_eq!(config.bind_addr.port(), 7000);
        assert_eq!(config.max_photo_bytes, 1024);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource {
            config: Some(dir.path().join("absent.toml")),
            bind: None,
        };
        let err = load_config(&source).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
