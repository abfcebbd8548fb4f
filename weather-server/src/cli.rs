use anyhow::Context;
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use weather_core::{Config, Lookup};

use crate::routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Geocoding and weather HTTP proxy")]
pub struct Cli {
    /// Address and port to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Optional TOML file with API keys and provider base URLs.
    /// Environment variables override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref()).context("Invalid configuration")?;
        let lookup = Arc::new(Lookup::from_config(&config));

        let listener = TcpListener::bind(self.bind)
            .await
            .with_context(|| format!("Failed to bind {}", self.bind))?;
        let addr = listener.local_addr().context("Failed to read bound address")?;

        tracing::info!("API is running on http://{addr}");

        axum::serve(listener, routes::router(lookup))
            .await
            .context("Server terminated unexpectedly")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bind_and_config() {
        let cli = Cli::try_parse_from([
            "weather-server",
            "--bind",
            "127.0.0.1:8080",
            "--config",
            "/etc/weather.toml",
        ])
        .expect("arguments must parse");

        assert_eq!(cli.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.config, Some(PathBuf::from("/etc/weather.toml")));
    }

    #[test]
    fn rejects_malformed_bind_address() {
        assert!(Cli::try_parse_from(["weather-server", "--bind", "not-an-addr"]).is_err());
    }
}
