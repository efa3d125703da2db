use clap::Args;
use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};

use handle_errors::Error;

/// Settings shared by the server and the terminal client.
///
/// Layers, lowest precedence first: defaults, `setup.toml`, `.env` and
/// `TRIVIA_*` environment variables, `PORT`, then command line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub seed: bool,
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3030,
            api_url: "http://127.0.0.1:3030".to_string(),
            seed: false,
            max_retries: 0,
        }
    }
}

/// Command line flags overriding the file and environment settings.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Settings file to read, without extension
    #[clap(long, default_value = "setup")]
    pub config: String,
    /// Which errors we want to log (info, warn or error)
    #[clap(short, long)]
    pub log_level: Option<String>,
    /// Address the server listens on
    #[clap(long)]
    pub host: Option<String>,
    /// Port the server listens on
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Base url of the trivia API
    #[clap(long)]
    pub api_url: Option<String>,
    /// Start the server with the bundled sample questions
    #[clap(long)]
    pub seed: bool,
    /// Retries for transient request failures, 0 disables retrying
    #[clap(long)]
    pub max_retries: Option<u32>,
}

impl Config {
    pub fn load(overrides: &Overrides) -> Result<Config, Error> {
        dotenv::dotenv().ok();

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(&overrides.config).required(false))
            .add_source(::config::Environment::with_prefix("TRIVIA"))
            .build()
            .map_err(Error::ConfigError)?;
        let mut config = settings
            .try_deserialize::<Config>()
            .map_err(Error::ConfigError)?;

        if let Ok(port) = env::var("PORT") {
            config.port = port.parse::<u16>().map_err(Error::ParseError)?;
        }

        Ok(config.apply(overrides))
    }

    pub fn apply(mut self, overrides: &Overrides) -> Config {
        if let Some(log_level) = &overrides.log_level {
            self.log_level = log_level.clone();
        }
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(api_url) = &overrides.api_url {
            self.api_url = api_url.clone();
        }
        if overrides.seed {
            self.seed = true;
        }
        if let Some(max_retries) = overrides.max_retries {
            self.max_retries = max_retries;
        }
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let ip = self.host.parse::<IpAddr>().map_err(Error::InvalidAddress)?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Tracing filter directive: `RUST_LOG` when set, the configured level otherwise.
    pub fn log_filter(&self) -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| {
            format!(
                "handle_errors={level},trivia={level},warp=error",
                level = self.log_level
            )
        })
    }
}
