//! Proxy list converter.
//!
//! ```text
//!   Client                         Converter                       Webshare
//!     │  GET /convert?url=..&p-..     │                               │
//!     ├──────────────────────────────▶│  GET url (p-* as headers)     │
//!     │                               ├──────────────────────────────▶│
//!     │                               │◀──────────── {"results": [..]}│
//!     │                               │ filter valid → sort → format  │
//!     │◀──────── base64 subscription ─┤                               │
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use reqwest::header::HeaderMap;

use proxy_list_converter::config::{self, validation::validate_config, ConfigError, ConverterConfig};
use proxy_list_converter::convert::{request::passthrough_header, ConvertRequest, Converter};
use proxy_list_converter::lifecycle::startup;
use proxy_list_converter::observability::logging;

#[derive(Parser)]
#[command(name = "proxy-list-converter", version)]
#[command(about = "Serve Webshare proxy lists as Shadowrocket subscriptions", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults apply when omitted).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Convert one list and print the subscription body to stdout
    Convert {
        /// Upstream list URL
        #[arg(short, long)]
        url: String,

        /// Upstream header as 'Name: Value' (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
    /// Validate the configuration and print the effective settings
    CheckConfig,
}

fn load(path: Option<&Path>) -> Result<ConverterConfig, ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => Ok(ConverterConfig::default()),
    }
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once(':')
            .ok_or_else(|| format!("header '{}' is not in 'Name: Value' form", entry))?;
        let (name, value) = passthrough_header(name.trim(), value.trim())?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
                validate_config(&config).map_err(ConfigError::Validation)?;
            }

            logging::init(&config.observability)?;
            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                bind_address = %config.listener.bind_address,
                convert_suffix = %config.routes.convert_suffix,
                request_timeout_secs = config.timeouts.request_secs,
                "proxy-list-converter starting"
            );

            startup::serve(config).await?;
            tracing::info!("Shutdown complete");
        }
        Commands::Convert { url, headers } => {
            logging::init(&config.observability)?;
            let converter = Converter::new(config.conversion.clone(), &config.timeouts)?;
            let request = ConvertRequest::new(url, parse_headers(&headers)?);
            println!("{}", converter.convert(&request).await?);
        }
        Commands::CheckConfig => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
