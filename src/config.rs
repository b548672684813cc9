use crate::areas::transfer::{DEFAULT_FETCH_CONCURRENCY, TransferOptions};
use clap::Args;
use clap::builder::TypedValueParser;
use std::path::PathBuf;

/// Settings for the `serve` subcommand
///
/// Every flag can also be supplied through its environment variable.
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0", help = "Address to listen on")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    pub port: u16,

    #[arg(
        long,
        env = "PHOTOTRANSFER_STORAGE_ROOT",
        help = "Directory holding stored objects, addressed by key"
    )]
    pub storage_root: PathBuf,

    #[arg(
        long,
        env = "PHOTOTRANSFER_CATALOG",
        help = "JSON document describing galleries and their images"
    )]
    pub catalog: PathBuf,

    #[arg(
        long,
        env = "PHOTOTRANSFER_FETCH_CONCURRENCY",
        default_value_t = DEFAULT_FETCH_CONCURRENCY,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from),
        help = "Maximum object fetches in flight per archive"
    )]
    pub fetch_concurrency: usize,
}

impl ServerConfig {
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions::new(self.fetch_concurrency)
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
