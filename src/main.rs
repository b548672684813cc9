use anyhow::Result;
use clap::{Parser, Subcommand};
use phototransfer::commands::offline::{inspect::inspect, pack::pack};
use phototransfer::config::ServerConfig;
use phototransfer::server;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "phototransfer",
    version = "0.1.0",
    about = "Photo gallery delivery with on-the-fly ZIP archives",
    long_about = "Serves shared photo galleries to clients: gallery listings, \
    single image downloads, thumbnails and whole-gallery ZIP archives assembled on the fly. \
    Also packs and inspects archives locally.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "PHOTOTRANSFER_LOG_LEVEL",
        default_value = "info",
        help = "Log filter used when RUST_LOG is not set"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "serve",
        about = "Serve shared galleries over HTTP",
        long_about = "This command loads the gallery catalog and serves the client API \
        until interrupted."
    )]
    Serve(ServerConfig),
    #[command(
        name = "pack",
        about = "Pack local files into a store-only ZIP archive",
        long_about = "This command packs the given files into an uncompressed archive, \
        naming entries after their base names and deduplicating collisions."
    )]
    Pack {
        #[arg(short, long, help = "The archive to write")]
        output: PathBuf,
        #[arg(index = 1, required = true, help = "The files to pack")]
        files: Vec<PathBuf>,
    },
    #[command(
        name = "inspect",
        about = "Verify an archive and list its entries",
        long_about = "This command checks every entry of an archive against its central directory \
        and prints offset, size, CRC-32 and name per entry."
    )]
    Inspect {
        #[arg(index = 1, help = "The archive to inspect")]
        archive: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Serve(config) => server::serve(config).await?,
        Commands::Pack { output, files } => {
            pack(output, files, &mut std::io::stdout()).await?
        }
        Commands::Inspect { archive } => inspect(archive, &mut std::io::stdout()).await?,
    }

    Ok(())
}
