use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saloon_core::config::SaloonConfig;
use saloon_execution::SessionEventLayer;
use std::path::PathBuf;

mod camera;
mod commands;

#[derive(Parser)]
#[command(name = "saloon")]
#[command(about = "SALOON - AI hairstyle try-on", long_about = None)]
struct Cli {
    /// Path to config.toml (default: ~/.config/saloon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to secret.json (default: ~/.config/saloon/secret.json)
    #[arg(long, global = true)]
    secret: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `saloon_core=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the hairstyle catalog
    Styles,
    /// Run one capture / analyze / generate session
    Run {
        /// Image file used as the camera feed
        #[arg(long)]
        camera: PathBuf,

        /// Identifier of the style to apply (see `saloon styles`)
        #[arg(long)]
        style: String,

        /// Where to write the generated image (default: suggested export name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<SaloonConfig> {
    match path {
        Some(path) => SaloonConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => SaloonConfig::load_default().context("Failed to load config"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let (layer, events) = SessionEventLayer::channel();
    saloon_execution::init_tracing(cli.log_level.as_deref(), Some(layer))
        .context("Failed to install tracing subscriber")?;

    match cli.command {
        Commands::Styles => commands::styles::list(),
        Commands::Run { camera, style, out } => {
            let config = load_config(cli.config.as_ref())?;
            let args = commands::run::RunArgs {
                camera,
                style,
                out,
                secret: cli.secret,
            };
            commands::run::execute(config, args, events).await
        }
    }
}
