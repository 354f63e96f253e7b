use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use launchdash::cli::{self, OutputFormat};
use launchdash::config::{self, DashConfig};
use launchdash::dataset::Dataset;
use launchdash::filter::ALL_SITES;
use launchdash::{logging, web};

#[derive(Debug, Parser)]
#[command(name = "launchdash")]
#[command(about = "Interactive dashboard over historical launch records")]
struct App {
    /// Launch records CSV (overrides `dataset.path` from config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the interactive dashboard over HTTP
    Serve {
        /// Listen address, e.g. 127.0.0.1:8050
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_open: bool,
    },
    /// List launch sites and the payload range of the dataset
    Sites {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Success breakdown by site, or success vs failure at one site
    Breakdown {
        /// Site id, or ALL
        #[arg(long, default_value = ALL_SITES)]
        site: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Payload mass vs outcome for launches in a payload range
    Correlation {
        /// Site id, or ALL
        #[arg(long, default_value = ALL_SITES)]
        site: String,
        /// Lower payload bound in kg (default: dataset minimum)
        #[arg(long)]
        min: Option<f64>,
        /// Upper payload bound in kg (default: dataset maximum)
        #[arg(long)]
        max: Option<f64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Inspect or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file to ~/.launchdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a single key, e.g. `server.addr 0.0.0.0:8050`
    Set { key: String, value: String },
    /// Restore the global config file to defaults
    Reset,
    /// Show config file locations
    Path,
}

fn main() -> ExitCode {
    let app = App::parse();

    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(app: App) -> Result<()> {
    let App { data, command } = app;

    match command {
        // Init, reset and path never read the config files, so a broken
        // file can always be repaired.
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&load_config(data)?),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
            ConfigAction::Path => cli::run_config_path(),
        },
        Commands::Serve { addr, no_open } => {
            let mut config = load_config(data)?;
            if let Some(addr) = addr {
                config.server.addr = addr;
            }
            if no_open {
                config.server.open_browser = false;
            }
            let dataset = load_dataset(&config)?;
            web::serve(&dataset, &config)
        }
        Commands::Sites { format } => {
            let config = load_config(data)?;
            let dataset = load_dataset(&config)?;
            cli::run_sites(&dataset, &config, format)
        }
        Commands::Breakdown { site, format } => {
            let config = load_config(data)?;
            let dataset = load_dataset(&config)?;
            cli::run_breakdown(&dataset, &site, format)
        }
        Commands::Correlation {
            site,
            min,
            max,
            format,
        } => {
            let config = load_config(data)?;
            let dataset = load_dataset(&config)?;
            cli::run_correlation(&dataset, &site, min, max, format)
        }
    }
}

/// Resolve the layered config, apply `--data` and start logging.
fn load_config(data: Option<PathBuf>) -> Result<DashConfig> {
    let mut config = config::load()?;
    if let Some(path) = data {
        config.dataset.path = path.display().to_string();
    }
    logging::init(&config.logging.level);
    Ok(config)
}

/// Load the configured dataset. Nothing is served from a partial load.
fn load_dataset(config: &DashConfig) -> Result<Dataset> {
    let path = PathBuf::from(&config.dataset.path);
    let dataset = Dataset::load(&path, &config.dataset.columns)?;
    tracing::info!(
        path = %path.display(),
        records = dataset.len(),
        sites = dataset.known_sites().len(),
        "dataset loaded"
    );
    Ok(dataset)
}
