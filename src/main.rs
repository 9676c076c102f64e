//! EasyOCR Demo - desktop front-end for the EasyOCR engine
//!
//! Pick an image and one or more languages; the detected text regions are
//! boxed on a copy of the image and listed with their confidence scores.

mod assets;
mod config;
mod dashboard;
mod interface;
mod languages;
mod recognition;
mod shared;
mod storage;
mod vision;
mod worker;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::assets::AssetProvisioner;
use crate::config::AppConfig;
use crate::interface::InterfaceSpec;
use crate::languages::LanguageCode;
use crate::recognition::RecognitionAdapter;
use crate::shared::RuntimeState;
use crate::worker::InferenceWorker;

/// EasyOCR Demo - upload an image, choose languages, inspect detected text
#[derive(Parser, Debug)]
#[command(name = "easyocr-demo")]
#[command(about = "Desktop demo for EasyOCR with 80+ supported languages")]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run once on this image without opening a window
    #[arg(long)]
    image: Option<PathBuf>,

    /// Language code for headless mode; repeat for several
    #[arg(short, long = "lang", requires = "image")]
    lang: Vec<String>,

    /// Print the headless result as JSON
    #[arg(long, requires = "image")]
    json: bool,

    /// List supported language codes and exit
    #[arg(long)]
    list_languages: bool,

    /// Where to write the annotated image
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the example images
    #[arg(long)]
    samples_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if args.list_languages {
        for code in LanguageCode::all() {
            println!("{code}");
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => load_or_create_config(),
    };
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
    if let Some(dir) = &args.samples_dir {
        config.samples.dir = dir.clone();
    }

    let provisioner = Arc::new(AssetProvisioner::from_config(&config.samples));
    let data_dir = storage::get_data_dir()?;
    let factory = vision::engine_factory_from_config(&config.engine, data_dir)
        .context("Failed to install the EasyOCR bridge script")?;
    let adapter = Arc::new(
        RecognitionAdapter::from_config(&config, provisioner.clone(), factory)
            .context("Invalid render settings")?,
    );

    match &args.image {
        Some(image) => run_headless(&adapter, image, &args.lang, args.json),
        None => run_with_dashboard(&config, adapter, &provisioner),
    }
}

/// Load configuration from the platform directory, writing defaults on first run
fn load_or_create_config() -> AppConfig {
    if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return config;
                }
                Err(e) => warn!("Ignoring config file: {:#}", e),
            }
        } else if let Err(e) = config::save_config(&AppConfig::default(), &config_path) {
            warn!("Could not write default config to {:?}: {}", config_path, e);
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Single inference, printed to stdout
fn run_headless(adapter: &RecognitionAdapter, image: &Path, langs: &[String], json: bool) -> Result<()> {
    let langs: Vec<String> = if langs.is_empty() {
        vec![languages::DEFAULT_LANGUAGE.to_string()]
    } else {
        langs.to_vec()
    };

    let result = adapter.inference(image, &langs)?;
    info!("Annotated image written to {:?}", result.image_path);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.table.to_tsv());
    }
    Ok(())
}

/// Run the desktop demo until the window closes
fn run_with_dashboard(config: &AppConfig, adapter: Arc<RecognitionAdapter>, provisioner: &AssetProvisioner) -> Result<()> {
    info!("Running in dashboard mode");
    info!(
        "{} example image(s) in {:?}; results written to {:?}",
        provisioner.assets().len(),
        provisioner.dir(),
        adapter.output_path()
    );

    let spec = InterfaceSpec::from_config(config, provisioner).context("Invalid interface settings")?;
    let runtime = Arc::new(RwLock::new(RuntimeState::default()));

    let worker = InferenceWorker::spawn(adapter, runtime.clone());
    worker.prepare_samples();

    if let Err(e) = dashboard::run_dashboard(runtime, spec, worker) {
        error!("Dashboard error: {}", e);
    }

    info!("EasyOCR Demo shutdown complete");
    Ok(())
}
