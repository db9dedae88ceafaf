use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use parkinsons_assistant::classifier::{Classifier, SvmClassifier};
use parkinsons_assistant::config::Config;
use parkinsons_assistant::validation::RangePolicy;
use parkinsons_assistant::web::{self, AppState, Background};

/// Local health assistant for Parkinson's disease prediction
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file (defaults to ~/.parkinsons-assistant/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the model artifact (.json)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Background image for the pages
    #[arg(long)]
    background: Option<PathBuf>,

    /// Address to serve the form on
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Value range policy: "permissive" or "physiological"
    #[arg(long)]
    range_policy: Option<RangePolicy>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command line flags take precedence over the config file
    fn apply_to(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.model_path = Some(model.clone());
        }
        if let Some(ref background) = self.background {
            config.background_path = Some(background.clone());
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(policy) = self.range_policy {
            config.range_policy = policy;
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let mut config = Config::load(&path)?;
    args.apply_to(&mut config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    info!("Health Assistant starting...");

    let config = load_config(&args)?;
    let model_path = config.get_model_path()?;
    info!("Model: {:?}", model_path);
    info!("Range policy: {:?}", config.range_policy);

    // No prediction can ever succeed without the model
    let classifier = match SvmClassifier::load(&model_path) {
        Ok(classifier) => classifier,
        Err(e) => {
            error!("{}", e);
            eprintln!("\nCould not load the prediction model: {}", e);
            eprintln!("\nExport the trained classifier as a JSON artifact and either:");
            eprintln!("  place it at: {:?}", model_path);
            eprintln!("  or pass:     --model /path/to/parkinsons_model.json");
            return Err(e).context("Model load failed");
        }
    };
    let classifier: Arc<dyn Classifier> = Arc::new(classifier);

    let background = config
        .background_path
        .as_deref()
        .map(Background::load)
        .transpose()?;

    let state = AppState::new(classifier, config.range_policy, background);
    web::serve(state, config.bind_address).await?;

    info!("Health Assistant stopped");
    Ok(())
}
