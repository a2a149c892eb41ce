//! VQAL command-line driver.
//!
//! Runs selection rounds over a binary feature file and persists the
//! labeled/unlabeled partition between invocations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use vqal_core::config::CliOverrides;
use vqal_core::constants::VQAL_VERSION;
use vqal_core::tracing::init_tracing_with_config;
use vqal_core::VqalConfig;
use vqal_query::{BinaryFeatureSource, CodebookScorer, PoolState, QueryEngine};

/// Code-balanced active-learning sample selection.
#[derive(Parser, Debug)]
#[command(name = "vqal")]
#[command(version = VQAL_VERSION)]
#[command(about = "Select the next samples to label from a vector-quantized pool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run selection rounds and persist the updated pool
    Round {
        /// Project root holding vqal.toml, the data and checkpoint directories
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Samples to label per round
        #[arg(short, long)]
        budget: Option<usize>,

        /// Samples per scoring batch
        #[arg(long)]
        batch_size: Option<usize>,

        /// Number of rounds to run
        #[arg(short = 'n', long)]
        rounds: Option<u32>,

        /// Score batches one after another instead of in parallel
        #[arg(long, default_value = "false")]
        sequential: bool,
    },

    /// Print the resolved configuration as TOML
    Config {
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Show the persisted labeled/unlabeled partition
    Pool {
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Round {
            root,
            budget,
            batch_size,
            rounds,
            sequential,
        } => {
            let overrides = CliOverrides {
                budget,
                batch_size,
                rounds,
                parallel_scoring: sequential.then_some(false),
                ..Default::default()
            };
            let config = load_config(&root, Some(&overrides))?;
            init_tracing_with_config(&config.observability);
            cmd_round(&config)?;
        }

        Commands::Config { root } => {
            let config = load_config(&root, None)?;
            print!("{}", config.to_toml()?);
        }

        Commands::Pool { root } => {
            let config = load_config(&root, None)?;
            cmd_pool(&config)?;
        }
    }

    Ok(())
}

fn load_config(root: &Path, overrides: Option<&CliOverrides>) -> Result<VqalConfig> {
    VqalConfig::load(root, overrides)
        .with_context(|| format!("failed to load configuration from {}", root.display()))
}

fn cmd_round(config: &VqalConfig) -> Result<()> {
    let features_path = config.paths.features_path();
    let source = BinaryFeatureSource::open(&features_path)
        .with_context(|| format!("failed to open features {}", features_path.display()))?;

    let pool_path = config.paths.pool_path();
    let mut model = CodebookScorer::new(&config.model);
    let mut engine = QueryEngine::from_config(config);

    let outcomes = engine
        .run_persisted(&pool_path, &mut model, &source, config.query.rounds)
        .with_context(|| format!("selection failed; pool kept at {}", pool_path.display()))?;

    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }
    Ok(())
}

fn cmd_pool(config: &VqalConfig) -> Result<()> {
    let pool_path = config.paths.pool_path();
    if !pool_path.exists() {
        println!("no pool snapshot at {}", pool_path.display());
        return Ok(());
    }
    let pool = PoolState::load_json(&pool_path)
        .with_context(|| format!("failed to load pool {}", pool_path.display()))?;
    println!("universe:  {}", pool.universe());
    println!("labeled:   {}", pool.labeled_len());
    println!("unlabeled: {}", pool.unlabeled_len());
    Ok(())
}
