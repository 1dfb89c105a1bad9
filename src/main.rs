use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use consensus_map::config::{PipelineConfig, CONSENSUS_PROJECTION_SCALE, FEATURE_PROJECTION_SCALE};
use consensus_map::pipeline::{
    correlate_files, read_text, run_consensus, run_features, ConsensusOutputs, FeatureOutputs,
};
use consensus_map::ordering::question_items;
use consensus_map::{io::read_matrix, OrderStrategy, DEFAULT_CLUSTER_COUNT};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

/// Consensus dissimilarity, projection and clustering from manual grouping rounds
#[derive(Parser)]
#[command(name = "consensus-map", version, about)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a round log into matrix, projection and clustering tables
    Consensus {
        /// Round log (concatenated JSON objects); `-` reads stdin
        #[arg(long, default_value = "-")]
        input: String,
        #[arg(long)]
        matrix: PathBuf,
        #[arg(long)]
        projection: PathBuf,
        #[arg(long)]
        clustering: PathBuf,
        /// Optional JSON run manifest
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Cluster counts, one clustering line each
        #[arg(long = "clusters", num_args = 1.., default_values_t = [DEFAULT_CLUSTER_COUNT])]
        clusters: Vec<usize>,
        /// Multiplier applied to the matrix before projecting
        #[arg(long, default_value_t = CONSENSUS_PROJECTION_SCALE)]
        projection_scale: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Project and cluster numeric feature rows, optionally against a matrix
    Features {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        projection: PathBuf,
        #[arg(long)]
        clustering: PathBuf,
        /// Matrix CSV to correlate the feature distances with
        #[arg(long)]
        compare: Option<PathBuf>,
        /// Where to write the paired distances behind the correlation
        #[arg(long, requires = "compare")]
        pairs: Option<PathBuf>,
        #[arg(long, default_value = "file")]
        id_column: String,
        #[arg(long = "ignore-column", num_args = 1.., default_values_t = [String::from("group")])]
        ignore_columns: Vec<String>,
        #[arg(long = "clusters", num_args = 1.., default_values_t = [DEFAULT_CLUSTER_COUNT])]
        clusters: Vec<usize>,
        #[arg(long, default_value_t = FEATURE_PROJECTION_SCALE)]
        projection_scale: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Pearson correlation between two matrix CSV files
    Correlate { first: PathBuf, second: PathBuf },
    /// Presentation order for a list of items
    Order {
        /// random, none, name or nearest
        #[arg(long)]
        method: String,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Matrix CSV used by the nearest strategy
        #[arg(long)]
        matrix: Option<PathBuf>,
        /// Rater id; with --cur, orders that rater's question sample instead of all items
        #[arg(long, requires = "cur")]
        uid: Option<u64>,
        /// Question number of the rater
        #[arg(long, requires = "uid")]
        cur: Option<u64>,
        /// Items per question
        #[arg(long, default_value_t = 3)]
        count: usize,
        items: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    let start = Instant::now();

    match command {
        Commands::Consensus {
            input,
            matrix,
            projection,
            clustering,
            manifest,
            clusters,
            projection_scale,
            seed,
        } => {
            let (text, source) = if input == "-" {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read round log from stdin")?;
                (text, None)
            } else {
                (read_text(Path::new(&input))?, Some(input))
            };

            let config = PipelineConfig::consensus()
                .cluster_counts(clusters)
                .projection_scale(projection_scale)
                .seed(seed);
            let outputs = ConsensusOutputs {
                matrix,
                projection,
                clustering,
                manifest,
            };

            let report = run_consensus(&text, source, &config, &outputs)?;
            tracing::info!(
                elapsed_secs = start.elapsed().as_secs_f64(),
                items = report.manifest.item_count,
                "done"
            );
            report.ensure_complete()
        }
        Commands::Features {
            input,
            projection,
            clustering,
            compare,
            pairs,
            id_column,
            ignore_columns,
            clusters,
            projection_scale,
            seed,
        } => {
            let table = read_text(&input)?;
            let reference = compare.as_deref().map(read_text).transpose()?;

            let config = PipelineConfig::features()
                .cluster_counts(clusters)
                .projection_scale(projection_scale)
                .seed(seed)
                .id_column(id_column)
                .ignore_columns(ignore_columns);
            let outputs = FeatureOutputs {
                projection,
                clustering,
                pairs,
            };

            let report = run_features(
                &table,
                reference.as_deref(),
                Some(input.display().to_string()),
                &config,
                &outputs,
            )?;
            if let Some(correlation) = &report.correlation {
                println!("Pearson correlation: {}", correlation.pearson);
            }
            tracing::info!(elapsed_secs = start.elapsed().as_secs_f64(), "done");
            report.ensure_complete()
        }
        Commands::Correlate { first, second } => {
            let correlation = correlate_files(&first, &second)?;
            println!("Pearson correlation: {}", correlation.pearson);
            Ok(())
        }
        Commands::Order {
            method,
            seed,
            matrix,
            uid,
            cur,
            count,
            items,
        } => {
            let strategy: OrderStrategy = method.parse()?;
            let matrix = match matrix {
                Some(path) => Some(
                    read_matrix(&read_text(&path)?)
                        .with_context(|| format!("Failed to parse matrix: {}", path.display()))?,
                ),
                None => None,
            };

            let items = match (uid, cur) {
                (Some(uid), Some(cur)) => question_items(&items, uid, cur, count),
                _ => items,
            };

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let order = strategy.reorder(&items, &mut rng, matrix.as_ref())?;
            println!("{}", serde_json::json!({ "order": order }));
            Ok(())
        }
    }
}
