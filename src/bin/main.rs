//! Rebalance command line interface
//!
//! Evaluate imbalance-aware training wrappers on CSV datasets and inspect
//! class distributions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use rebalance::core::{Classifier, RebalanceError, Result};
use rebalance::{
    load_dataset, EvaluationResult, FoldEvaluator, LinearSvm, OversamplingTrainer, SmoteEnn,
    SmoteTrainer,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rebalance")]
#[command(about = "Class-imbalance-aware classifier training and evaluation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-validate a classifier on a CSV dataset
    Evaluate(EvaluateArgs),
    /// Show the class balance of a CSV dataset
    Inspect(InspectArgs),
}

#[derive(Args)]
struct EvaluateArgs {
    /// CSV data file (last column is the label)
    #[arg(long)]
    data: PathBuf,

    /// Number of evaluation folds
    #[arg(short, long, default_value = "10")]
    folds: usize,

    /// Training rows per fold (test partition gets half as many)
    #[arg(short, long)]
    sample_size: Option<usize>,

    /// Balancing wrapper applied around the classifier
    #[arg(short, long, default_value = "oversample")]
    trainer: CliTrainer,

    /// Regularization parameter C
    #[arg(short = 'C', long, default_value = "1.0")]
    c: f64,

    /// Training epochs for the linear SVM
    #[arg(short, long, default_value = "50")]
    epochs: usize,

    /// Keep categorical columns as ordinal codes instead of one-hot expanding
    #[arg(long)]
    raw: bool,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliTrainer {
    /// No balancing, train on the raw fold
    #[value(name = "none")]
    None,
    /// Random minority oversampling to parity
    #[value(name = "oversample")]
    Oversample,
    /// SMOTE synthetic oversampling with ENN cleaning
    #[value(name = "smote")]
    Smote,
}

#[derive(Args)]
struct InspectArgs {
    /// CSV data file
    data: PathBuf,

    /// Keep categorical columns as ordinal codes instead of one-hot expanding
    #[arg(long)]
    raw: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    classifier: String,
    folds: usize,
    #[serde(flatten)]
    result: &'a EvaluationResult,
    generated_at: String,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Evaluate(args) => evaluate_command(args),
        Commands::Inspect(args) => inspect_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn evaluate_command(args: EvaluateArgs) -> Result<()> {
    info!("Loading dataset from {:?}", args.data);
    let dataset = load_dataset(&args.data, !args.raw)?;
    info!(
        "Loaded {} samples with {} features",
        dataset.len(),
        dataset.dim()
    );

    let classes = dataset.class_balance().classes();
    if classes.len() < 2 {
        return Err(RebalanceError::InvalidDataset(
            "evaluation needs at least 2 classes".to_string(),
        ));
    }

    let mut svm = LinearSvm::new(classes).with_c(args.c).with_epochs(args.epochs);
    if let Some(seed) = args.seed {
        svm = svm.with_seed(seed);
    }

    let mut evaluator = FoldEvaluator::new(args.folds);
    if let Some(size) = args.sample_size {
        evaluator = evaluator.with_sample_size(size);
    }
    if let Some(seed) = args.seed {
        evaluator = evaluator.with_seed(seed);
    }

    let (name, result) = match args.trainer {
        CliTrainer::None => {
            let name = svm.name();
            (name, evaluator.evaluate(&mut svm, &dataset)?)
        }
        CliTrainer::Oversample => {
            let mut trainer = OversamplingTrainer::new(svm);
            if let Some(seed) = args.seed {
                trainer = trainer.with_seed(seed);
            }
            let name = trainer.name();
            (name, evaluator.evaluate(&mut trainer, &dataset)?)
        }
        CliTrainer::Smote => {
            let resampler = match args.seed {
                Some(seed) => SmoteEnn::new().with_seed(seed),
                None => SmoteEnn::new(),
            };
            let mut trainer = SmoteTrainer::with_resampler(svm, resampler);
            let name = trainer.name();
            (name, evaluator.evaluate(&mut trainer, &dataset)?)
        }
    };

    if args.json {
        let report = JsonReport {
            classifier: name,
            folds: result.folds(),
            result: &result,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| RebalanceError::ParseError(e.to_string()))?
        );
    } else {
        print!("{}", result.report(&name));
    }

    Ok(())
}

fn inspect_command(args: InspectArgs) -> Result<()> {
    let dataset = load_dataset(&args.data, !args.raw)?;
    let balance = dataset.class_balance();

    println!("=== Dataset Summary ===");
    println!("Samples:  {}", dataset.len());
    println!("Features: {}", dataset.dim());
    println!("Classes:  {}", balance.num_classes());
    println!();
    println!("Class balance:");
    for (class, count) in balance.iter() {
        let pct = 100.0 * count as f64 / balance.total() as f64;
        println!("  {class}: {count} rows ({pct:.1}%)");
    }

    if balance.is_balanced() {
        println!("\nDataset is balanced");
    } else {
        let ratio = balance.max_count() as f64 / balance.min_count().max(1) as f64;
        println!("\nImbalance ratio (majority/minority): {ratio:.2}");
    }

    Ok(())
}
