//! Run a sweep of synthetic mixed-integer problems with one encoding and write the reports
//!
//! Reports land in `<output>/de/<fN>/<D>d/r<ratio>_u<upper>/`:
//! - `<label>-<instance>.txt`: `exponent hit_count` per line
//! - `<label>-<instance>-sd.txt`: diversity trace (with --record-diversity)
//! - `<label>-summary.txt`: mean hit rate over the instances

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mixint_bench::{
    BenchError, FileReportSink, SweepConfig, parse_encoding, parse_function, run_sweep,
};
use mixint_de::Encoding;

#[derive(Parser, Debug, Clone)]
#[command(author, about = "Benchmark mixed-integer encodings for Differential Evolution")]
struct Args {
    /// JSON configuration file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Encoding label (L, B, U-Lf, U-Lm, U-Lb, U-B, U2-L, U2-B)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Objective functions, by name or fN label
    #[arg(long, value_delimiter = ',')]
    functions: Option<Vec<String>>,

    /// Problem dimensions
    #[arg(short, long, value_delimiter = ',')]
    dimensions: Option<Vec<usize>>,

    /// Fractions of integer variables
    #[arg(long, value_delimiter = ',')]
    integer_ratios: Option<Vec<f64>>,

    /// Upper bounds of the integer variables
    #[arg(long, value_delimiter = ',')]
    integer_uppers: Option<Vec<u32>>,

    /// Instances per configuration
    #[arg(short, long)]
    instances: Option<usize>,

    /// Evaluation budget per dimension
    #[arg(long)]
    budget_multiplier: Option<usize>,

    /// Seed of the random stream
    #[arg(long)]
    seed: Option<u64>,

    /// Report root directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Evaluate sequentially
    #[arg(long, default_value_t = false)]
    no_parallel: bool,

    /// Write the diversity trace of every problem
    #[arg(long, default_value_t = false)]
    record_diversity: bool,

    /// List the available encodings and exit
    #[arg(long, default_value_t = false)]
    list_encodings: bool,
}

fn display_encoding_list() {
    println!("Available encodings:");
    for e in Encoding::ALL {
        let quantization = e.quantization().map(|q| format!(", {:?}", q)).unwrap_or_default();
        println!("  {:<5} {:?} / {:?}{}", e.label(), e.scheme(), e.approach(), quantization);
    }
}

fn build_config(args: &Args) -> Result<SweepConfig, BenchError> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::from_file(path)?,
        None => SweepConfig::default(),
    };
    if let Some(label) = &args.encoding {
        config.encoding = parse_encoding(label)?;
    }
    if let Some(names) = &args.functions {
        config.functions = names.iter().map(|n| parse_function(n)).collect::<Result<_, _>>()?;
    }
    if let Some(v) = &args.dimensions {
        config.dimensions = v.clone();
    }
    if let Some(v) = &args.integer_ratios {
        config.integer_ratios = v.clone();
    }
    if let Some(v) = &args.integer_uppers {
        config.integer_uppers = v.clone();
    }
    if let Some(v) = args.instances {
        config.instances = v;
    }
    if let Some(v) = args.budget_multiplier {
        config.budget_multiplier = v;
    }
    if let Some(v) = args.seed {
        config.seed = v;
    }
    if let Some(v) = &args.output_dir {
        config.output_dir = Some(v.clone());
    }
    if args.no_parallel {
        config.parallel = false;
    }
    if args.record_diversity {
        config.record_diversity = true;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), BenchError> {
    let config = build_config(args)?;
    let root = match &config.output_dir {
        Some(dir) => dir.clone(),
        None => mixint_env::get_output_dir()?,
    };
    log::info!("writing reports below {}", root.display());

    let mut sink = FileReportSink::new(root);
    let summary = run_sweep(&config, &mut sink)?;
    println!(
        "{}: {}/{} problems solved, {} evaluations, {} skipped",
        config.encoding, summary.solved, summary.problems, summary.evaluations, summary.failed
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list_encodings {
        display_encoding_list();
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
