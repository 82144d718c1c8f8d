// main.rs
//
// Command-line driver: score one onion, sweep the whole configuration space into
// a JSON table, or report the most even configuration per (layers, cuts) pair.

use clap::{Args, Parser, Subcommand};
use onion::float_types::Real;
use onion::search::{SearchOps, SearchSpace, default_search};
use onion::{CutType, OnionConfiguration, Report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "onion", about = "Piece areas and evenness of cut onions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single configuration
    Evaluate(EvaluateArgs),
    /// Score every configuration in the search space and write the table
    Generate(GenerateArgs),
    /// Find the most even configuration per (layers, cuts) in a table
    Report(ReportArgs),
}

#[derive(Args)]
struct EvaluateArgs {
    /// Disk radius
    #[arg(short, long, default_value = "240")]
    radius: Real,

    /// Number of concentric layers
    #[arg(short, long, default_value = "10")]
    layers: usize,

    /// Number of vertical or radial cuts
    #[arg(short, long, default_value = "3")]
    cuts: usize,

    /// "vertical" or "radial"
    #[arg(short = 't', long, default_value = "vertical")]
    cut_type: CutType,

    /// Apex depth below the centre as a fraction of the radius (radial only)
    #[arg(short, long, default_value = "0")]
    depth: Real,

    /// Number of horizontal cuts (0-2)
    #[arg(long, default_value = "2")]
    horizontal: usize,

    /// Decimal places of the reported RSD
    #[arg(long, default_value = "1")]
    decimals: u32,

    /// Print the full evaluation as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GenerateArgs {
    /// Output JSON table path
    #[arg(short, long, default_value = "data/onion-standard-deviation.json")]
    output: PathBuf,

    /// JSON file describing the search space (defaults fill missing fields)
    #[arg(long)]
    space: Option<PathBuf>,

    /// Override the number of radial depth steps
    #[arg(long)]
    depth_steps: Option<u32>,
}

#[derive(Args)]
struct ReportArgs {
    /// Input JSON table path
    #[arg(short, long, default_value = "data/onion-standard-deviation.json")]
    input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also write the report as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("onion=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Evaluate(args) => evaluate(args),
        Command::Generate(args) => generate(args),
        Command::Report(args) => report(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        },
    }
}

fn evaluate(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let onion = OnionConfiguration::new(
        args.radius,
        args.layers,
        args.cuts,
        args.cut_type,
        args.depth,
        args.horizontal,
    )?;
    let evaluation = onion.evaluate(args.decimals);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        println!(
            "{}: {} pieces, mean area {:.3}, RSD {}%",
            evaluation.storage_key,
            evaluation.piece_areas.len(),
            evaluation.mean,
            evaluation.rsd
        );
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut space = match &args.space {
        Some(path) => serde_json::from_reader(std::io::BufReader::new(std::fs::File::open(path)?))?,
        None => SearchSpace::default(),
    };
    if let Some(steps) = args.depth_steps {
        space.depth_steps = steps;
    }
    info!(configurations = space.len(), "starting search");

    let table = default_search().evaluate(&space)?;
    onion::io::write_table(&args.output, &table)?;
    Ok(())
}

fn report(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let table = onion::io::read_table(&args.input)?;
    let report = Report::from_table(&table)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    if let Some(path) = &args.output {
        onion::io::write_report(path, &report)?;
        info!(path = %path.display(), "wrote report");
    }
    Ok(())
}
