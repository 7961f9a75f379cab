mod config_service;
mod error;
mod sinks;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fo_sim::{SimulationConfig, TimeSeries, TimeSeriesSink};
use tracing::info;

use crate::config_service::{ConfigOverrides, config_to_yaml, load_config};
use crate::error::CliResult;
use crate::sinks::{CsvSink, JsonSink, SummarySink};

#[derive(Parser)]
#[command(name = "fo-cli")]
#[command(about = "First-order plant response simulator (open loop, P, PI, PID)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and export the response
    Run(RunArgs),
    /// Validate a config file
    Validate {
        /// Path to the config YAML file
        config_path: PathBuf,
    },
    /// Print the default config as YAML
    Defaults,
}

#[derive(Args)]
struct RunArgs {
    /// Config YAML file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Plant gain K
    #[arg(long)]
    k: Option<f64>,
    /// Plant time constant in seconds
    #[arg(long)]
    tau: Option<f64>,
    /// Simulated horizon in seconds
    #[arg(long)]
    t_sim: Option<f64>,
    /// Time step in seconds
    #[arg(long)]
    dt: Option<f64>,
    /// Reference input: step or ramp
    #[arg(long)]
    input: Option<String>,
    /// Step amplitude
    #[arg(long)]
    amplitude: Option<f64>,
    /// Ramp slope
    #[arg(long)]
    slope: Option<f64>,
    /// Controller: none, p, pi or pid
    #[arg(long)]
    controller: Option<String>,
    /// Proportional gain
    #[arg(long)]
    kp: Option<f64>,
    /// Integral gain
    #[arg(long)]
    ki: Option<f64>,
    /// Derivative gain
    #[arg(long)]
    kd: Option<f64>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
    /// Output file path (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Summary,
    Csv,
    Json,
}

impl RunArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            k: self.k,
            tau: self.tau,
            t_sim: self.t_sim,
            dt: self.dt,
            input: self.input.clone(),
            amplitude: self.amplitude,
            slope: self.slope,
            controller: self.controller.clone(),
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        }
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Defaults => cmd_defaults(),
    }
}

fn cmd_run(args: &RunArgs) -> CliResult<()> {
    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    let config = args.overrides().apply(base)?;

    info!(
        k = config.k,
        tau = config.tau,
        t_sim = config.t_sim,
        dt = config.dt,
        input = config.input.label(),
        controller = config.controller.label(),
        "starting run"
    );

    let started = Instant::now();
    let series = fo_sim::run(&config)?;
    info!(
        samples = series.len(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "run finished"
    );

    export(&series, args.format, args.output.as_deref())
}

fn export(series: &TimeSeries, format: OutputFormat, output: Option<&Path>) -> CliResult<()> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Summary => SummarySink::new(writer).consume(series)?,
        OutputFormat::Csv => CsvSink::new(writer).consume(series)?,
        OutputFormat::Json => JsonSink::new(writer).consume(series)?,
    }

    if let Some(path) = output {
        println!("✓ Exported {} data points to {}", series.len(), path.display());
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = load_config(config_path)?;
    config.validate()?;
    println!("✓ Config is valid");
    println!(
        "  input={} controller={} samples={}",
        config.input.label(),
        config.controller.label(),
        fo_sim::TimeGrid::new(config.t_sim_time(), config.dt_time())?.len()
    );
    Ok(())
}

fn cmd_defaults() -> CliResult<()> {
    print!("{}", config_to_yaml(&SimulationConfig::default())?);
    Ok(())
}
