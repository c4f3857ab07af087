use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use depsweep::prompt::{DialoguerBackend, Selector};
use depsweep::report::{JsonReporter, ReportFormat, Reporter};
use depsweep::sweep::{default_stripped_dir, Sweep};
use depsweep::Config;

/// depsweep - Find declared dependencies that nothing in the project uses
#[derive(Parser, Debug)]
#[command(name = "depsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project root
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Manifest file, relative to the project root
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Ignore-list file, relative to the project root
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// File or directory names to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// List unused dependencies without prompting
    #[arg(long)]
    list: bool,

    /// Output format for --list
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the JSON result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("depsweep v{}", env!("CARGO_PKG_VERSION"));

    let root = std::fs::canonicalize(&cli.path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Project root not found: {}", cli.path.display()))?;

    let config = load_config(&cli, &root)?;

    if cli.list {
        run_list(config, &cli, &root)
    } else {
        run_interactive(config, &cli, &root)
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the JSON result
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli, root: &Path) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(root)?
    };

    // Override with CLI arguments
    if let Some(manifest) = &cli.manifest {
        config.manifest = manifest.clone();
    }
    if let Some(ignore_file) = &cli.ignore_file {
        config.ignore_file = ignore_file.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}

fn scan_progress(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} files scanned")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn run_interactive(config: Config, cli: &Cli, root: &Path) -> Result<()> {
    let sweep = Sweep::prepare(root, config)?;

    let mut selector = Selector::new(DialoguerBackend::new());
    let reporter = JsonReporter::new(cli.output.clone());
    sweep.run(
        &mut selector,
        &default_stripped_dir()?,
        &reporter,
        scan_progress(cli.quiet),
    )?;

    Ok(())
}

fn run_list(config: Config, cli: &Cli, root: &Path) -> Result<()> {
    let format = cli
        .format
        .clone()
        .map(ReportFormat::from)
        .unwrap_or_else(|| ReportFormat::from_name(&config.report.format));

    let sweep = Sweep::prepare(root, config)?;

    let progress = scan_progress(cli.quiet);
    let outcome = sweep.scan(&[], &default_stripped_dir()?, progress.clone())?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Reporter::new(format, cli.output.clone()).report(&outcome.unused)?;
    outcome.stripped_manifest.remove()?;

    Ok(())
}
