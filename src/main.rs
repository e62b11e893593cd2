// SPDX-License-Identifier: PMPL-1.0-or-later
//! rgaa-image-checker CLI - RGAA 4.1 image accessibility checker

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rgaa_image_checker::catalog::Catalog;
use rgaa_image_checker::checks;
use rgaa_image_checker::config::{self, CompiledRules};
use rgaa_image_checker::report::{generate_report, OutputFormat};
use rgaa_image_checker::scanner::{self, FileReport};
use rgaa_image_checker::Validator;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// RGAA 4.1 image accessibility checker for HTML documents
#[derive(Parser)]
#[command(name = "rgaa-image-checker")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every HTML file in a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        #[command(flatten)]
        opts: RunOptions,
    },

    /// Analyze a single HTML file
    Analyze {
        /// File to analyze
        file: PathBuf,

        #[command(flatten)]
        opts: RunOptions,
    },

    /// List the RGAA image criteria
    Criteria {
        /// Output format
        #[arg(long, default_value = "text")]
        format: CriteriaFormatArg,

        /// Criteria catalog (JSON) replacing the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination (defaults to .rgaa-checker.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunOptions {
    /// Output format
    #[arg(long, default_value = "text")]
    format: FormatArg,

    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Configuration file (defaults to .rgaa-checker.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Criteria catalog (JSON) replacing the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
    /// Standalone HTML report
    Html,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
            FormatArg::Html => OutputFormat::Html,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CriteriaFormatArg {
    Text,
    Json,
}

fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("rgaa_image_checker=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("rgaa_image_checker={}", level)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Catalog> {
    match path {
        Some(p) => Catalog::load(p)
            .with_context(|| format!("Failed to load criteria catalog {}", p.display())),
        None => Ok(Catalog::builtin().clone()),
    }
}

/// Load configuration, set up logging and build the validator
fn prepare(opts: &RunOptions) -> anyhow::Result<Validator> {
    let config_path = opts
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let config = config::load_config(&config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;

    init_logging(opts.verbose, &config.log.level);

    let rules = CompiledRules::compile(&config.rules).context("Invalid rule configuration")?;
    let catalog = load_catalog(opts.catalog.as_deref())?;
    Ok(Validator::new(catalog, rules))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { dir, opts } => {
            let validator = prepare(&opts)?;
            let reports = scanner::scan_directory(&dir, &validator)?;
            finish(&reports, &validator, &opts)?;
        }

        Commands::Analyze { file, opts } => {
            let validator = prepare(&opts)?;
            let report = scanner::scan_file(&file, &validator)
                .with_context(|| format!("Failed to analyze {}", file.display()))?;
            finish(&[report], &validator, &opts)?;
        }

        Commands::Criteria { format, catalog } => {
            init_logging(false, "warn");
            let catalog = load_catalog(catalog.as_deref())?;
            match format {
                CriteriaFormatArg::Json => {
                    println!("{}", serde_json::to_string_pretty(catalog.image_criteria())?);
                }
                CriteriaFormatArg::Text => {
                    for criterion in catalog.image_criteria() {
                        println!("{} - {}", criterion.number, criterion.title);
                        println!("    WCAG: {}", criterion.wcag_reference());
                    }

                    println!("\nChecks:");
                    for check in checks::default_checks() {
                        println!(
                            "  [{}] {} - {}",
                            check.criterion(),
                            check.name(),
                            check.description()
                        );
                    }
                }
            }
        }

        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// Render, write, and exit non-zero when a critical issue was found
fn finish(reports: &[FileReport], validator: &Validator, opts: &RunOptions) -> anyhow::Result<()> {
    let rendered = generate_report(reports, validator.catalog(), opts.format.into());
    write_output(&rendered, opts.output.as_deref())?;

    if reports.iter().any(|r| r.issues.has_critical()) {
        std::process::exit(1);
    }
    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)
                .with_context(|| format!("Failed to write report to {}", p.display()))?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
