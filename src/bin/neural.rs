//! Neural CLI - Command-line interface for Telos Neural
//!
//! Commands:
//! - assess: Score raw assessment input and print the report
//! - validate: Check assessment input records without scoring
//! - catalog: Print the vulnerability catalog
//! - doctor: Diagnose configuration and environment

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use telos_neural::assessment::{collect_issues, parse_input, Assessor, RawAssessmentInput, CATALOG};
use telos_neural::config::AssessmentConfig;
use telos_neural::{AssessmentError, NEURAL_VERSION, PRODUCER_NAME};

/// Neural - Deterministic neural-metrics assessment engine
#[derive(Parser)]
#[command(name = "neural")]
#[command(author = "Telos Wellness")]
#[command(version = NEURAL_VERSION)]
#[command(about = "Assess behavioral wellness data as neural metrics", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score raw assessment input and print the report
    Assess {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,

        /// Threshold configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check assessment input records without scoring
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the vulnerability catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration and environment
    Doctor {
        /// Check a threshold configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), NeuralCliError> {
    match cli.command {
        Commands::Assess {
            input,
            output,
            format,
            config,
        } => cmd_assess(&input, &output, format, config.as_deref()),

        Commands::Validate { input, json } => cmd_validate(&input, json),

        Commands::Catalog { json } => cmd_catalog(json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),
    }
}

fn cmd_assess(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<(), NeuralCliError> {
    let assessor = match config {
        Some(path) => Assessor::with_config(AssessmentConfig::from_file(path)?)?,
        None => Assessor::new(),
    };

    let raw = parse_input(&read_input(input)?)?;
    info!(records = record_count(&raw), "assessing input");

    let report = assessor.assess(&raw)?;
    let output_data = match format {
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };

    if is_stdio(output) {
        println!("{}", output_data);
    } else {
        fs::write(output, output_data + "\n")?;
        debug!(path = %output.display(), "wrote report");
    }

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), NeuralCliError> {
    let raw = parse_input(&read_input(input)?)?;
    let issues = collect_issues(&raw);

    let report = ValidationReport {
        total_records: record_count(&raw),
        invalid_fields: issues.len(),
        errors: issues
            .iter()
            .map(|issue| ValidationErrorDetail {
                sequence: issue.sequence.to_string(),
                index: issue.index,
                error: issue.message.clone(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:  {}", report.total_records);
        println!("Invalid fields: {}", report.invalid_fields);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - {}[{}]: {}", err.sequence, err.index, err.error);
            }
        }
    }

    if report.invalid_fields > 0 {
        Err(NeuralCliError::ValidationFailed(report.invalid_fields))
    } else {
        Ok(())
    }
}

fn cmd_catalog(json: bool) -> Result<(), NeuralCliError> {
    if json {
        let entries: Vec<serde_json::Value> = CATALOG
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "area": entry.area,
                    "metric": entry.area.metric(),
                    "description": entry.description,
                    "impact": entry.impact,
                    "recommendations": entry.recommendations,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Vulnerability Catalog");
    println!("=====================");
    for entry in CATALOG.iter() {
        println!();
        println!("{} ({})", entry.area.label(), entry.area.metric().name());
        println!("  {}", entry.description);
        println!("  Impact: {}", entry.impact);
        for rec in entry.recommendations {
            println!("  - {}", rec);
        }
    }
    Ok(())
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), NeuralCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "neural_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Neural version {}", NEURAL_VERSION),
    });

    checks.push(DoctorCheck {
        name: "catalog".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} vulnerability areas loaded", CATALOG.len()),
    });

    // Threshold configuration
    match config {
        Some(path) if !path.exists() => checks.push(DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Warning,
            message: "Config file does not exist, defaults apply".to_string(),
        }),
        Some(path) => match AssessmentConfig::from_file(path) {
            Ok(cfg) => checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "Config valid (vulnerability < {}, guidance < {}, retention {} days)",
                    cfg.vulnerability_threshold, cfg.guidance_threshold, cfg.retention_days
                ),
            }),
            Err(e) => checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
            }),
        },
        None => checks.push(DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Ok,
            message: "Using default thresholds".to_string(),
        }),
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (pass input with -i <file>)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready for -i -)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: NEURAL_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Neural Doctor Report");
        println!("====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");
        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(NeuralCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn is_stdio(path: &Path) -> bool {
    path.to_string_lossy() == "-"
}

fn read_input(input: &Path) -> Result<String, NeuralCliError> {
    if is_stdio(input) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn record_count(input: &RawAssessmentInput) -> usize {
    input.digital_behavior.as_ref().map_or(0, Vec::len)
        + input.emotional_responses.as_ref().map_or(0, Vec::len)
        + input.attention_metrics.as_ref().map_or(0, Vec::len)
        + input.decision_patterns.as_ref().map_or(0, Vec::len)
}

// Error types

#[derive(Debug)]
enum NeuralCliError {
    Io(io::Error),
    Assessment(AssessmentError),
    Json(serde_json::Error),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for NeuralCliError {
    fn from(e: io::Error) -> Self {
        NeuralCliError::Io(e)
    }
}

impl From<AssessmentError> for NeuralCliError {
    fn from(e: AssessmentError) -> Self {
        NeuralCliError::Assessment(e)
    }
}

impl From<serde_json::Error> for NeuralCliError {
    fn from(e: serde_json::Error) -> Self {
        NeuralCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<NeuralCliError> for CliError {
    fn from(e: NeuralCliError) -> Self {
        match e {
            NeuralCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            NeuralCliError::Assessment(e) => {
                let (code, hint) = match &e {
                    AssessmentError::ParseError(_) | AssessmentError::JsonError(_) => {
                        ("PARSE_ERROR", "Check JSON syntax and field names")
                    }
                    AssessmentError::InvalidInput(_) => {
                        ("INVALID_INPUT", "Run 'neural validate' for details")
                    }
                    AssessmentError::ConfigError(_) => {
                        ("CONFIG_ERROR", "Run 'neural doctor --config <file>' for details")
                    }
                    AssessmentError::StoreError(_) | AssessmentError::InsufficientHistory(_) => {
                        ("ASSESSMENT_ERROR", "Retry the command")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            NeuralCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            NeuralCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} fields failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            NeuralCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    invalid_fields: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    sequence: String,
    index: usize,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
