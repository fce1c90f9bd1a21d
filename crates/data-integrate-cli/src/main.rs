// crates/data-integrate-cli/src/main.rs
// ============================================================================
// Module: Data Integrate CLI Entry Point
// Description: Command dispatcher for harness runs and offline validation.
// Purpose: Load configuration and templates, run the orchestrator, report.
// Dependencies: clap, data-integrate-{core,config,clients,dialects}, rand, tokio
// ============================================================================

//! ## Overview
//! `data-integrate run` executes one template end to end. The remaining
//! commands work offline: `config validate`, `template validate`, and
//! `schema preview`, which prints the DDL a run would create without
//! connecting to any database.
//!
//! Exit codes: `0` all assertions passed, `1` an assertion failed, `2` fatal
//! configuration or setup error.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use data_integrate_cli::report::EXIT_FATAL;
use data_integrate_cli::report::exit_code_for;
use data_integrate_cli::report::render_json;
use data_integrate_cli::report::render_text;
use data_integrate_cli::report::write_report;
use data_integrate_cli::wiring::build_catalog;
use data_integrate_cli::wiring::build_event_sink;
use data_integrate_cli::wiring::build_producer;
use data_integrate_cli::wiring::build_streaming;
use data_integrate_config::HarnessConfig;
use data_integrate_config::load_template;
use data_integrate_core::Collaborators;
use data_integrate_core::Dialect;
use data_integrate_core::HintPolicy;
use data_integrate_core::NamespaceAllocator;
use data_integrate_core::Orchestrator;
use data_integrate_core::RunPlan;
use data_integrate_core::SchemaDefinition;
use data_integrate_core::StreamingClient;
use data_integrate_core::SynthesisRequest;
use data_integrate_core::synthesize;
use data_integrate_dialects::create_strategy;
use data_integrate_dialects::producer::create_table_sql;
use data_integrate_dialects::syntax_for;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "data-integrate", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a test template against its target database.
    Run(RunCommand),
    /// Base configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Test template utilities.
    Template {
        /// Selected template subcommand.
        #[command(subcommand)]
        command: TemplateCommand,
    },
    /// Schema synthesis utilities.
    Schema {
        /// Selected schema subcommand.
        #[command(subcommand)]
        command: SchemaCommand,
    },
}

/// Base configuration location.
#[derive(Args, Debug, Clone, Default)]
struct ConfigArgs {
    /// Base configuration file (defaults to `DATA_INTEGRATE_CONFIG` or
    /// `data-integrate.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output format selection.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON for CI.
    Json,
}

/// Hint policy override.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum HintPolicyArg {
    /// Reject unknown type hints.
    Strict,
    /// Classify unknown type hints by keyword.
    Lenient,
}

impl From<HintPolicyArg> for HintPolicy {
    fn from(value: HintPolicyArg) -> Self {
        match value {
            HintPolicyArg::Strict => Self::Strict,
            HintPolicyArg::Lenient => Self::Lenient,
        }
    }
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Test template (YAML).
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Base configuration.
    #[command(flatten)]
    config: ConfigArgs,
    /// Use this namespace instead of generating one.
    #[arg(long, value_name = "NAMESPACE")]
    namespace: Option<String>,
    /// RNG seed for schema and data synthesis.
    #[arg(long)]
    seed: Option<u64>,
    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Also write the JSON report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the base configuration.
    Validate(ConfigArgs),
}

/// Template subcommands.
#[derive(Subcommand, Debug)]
enum TemplateCommand {
    /// Validate a test template.
    Validate(TemplateArgs),
}

/// Schema subcommands.
#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// Print the DDL a run would create, without connecting.
    Preview(PreviewCommand),
}

/// Template location and hint policy.
#[derive(Args, Debug)]
struct TemplateArgs {
    /// Test template (YAML).
    #[arg(long, value_name = "PATH")]
    template: PathBuf,
    /// Base configuration supplying the hint policy.
    #[command(flatten)]
    config: ConfigArgs,
    /// Hint policy override.
    #[arg(long, value_enum)]
    hint_policy: Option<HintPolicyArg>,
}

/// Arguments for `schema preview`.
#[derive(Args, Debug)]
struct PreviewCommand {
    /// Template and policy selection.
    #[command(flatten)]
    template: TemplateArgs,
    /// Namespace for the previewed table name.
    #[arg(long, value_name = "NAMESPACE")]
    namespace: Option<String>,
    /// RNG seed for synthesis.
    #[arg(long)]
    seed: Option<u64>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// JSON shape of `schema preview`.
#[derive(Debug, Serialize)]
struct SchemaPreview<'a> {
    /// Dialect label.
    dialect: &'static str,
    /// Synthesized schema.
    schema: &'a SchemaDefinition,
    /// Rendered DDL.
    ddl: &'a str,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal CLI error; always exits with code 2.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self { message }
    }
}

/// Wraps any displayable error as a fatal CLI error.
fn fatal(err: impl std::fmt::Display) -> CliError {
    CliError::new(err.to_string())
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(command).await,
        Commands::Config { command: ConfigCommand::Validate(args) } => {
            command_config_validate(&args)
        }
        Commands::Template { command: TemplateCommand::Validate(args) } => {
            command_template_validate(&args)
        }
        Commands::Schema { command: SchemaCommand::Preview(command) } => {
            command_schema_preview(&command)
        }
    }
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = HarnessConfig::load(command.config.config.as_deref()).map_err(fatal)?;
    let template =
        load_template(&command.template, config.synthesis.hint_policy).map_err(fatal)?;
    let connection = config.resolve_database(&template.database).map_err(fatal)?;
    let mut strategy = create_strategy(&connection).map_err(fatal)?;
    let events = build_event_sink(&config.logging).map_err(fatal)?;
    let catalog = build_catalog(&config.catalog).map_err(fatal)?;
    let streaming = build_streaming(config.data_service.as_ref()).map_err(fatal)?;
    let producer = build_producer(&config, command.seed);

    let allocator = config.namespace_allocator();
    let namespace = resolve_namespace(&allocator, command.namespace.as_deref(), &template.name);
    let orchestrator = Orchestrator::new(config.orchestrator_config(command.seed));
    let collaborators = Collaborators {
        strategy: strategy.as_mut(),
        catalog: catalog.as_ref(),
        producer: &producer,
        streaming: streaming.as_ref().map(|client| client as &dyn StreamingClient),
        events: events.as_ref(),
    };
    let report = orchestrator.run(&template, &namespace, collaborators).await.map_err(fatal)?;

    if let Some(path) = &command.report {
        write_report(path, &report).map_err(|err| {
            CliError::new(format!("failed to write report {}: {err}", path.display()))
        })?;
    }
    let rendered = match command.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => render_json(&report).map_err(fatal)?,
    };
    write_stdout_line(&rendered).map_err(|err| output_error(&err))?;
    Ok(ExitCode::from(exit_code_for(&report)))
}

/// Adopts a supplied namespace or generates a fresh one.
fn resolve_namespace(
    allocator: &NamespaceAllocator,
    supplied: Option<&str>,
    template_name: &str,
) -> String {
    supplied.map_or_else(
        || allocator.generate_namespace(template_name),
        |namespace| allocator.adopt_namespace(namespace),
    )
}

// ============================================================================
// SECTION: Validation Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let config = HarnessConfig::load(args.config.as_deref()).map_err(fatal)?;
    let message = format!("config ok: {} database profile(s)", config.databases.len());
    write_stdout_line(&message).map_err(|err| output_error(&err))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `template validate`.
fn command_template_validate(args: &TemplateArgs) -> CliResult<ExitCode> {
    let policy = resolve_policy(args.hint_policy, args.config.config.as_deref())?;
    let template = load_template(&args.template, policy).map_err(fatal)?;
    let message = format!(
        "template {} ok: {} database, {} assertion(s)",
        template.name,
        template.database.dialect,
        template.tests.len()
    );
    write_stdout_line(&message).map_err(|err| output_error(&err))?;
    Ok(ExitCode::SUCCESS)
}

/// Selects the hint policy: flag, then config file, then strict.
fn resolve_policy(flag: Option<HintPolicyArg>, config: Option<&Path>) -> CliResult<HintPolicy> {
    if let Some(flag) = flag {
        return Ok(flag.into());
    }
    match config {
        Some(path) => HarnessConfig::load(Some(path))
            .map(|config| config.synthesis.hint_policy)
            .map_err(fatal),
        None => Ok(HintPolicy::default()),
    }
}

// ============================================================================
// SECTION: Schema Preview
// ============================================================================

/// Executes `schema preview`.
fn command_schema_preview(command: &PreviewCommand) -> CliResult<ExitCode> {
    let args = &command.template;
    let policy = resolve_policy(args.hint_policy, args.config.config.as_deref())?;
    let template = load_template(&args.template, policy).map_err(fatal)?;
    let dialect = Dialect::from_tag(&template.database.dialect).map_err(fatal)?;
    let allocator = NamespaceAllocator::default();
    let namespace = resolve_namespace(&allocator, command.namespace.as_deref(), &template.name);
    let plan = RunPlan::resolve(&template, &namespace);

    let request = SynthesisRequest {
        dialect,
        table_name: &plan.table_name,
        field_count: template.schema.field_count,
        row_count: template.data.row_count,
        type_hints: &template.schema.field_types,
        max_field_size: template.schema.max_field_size,
        hint_policy: policy,
    };
    let mut rng = command.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let schema = synthesize(&request, &mut rng).map_err(fatal)?;
    let syntax = syntax_for(dialect);
    let ddl = create_table_sql(|name| syntax.quote_identifier(name), &schema);

    let rendered = match command.format {
        OutputFormat::Text => format!("{ddl};"),
        OutputFormat::Json => {
            let preview = SchemaPreview { dialect: dialect.as_str(), schema: &schema, ddl: &ddl };
            serde_json::to_string_pretty(&preview).map_err(fatal)?
        }
    };
    write_stdout_line(&rendered).map_err(|err| output_error(&err))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output failure.
fn output_error(error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write output: {error}"))
}

/// Emits a fatal error to stderr and returns the fatal exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_FATAL)
}
