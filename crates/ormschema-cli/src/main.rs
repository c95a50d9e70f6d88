mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use config::{AliasCase, TranslateConfig};
use logging::{LogFormat, init_logging};
use ormschema_core::{
    EntityCatalog, Error as CoreError, build_relation_graph_report, validate_catalog,
};
use ormschema_translate::{AliasGenerator, ConfigurationError, TranslationOptions, translate};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("catalog error: {0}")]
    Core(#[from] CoreError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "ormschema", version, about = "Translate ORM entities into schema classes")]
struct Cli {
    /// Log output format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit the JSON Schema of a generated class.
    Translate(TranslateArgs),
    /// Print the relationship graph report of a catalog.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Entity catalog (JSON).
    #[arg(long)]
    catalog: PathBuf,
    /// Entity to translate.
    #[arg(long)]
    entity: String,
    /// TOML file with translation settings; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Name of the generated schema class.
    #[arg(long)]
    name: Option<String>,
    /// Field path to keep (repeatable, dot-separated).
    #[arg(long, value_name = "PATH")]
    include: Vec<String>,
    /// Field path to drop (repeatable, dot-separated).
    #[arg(long, value_name = "PATH")]
    exclude: Vec<String>,
    /// Relationship levels to translate.
    #[arg(long)]
    depth: Option<usize>,
    /// Alias strategy applied to every field.
    #[arg(long, value_enum)]
    alias: Option<AliasCase>,
    /// Accept field names as well as aliases when populating.
    #[arg(long, default_value_t = false)]
    populate_by_name: bool,
    /// Output path for the JSON Schema; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Entity catalog (JSON).
    #[arg(long)]
    catalog: PathBuf,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;

    match cli.command {
        Command::Translate(args) => run_translate(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_translate(args: TranslateArgs) -> Result<(), CliError> {
    let run_id = Uuid::new_v4().to_string();
    let started_at = chrono::Utc::now();
    let timer = Instant::now();
    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = "translate",
        started_at = %started_at.to_rfc3339()
    );

    let catalog = load_catalog(&args.catalog)?;
    let entity = catalog.require(&args.entity)?;
    let out = args.out.clone();
    let options = resolve_options(args)?;

    let report = build_relation_graph_report(&catalog);
    if options.depth > 0 && report.has_cycle() {
        tracing::warn!(
            event = "cyclic_catalog",
            cycle = ?report.cycle,
            depth = options.depth,
            "relationship cycle; nesting stops at the depth bound"
        );
    }

    let class = translate(&catalog, entity, &options)?;
    tracing::info!(
        event = "class_translated",
        class = %class.name,
        entity = %entity.name,
        fields = class.fields.len()
    );

    let json = serde_json::to_string_pretty(&class.json_schema())?;
    match out {
        Some(path) => {
            std::fs::write(&path, format!("{json}\n"))?;
            tracing::info!(event = "schema_written", path = %path.display());
        }
        None => println!("{json}"),
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", run_id = %run_id, status = "success", duration_ms = duration_ms);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let catalog = load_catalog(&args.catalog)?;
    let report = build_relation_graph_report(&catalog);
    tracing::info!(
        event = "catalog_inspected",
        entities = report.summary.entities,
        relationships = report.summary.relationships,
        has_cycle = report.has_cycle()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_catalog(path: &Path) -> Result<EntityCatalog, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let catalog: EntityCatalog = serde_json::from_str(&contents)?;
    validate_catalog(&catalog)?;
    tracing::info!(
        event = "catalog_loaded",
        path = %path.display(),
        entities = catalog.entities.len()
    );
    Ok(catalog)
}

/// Merge the optional config file with command-line flags.
fn resolve_options(args: TranslateArgs) -> Result<TranslationOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => TranslateConfig::load(path)?.into_options(),
        None => TranslationOptions::default(),
    };

    if let Some(name) = args.name {
        options.name = Some(name);
    }
    if !args.include.is_empty() {
        options.include = args.include.into_iter().collect();
    }
    if !args.exclude.is_empty() {
        options.exclude = args.exclude.into_iter().collect();
    }
    if let Some(depth) = args.depth {
        options.depth = depth;
    }
    if let Some(alias) = args.alias {
        options.alias = Some(AliasGenerator::from(alias));
    }
    if args.populate_by_name {
        options.populate_by_name = true;
    }

    Ok(options)
}
