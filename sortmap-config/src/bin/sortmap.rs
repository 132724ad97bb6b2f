use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use sortmap_config::{MappingConfig, MappingConfigSource};
use sortmap_core::{
    DeferredOrder, MappingError, Pagination, RevertMode, ShapeId, SortPlan,
    first_unknown_field,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sortmap", about = "Check field lists and ordering expressions against property mappings")]
struct Cli {
    /// Mapping file (TOML or JSON); defaults to $SORTMAP_CONFIG_PATH and friends
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered shape pairs and their fields
    Show,
    /// Validate a comma-separated field list
    Validate {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long, default_value = "")]
        fields: String,
    },
    /// Order a JSON array of records by a client ordering expression
    Sort {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long, default_value = "")]
        order_by: String,
        /// JSON file holding an array of objects
        #[arg(long, required_unless_present = "plan")]
        records: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long)]
        limit: Option<usize>,
        /// Override the configured revert mode
        #[arg(long, value_enum)]
        revert_mode: Option<RevertModeArg>,
        /// Print the compiled steps and SQL ORDER BY instead of sorting
        #[arg(long)]
        plan: bool,
    },
}

#[derive(clap::Args)]
struct PairArgs {
    /// Public (client-facing) shape
    #[arg(long)]
    public: String,
    /// Internal (storage) shape
    #[arg(long)]
    internal: String,
}

impl PairArgs {
    fn ids(&self) -> (ShapeId, ShapeId) {
        (ShapeId::new(&self.public), ShapeId::new(&self.internal))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RevertModeArg {
    Cumulative,
    PerProperty,
}

impl From<RevertModeArg> for RevertMode {
    fn from(arg: RevertModeArg) -> Self {
        match arg {
            RevertModeArg::Cumulative => RevertMode::Cumulative,
            RevertModeArg::PerProperty => RevertMode::PerProperty,
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<MappingConfig> {
    let (config, source) = match path {
        Some(path) => (
            MappingConfig::load_from_file(&path)?,
            MappingConfigSource::File(path),
        ),
        None => MappingConfig::load_from_env()?,
    };
    info!(?source, pairs = config.mappings.len(), "loaded mapping config");
    Ok(config)
}

fn read_records(path: &Path) -> Result<Vec<Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} must hold a JSON array of records", path.display()))
}

fn main() -> Result<ExitCode> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;
    let registry = config.to_registry()?;

    match cli.command {
        Command::Show => {
            for (public, internal, table) in registry.iter() {
                println!("{public} -> {internal}");
                for (field, mapping) in table.iter() {
                    let revert = if mapping.revert() { " (revert)" } else { "" };
                    println!(
                        "  {field}: {}{revert}",
                        mapping.destination_properties().join(", ")
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { pair, fields } => {
            let (public, internal) = pair.ids();
            let table = registry.resolve(&public, &internal)?;
            match first_unknown_field(&fields, table) {
                None => {
                    println!("valid");
                    Ok(ExitCode::SUCCESS)
                }
                Some(field) => {
                    println!("invalid (unknown field: {field})");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Sort {
            pair,
            order_by,
            records,
            offset,
            limit,
            revert_mode,
            plan,
        } => {
            let (public, internal) = pair.ids();
            let table = registry.resolve(&public, &internal)?;
            let mode = revert_mode.map_or(config.revert_mode, Into::into);

            let compiled = match SortPlan::compile_with(&order_by, table, mode) {
                Ok(compiled) => compiled,
                Err(MappingError::InvalidField(field)) => {
                    println!("invalid (unknown field: {field})");
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => return Err(err.into()),
            };

            if plan {
                for step in compiled.steps() {
                    println!("{} {:?}", step.property, step.order);
                }
                println!("ORDER BY {}", compiled.apply(DeferredOrder::new()).to_sql());
                return Ok(ExitCode::SUCCESS);
            }

            let Some(records) = records else {
                anyhow::bail!("--records is required unless --plan is given");
            };
            let sorted = compiled.apply(read_records(&records)?);
            let page = Pagination::new(offset, limit.unwrap_or(usize::MAX)).apply(sorted);
            println!("{}", serde_json::to_string_pretty(&page)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
