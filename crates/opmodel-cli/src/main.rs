use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use opmodel::{ModelBuilder, ModelInput, ModelReport};
use opmodel_config::ModelConfig;
use opmodel_types::TypeStore;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "opmodel",
    version,
    about = "Build operation models with concrete instantiations of generic classes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build an operation model from a JSON model description
    Build(BuildArgs),
    /// Print the JSON schema of `opmodel.toml`
    ConfigSchema,
}

#[derive(Args)]
struct BuildArgs {
    /// JSON model description (classes, classes under test, input types)
    input: PathBuf,
    /// Path to `opmodel.toml`
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override `resolver.seed`
    #[arg(long)]
    seed: Option<u64>,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Build(args) => {
            let mut config = match &args.config {
                Some(path) => ModelConfig::load_from_path(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => ModelConfig::default(),
            };
            if let Some(seed) = args.seed {
                config.resolver.seed = seed;
            }
            opmodel_config::init_tracing(&config.logging);

            let text = std::fs::read_to_string(&args.input)
                .with_context(|| format!("failed to read {}", args.input.display()))?;
            let input = ModelInput::from_json(&text)
                .with_context(|| format!("failed to parse {}", args.input.display()))?;

            let mut store = TypeStore::with_minimal_jdk();
            let resolver = config.resolver.resolver();
            let model = ModelBuilder::new()
                .extract(&input, &mut store)?
                .build(&store, &resolver)?;
            tracing::info!(
                classes = model.concrete_classes().count(),
                operations = model.operation_count(),
                skipped = model.skipped().len(),
                seed = config.resolver.seed,
                "model built"
            );

            print_output(&ModelReport::new(&store, &model), args.json)?;
            Ok(0)
        }
        Command::ConfigSchema => {
            print_output(&opmodel_config::json_schema(), true)?;
            Ok(0)
        }
    }
}

fn print_output<T: Serialize + 'static>(value: &T, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value)?;
        println!("{out}");
        return Ok(());
    }

    // Human output for the model report. Everything else falls back to pretty JSON.
    let any = value as &dyn std::any::Any;
    if let Some(report) = any.downcast_ref::<ModelReport>() {
        print!("{report}");
    } else {
        let out = serde_json::to_string_pretty(value)?;
        println!("{out}");
    }
    Ok(())
}
