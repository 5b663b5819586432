use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cascade_core::PipelineBuilder;
use cascade_core::domain::{Config, ModuleArgs, Recipe};
use cascade_core::ports::ModuleFactory;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

mod modules;

/// Runs a cascade recipe: setup every module, then process them in
/// dependency order.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the recipe (JSON).
    #[arg(required_unless_present = "list_modules")]
    recipe: Option<PathBuf>,

    /// Process-wide configuration file (JSON object).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override for `@KEY` placeholders in recipe args. Repeatable.
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", value_parser = parse_override)]
    args: Vec<(String, Value)>,

    /// Print the run report as JSON once the run phase is done.
    #[arg(long)]
    report_json: bool,

    /// List the modules this binary can run and exit.
    #[arg(long)]
    list_modules: bool,
}

/// `key=value`; the value is parsed as JSON and falls back to a plain string.
fn parse_override(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Diagnostics go to stderr; stdout carries only the run report lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_recipe(path: &PathBuf) -> Result<Recipe> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read recipe {}", path.display()))?;
    Recipe::from_json(&raw).with_context(|| format!("cannot load recipe {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let catalog = modules::catalog()?;
    if cli.list_modules {
        for name in catalog.known_modules() {
            println!("{name}");
        }
        return Ok(());
    }

    let recipe_path = cli.recipe.context("a recipe path is required")?;
    let recipe = load_recipe(&recipe_path)?;
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    let overrides: ModuleArgs = cli.args.into_iter().collect();

    // abort on a critical error exits the process from inside the run
    let mut orchestrator = PipelineBuilder::new(Arc::new(catalog))
        .config(config)
        .overrides(overrides)
        .build(recipe)?;
    let report = orchestrator.run().await?;

    if cli.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
