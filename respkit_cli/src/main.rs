mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use respkit_lib::seed;
use respkit_lib::{CompanyService, CompanyStore, ServiceConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "respkit")]
#[command(about = "Query and edit the sample company catalogue through result envelopes")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Trace identifier stamped on every envelope
    #[arg(long, global = true)]
    trace_id: Option<String>,

    /// Seed the catalogue from this TOML file instead of the built-in data
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, look up, or create companies
    Companies(commands::companies::CompaniesArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("respkit=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);
    let config = ServiceConfig::from_env();

    let service = match &cli.seed {
        Some(path) => {
            CompanyService::new(CompanyStore::with_seed(seed::load_seed_file(path)?), config)
        }
        None => CompanyService::seeded(config)?,
    };

    let ctx = commands::Context {
        service: &service,
        config,
        format: &format,
        trace_id: cli.trace_id.as_deref(),
    };

    match &cli.command {
        Commands::Companies(args) => commands::companies::run(args, &ctx)?,
    }

    Ok(())
}
