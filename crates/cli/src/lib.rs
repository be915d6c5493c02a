pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "gifting",
    about = "Gifting operator CLI",
    long_about = "Run gift recommendations locally, browse the built-in tables, inspect config, and check readiness.",
    after_help = "Examples:\n  gifting recommend --relationship Mother --occasion Diwali --budget 3000\n  gifting catalog occasions\n  gifting doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Produce recommendations for one request using the configured engine")]
    Recommend(RecommendArgs),
    #[command(about = "List the built-in relationship, occasion, or gift catalog tables")]
    Catalog {
        #[arg(value_enum, default_value_t = CatalogSection::Categories)]
        section: CatalogSection,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, catalog integrity, and generator readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct RecommendArgs {
    #[arg(long)]
    pub relationship: String,
    #[arg(long)]
    pub occasion: String,
    #[arg(long, help = "Budget in whole rupees")]
    pub budget: i64,
    #[arg(long, default_value = "Adult")]
    pub age_group: String,
    #[arg(long, default_value = "Traditional")]
    pub vibe: String,
    #[arg(long, default_value = "")]
    pub gender: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    #[arg(long = "gift-type", help = "Restrict to a gift type; repeat for several")]
    pub gift_types: Vec<String>,
    #[arg(long, help = "Number of recommendations (defaults to engine.max_recommendations)")]
    pub count: Option<usize>,
    #[arg(long, help = "Skip the LLM generator even when it is configured")]
    pub rules_only: bool,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogSection {
    Relationships,
    Occasions,
    Categories,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(&args),
        Command::Catalog { section, json } => commands::catalog::run(section, json),
        Command::Config => commands::CommandResult::ok(commands::config::run()),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
