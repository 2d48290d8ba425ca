//! CLI Adapter.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::AppContext;
use crate::app::commands::{check, list, render};
use crate::app::config::{build_store, load_config};
use crate::domain::{AppError, LogConfig};
use crate::ports::PromptStore;

#[derive(Parser)]
#[command(name = "prompt-engine")]
#[command(version)]
#[command(
    about = "Render schema-driven prompt definitions into model request payloads",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./prompt-engine.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory of prompt definitions, overriding the configured one
    #[arg(long, global = true, value_name = "DIR")]
    prompts: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a prompt and print the request payload as JSON
    #[clap(visible_alias = "r")]
    Render {
        /// Prompt key
        key: String,
        /// Argument source as [TYPE=]FILE; '-' reads stdin. Repeatable, in priority order
        #[arg(short = 's', long = "source", value_name = "[TYPE=]FILE")]
        sources: Vec<render::SourceArg>,
        /// Print how each argument was bound to stderr
        #[arg(long)]
        explain: bool,
    },
    /// List available prompts
    #[clap(visible_alias = "ls")]
    List,
    /// Validate prompt definitions
    Check {
        /// Prompt keys to check (all when omitted)
        keys: Vec<String>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(0) => {}
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<i32, AppError> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.log);

    let store = build_store(&config, cli.prompts.as_deref())?;
    let ctx = AppContext::new(store);

    match cli.command {
        Commands::Render { key, sources, explain } => run_render(&ctx, &key, &sources, explain),
        Commands::List => run_list(&ctx).map(|_| 0),
        Commands::Check { keys } => run_check(&ctx, &keys),
    }
}

/// Log to stderr; `RUST_LOG` wins over the configured filter.
fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn run_render<S: PromptStore>(
    ctx: &AppContext<S>,
    key: &str,
    sources: &[render::SourceArg],
    explain: bool,
) -> Result<i32, AppError> {
    let sources = render::load_sources(sources, io::stdin().lock())?;
    let outcome = render::execute(ctx, key, &sources)?;

    if explain {
        for line in outcome.explain() {
            eprintln!("{}", line);
        }
    }

    let json = serde_json::to_string_pretty(&outcome.payload)
        .map_err(|e| AppError::parse_error("rendered payload", e))?;
    println!("{}", json);
    Ok(0)
}

fn run_list<S: PromptStore>(ctx: &AppContext<S>) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    for summary in list::execute(ctx)? {
        writeln!(stdout, "{}\t{}\t{}", summary.key, summary.version, summary.model)?;
    }
    Ok(())
}

fn run_check<S: PromptStore>(
    ctx: &AppContext<S>,
    keys: &[String],
) -> Result<i32, AppError> {
    let report = check::execute(ctx, keys)?;

    for failure in &report.failures {
        eprintln!("✗ {}: {}", failure.key, failure.message);
    }
    if report.is_ok() {
        println!("✅ {} prompt definition(s) valid", report.checked.len());
        Ok(0)
    } else {
        println!(
            "{} of {} prompt definition(s) invalid",
            report.failures.len(),
            report.checked.len()
        );
        Ok(1)
    }
}

