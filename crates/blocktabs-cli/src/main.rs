//! Tabs Block CLI
//!
//! Provides commands for:
//! - `render`: Render a parsed Tabs block to markup
//! - `simulate`: Replay key presses against a block and print tab state
//! - `save`, `show`, `list`: Manage stored Tabs instances

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use blocktabs_core::{init_logging, Config};

/// Tabs Block - accessible tab activation for rendered blocks.
#[derive(Parser)]
#[command(name = "blocktabs", version, about)]
struct Cli {
    /// Path to a JSON configuration file.
    #[arg(long, global = true, env = "BLOCKTABS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a parsed block (JSON) to HTML.
    Render {
        /// Parsed block tree as JSON.
        block: PathBuf,
    },
    /// Replay key presses and print the tab state after each one.
    Simulate {
        block: PathBuf,
        /// DOM key name, e.g. ArrowRight or Enter. Repeatable.
        #[arg(short, long = "key", required = true)]
        keys: Vec<String>,
        /// Header holding focus before the first key; defaults to the active tab.
        #[arg(long)]
        focus: Option<String>,
    },
    /// Store a parsed block as a new Tabs instance.
    Save {
        block: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    /// Show a stored instance.
    Show {
        id: String,
        /// Print rendered markup instead of tab state.
        #[arg(long)]
        html: bool,
    },
    /// List stored instances.
    List,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    };

    let filter = if cli.verbose { "debug" } else { config.log_filter.as_str() };
    init_logging(filter);

    let result = match cli.command {
        Commands::Render { block } => commands::render(&block),
        Commands::Simulate { block, keys, focus } => {
            commands::simulate(&block, &keys, focus.as_deref())
        }
        Commands::Save { block, name } => commands::save(&config, &block, name.as_deref()),
        Commands::Show { id, html } => commands::show(&config, &id, html),
        Commands::List => commands::list(&config),
    };

    if let Err(err) = result {
        tracing::debug!(error = ?err, "Command failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
