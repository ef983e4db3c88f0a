//! CLI interface for daily-concept

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::config::{Config, ConfigOverrides};
use crate::glossary::GlossaryStore;
use crate::history::{HistoryRepository, JsonFileHistory, MemoryHistory};
use crate::selector::DailySelector;

#[derive(Parser)]
#[command(name = "daily-concept")]
#[command(about = "Serve a daily glossary concept and a searchable library", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Glossary CSV with Concept and Definition columns
    #[arg(long, global = true)]
    glossary: Option<PathBuf>,

    /// History JSON file
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true, env = "PORT")]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default when no command given)
    Serve {
        /// Keep history in memory only
        #[arg(long)]
        ephemeral: bool,
    },
    /// Print the concept for today, recording it like a page visit
    Today {
        /// Day to select for (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List every concept in the glossary
    List {
        /// Only concepts whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a single concept
    Show {
        /// Exact concept name
        concept: String,
    },
    /// Show which concept was shown on which day
    History,
    /// Print the effective configuration
    Config,
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?.with_overrides(ConfigOverrides {
        host: cli.host,
        port: cli.port,
        glossary_path: cli.glossary,
        history_path: cli.history,
    });
    debug!("Effective configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Serve { ephemeral: false }) {
        Commands::Serve { ephemeral } => {
            let selector = build_selector(&config, ephemeral)?;
            crate::server::start(&config.server, Arc::new(selector)).await?;
        }
        Commands::Today { date } => {
            let selector = build_selector(&config, false)?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let entry = selector.today_concept(date)?;
            println!("📘 {} ({})", entry.concept, date);
            println!();
            println!("{}", entry.definition);
        }
        Commands::List { search } => {
            let store = load_store(&config)?;
            let entries = store.search(search.as_deref().unwrap_or(""));
            if entries.is_empty() {
                println!("No concepts match.");
            }
            for entry in entries {
                println!("{}", entry.concept);
                println!("    {}", entry.definition);
            }
        }
        Commands::Show { concept } => {
            let store = load_store(&config)?;
            let entry = store.find(&concept)?;
            println!("{}", entry.concept);
            println!();
            println!("{}", entry.definition);
        }
        Commands::History => {
            let history = JsonFileHistory::new(&config.data.history_path);
            let record = history.load()?;
            if record.is_empty() {
                println!("No concepts shown yet.");
            }
            for (date, concept) in record.iter() {
                println!("{}  {}", date, concept);
            }
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn load_store(config: &Config) -> Result<GlossaryStore> {
    GlossaryStore::load(&config.data.glossary_path).context("Glossary could not be loaded")
}

fn build_selector(config: &Config, ephemeral: bool) -> Result<DailySelector> {
    let store = Arc::new(load_store(config)?);
    let history: Arc<dyn HistoryRepository> = if ephemeral {
        Arc::new(MemoryHistory::new())
    } else {
        Arc::new(JsonFileHistory::new(&config.data.history_path))
    };
    Ok(DailySelector::new(store, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_today_with_date() {
        let cli = Cli::try_parse_from(["daily-concept", "today", "--date", "2025-02-03"]).unwrap();
        match cli.command {
            Some(Commands::Today { date }) => assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 3)),
            _ => panic!("expected today command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["daily-concept", "serve", "--port", "8081", "--ephemeral"]).unwrap();
        assert_eq!(cli.port, Some(8081));
        assert!(matches!(cli.command, Some(Commands::Serve { ephemeral: true })));
    }

    #[test]
    fn test_no_command_defaults_to_serve() {
        let cli = Cli::try_parse_from(["daily-concept"]).unwrap();
        assert!(cli.command.is_none());
    }
}
