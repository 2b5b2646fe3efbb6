use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use inquire::Password;
use tracing::debug;
use weather_core::{Config, HistoryEntry, HistoryStore, provider_from_config};

use crate::{dashboard, session::Session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Fetch and display weather data for cities.",
    args_conflicts_with_subcommands = true,
    after_help = "A city named like a subcommand (history, configure, dashboard) \
                  is looked up after `--`, e.g. `weather -- history`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub lookup: LookupArgs,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// City names to fetch weather for (optional).
    pub cities: Vec<String>,

    /// Force interactive mode even if cities are provided.
    #[arg(short, long)]
    pub interactive: bool,

    /// Do not append results to the history file.
    #[arg(long)]
    pub no_history: bool,

    /// History file to append to.
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show saved lookups.
    History {
        /// Number of most recent entries to show.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Delete the history file instead of showing it.
        #[arg(long)]
        clear: bool,

        #[arg(long, value_name = "PATH")]
        history_file: Option<PathBuf>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Open the full-screen weather dashboard.
    Dashboard {
        /// Append successful lookups to the history file.
        #[arg(long)]
        save_history: bool,

        #[arg(long, value_name = "PATH")]
        history_file: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Some(Command::Configure) => configure(config),
            Some(Command::History { limit, clear, history_file }) => {
                let store = HistoryStore::new(config.history_file(history_file.as_deref()));
                show_history(&store, limit, clear)
            }
            Some(Command::Dashboard { save_history, history_file }) => {
                let provider = provider_from_config(&config, config.api_key()?)?;
                let history = save_history
                    .then(|| HistoryStore::new(config.history_file(history_file.as_deref())));
                dashboard::run(provider.as_ref(), history).await
            }
            None => lookup(&config, self.lookup).await,
        }
    }
}

async fn lookup(config: &Config, args: LookupArgs) -> anyhow::Result<()> {
    let provider = provider_from_config(config, config.api_key()?)?;
    let history = (!args.no_history)
        .then(|| HistoryStore::new(config.history_file(args.history_file.as_deref())));
    debug!(?history, "history target");

    let session = Session::new(provider.as_ref(), history);
    let mut out = io::stdout().lock();

    // Cities on the command line without -i means batch mode.
    if !args.cities.is_empty() && !args.interactive {
        session.run_batch(&args.cities, &mut out).await?;
    } else {
        session.run_interactive(io::stdin().lock(), &mut out).await?;
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    if !io::stdin().is_terminal() {
        anyhow::bail!("`weather configure` needs an interactive terminal");
    }

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    let path = config.save()?;
    println!("API key saved to {}", path.display());

    Ok(())
}

fn show_history(store: &HistoryStore, limit: usize, clear: bool) -> anyhow::Result<()> {
    if clear {
        if store.clear()? {
            println!("History cleared: {}", store.path().display());
        } else {
            println!("No history to clear.");
        }
        return Ok(());
    }

    let entries = store.recent(limit)?;
    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!("{}", history_table(&entries));
    Ok(())
}

fn history_table(entries: &[HistoryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("City").add_attribute(Attribute::Bold),
        Cell::new("Time").add_attribute(Attribute::Bold),
        Cell::new("Temp (°C)").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Humidity").add_attribute(Attribute::Bold),
        Cell::new("Wind (m/s)").add_attribute(Attribute::Bold),
    ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.city),
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(entry.temperature).set_alignment(CellAlignment::Right),
            Cell::new(&entry.description),
            Cell::new(format!("{}%", entry.humidity)).set_alignment(CellAlignment::Right),
            Cell::new(entry.wind_speed).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
