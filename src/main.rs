//! Command-line entry point.
//!
//! Drives the library against a live console server from a terminal: fetches one
//! page of a list endpoint through the classified API client and prints it as a
//! text grid, and manages the stored token for header-origin deployments.
//!
//! ```text
//! consolekit --config console.toml list /users --page 2 --page-size 30 \
//!     --filter '{"is_active": true}' --sort -date_joined
//! consolekit --config console.toml login <token>
//! consolekit --config console.toml logout
//! ```
//!
//! A terminal has no parent shell, so the host runs detached and every toast or
//! dialog lands on the [`TerminalFrame`].

#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use consolekit::app::DataGridController;
use consolekit::domain::{ColumnDescriptor, ColumnSet, FilterState, PaginationState, SortKey};
use consolekit::observability::init_tracing;
use consolekit::storage::{JsonTokenStore, TokenStore};
use consolekit::ui::render_grid;
use consolekit::{initialize, Config, ConsoleError, Host, LocalFrame, Result};
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "consolekit", about = "Admin console API and grid CLI")]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, env = "CONSOLEKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page of a list endpoint and print it.
    List {
        /// Endpoint path below the API prefix.
        path: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        page_size: Option<u32>,

        /// Filter values as a JSON object.
        #[arg(long)]
        filter: Option<String>,

        /// Sort fields; prefix with `-` for descending.
        #[arg(long, allow_hyphen_values = true)]
        sort: Vec<String>,

        /// Columns as `key:Label` pairs. Inferred from the first row when omitted.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },
    /// Store a token for header-origin deployments.
    Login { token: String },
    /// Remove the stored token.
    Logout,
}

/// Same-frame dialogs on stderr/stdin.
#[derive(Debug, Default)]
struct TerminalFrame;

impl TerminalFrame {
    fn read_line(question: &str) -> Option<String> {
        eprint!("{question} ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl LocalFrame for TerminalFrame {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        Self::read_line(&format!("{message} [y/N]"))
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn prompt(&self, message: &str) -> Option<String> {
        Self::read_line(message)
    }

    fn history_back(&self) {
        tracing::info!("no page history in a terminal");
    }

    fn open_window(&self, url: &str, target: &str) {
        eprintln!("open {url} ({target})");
    }

    fn reload(&self) {
        tracing::info!("nothing to reload in a terminal");
    }

    fn close_modal(&self) {
        tracing::info!("no modal open in a terminal");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // classified failures were already shown through the host
            if !e.is_notified() {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::List {
            path,
            page,
            page_size,
            filter,
            sort,
            columns,
        } => {
            let pagination = PaginationState::from_parts(Some(page), page_size, None);
            let filters = parse_filters(filter.as_deref())?;
            let sort: Vec<SortKey> = sort.iter().map(|s| parse_sort(s)).collect();
            list(config, &path, pagination, filters, sort, &columns).await
        }
        Command::Login { token } => {
            let store = JsonTokenStore::new(config.token_file_path())?;
            store.save(&token)?;
            eprintln!("token saved to {}", store.path().display());
            Ok(())
        }
        Command::Logout => {
            let store = JsonTokenStore::new(config.token_file_path())?;
            store.clear()?;
            eprintln!("token cleared");
            Ok(())
        }
    }
}

async fn list(
    config: &Config,
    path: &str,
    pagination: PaginationState,
    filters: FilterState,
    sort: Vec<SortKey>,
    columns: &[String],
) -> Result<()> {
    let host = Host::detached(Arc::new(TerminalFrame));
    let client = initialize(config, host)?;

    let mut grid = DataGridController::new(parse_columns(columns)?, Some(pagination), filters);
    if !sort.is_empty() {
        // sorting resets to page 1; the fetch below replaces the reload notices
        let _notifications = grid.set_sort(sort)?;
        let _notifications = grid.set_page(pagination.current_page)?;
    }

    let page = client.fetch_page(path, &grid.query()).await?;
    grid.apply_page(&page)?;

    if grid.columns().is_empty() {
        let inferred = infer_columns(&page.items)?;
        grid = DataGridController::new(inferred, Some(*grid.pagination()), grid.filters().clone());
    }

    print!("{}", render_grid(&grid.view_model(&page.items, false)));
    Ok(())
}

fn parse_filters(raw: Option<&str>) -> Result<FilterState> {
    let Some(raw) = raw else {
        return Ok(FilterState::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ConsoleError::InvalidInput(format!(
            "filter must be a JSON object, got {other}"
        ))),
        Err(e) => Err(ConsoleError::InvalidInput(format!("filter is not JSON: {e}"))),
    }
}

fn parse_sort(term: &str) -> SortKey {
    match term.strip_prefix('-') {
        Some(field) => SortKey::desc(field),
        None => SortKey::asc(term),
    }
}

fn parse_columns(specs: &[String]) -> Result<ColumnSet> {
    let descriptors = specs
        .iter()
        .map(|spec| match spec.split_once(':') {
            Some((key, label)) => ColumnDescriptor::text(key.trim(), label.trim()),
            None => ColumnDescriptor::text(spec.trim(), spec.trim()),
        })
        .collect();
    ColumnSet::new(descriptors)
}

fn infer_columns(items: &[Value]) -> Result<ColumnSet> {
    let keys = items
        .first()
        .and_then(Value::as_object)
        .map(|row| row.keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    ColumnSet::new(keys.into_iter().map(|k| ColumnDescriptor::text(k.clone(), k)).collect())
}
