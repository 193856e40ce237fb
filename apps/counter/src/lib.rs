//! # Madang Counter Library
//!
//! Core library for the Madang bookstore counter.
//! `main.rs` only calls [`run`]; everything else lives here so it can be
//! tested.
//!
//! ## Module Organization
//! ```text
//! madang_counter/
//! ├── lib.rs          ◄─── You are here (startup, dispatch, shutdown)
//! ├── cli.rs          ◄─── clap definitions
//! ├── shell.rs        ◄─── Interactive session (lookup + order views)
//! ├── render.rs       ◄─── tabled output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database handle
//! │   ├── catalog.rs  ◄─── Book list cache
//! │   └── config.rs   ◄─── Layered configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── customer.rs ◄─── Lookup, resolution, registration
//! │   ├── order.rs    ◄─── Transaction entry submit
//! │   └── book.rs     ◄─── Catalog listing
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::{book, customer, order};
use error::{ApiError, ApiResult};
use shell::Shell;
use state::{CatalogState, CounterConfig, DbState};

/// Runs the counter application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,madang=debug,sqlx=warn; override with RUST_LOG      │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • flags > MADANG_* env > counter.toml > defaults                    │
/// │                                                                         │
/// │  3. Open Database ────────────────────────────────────────────────────► │
/// │     • Missing file: create schema, load seed CSVs                       │
/// │     • Bootstrap failure: exit non-zero                                  │
/// │                                                                         │
/// │  4. Run the command (shell by default)                                  │
/// │                                                                         │
/// │  5. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                let body = serde_json::to_string(&err).unwrap_or_else(|_| err.to_string());
                println!("{}", body);
            } else {
                eprintln!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}

/// Loads config, opens the database, runs one command, closes the pool.
pub async fn execute(cli: Cli) -> ApiResult<()> {
    let config = CounterConfig::load(&cli.overrides())?;

    info!(
        database = %config.database_path.display(),
        seed_dir = %config.seed_dir.display(),
        "Starting Madang counter"
    );

    let db = DbState::open(&config).await?;
    if let Some(summary) = db.inner().seeded() {
        info!(
            customers = summary.customers,
            books = summary.books,
            orders = summary.orders,
            "New database bootstrapped"
        );
    }
    let catalog = CatalogState::new();

    let result = match cli.command() {
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            Shell::new(stdin, std::io::stdout(), &db, &catalog, &config)
                .run()
                .await
        }
        command => {
            let mut stdout = std::io::stdout();
            dispatch(&command, cli.json, &db, &catalog, &config, &mut stdout).await
        }
    };

    db.close().await;
    result
}

/// Runs a one-shot subcommand and writes its result to `out`.
pub async fn dispatch<W: Write>(
    command: &Command,
    json: bool,
    db: &DbState,
    catalog: &CatalogState,
    config: &CounterConfig,
    out: &mut W,
) -> ApiResult<()> {
    match command {
        Command::Shell => Err(ApiError::internal("the shell is not a one-shot command")),
        Command::Lookup { name } => {
            let history = customer::lookup_history(db, name).await?;
            if json {
                write_json(out, &history)
            } else {
                writeln!(out, "{}", render::history(name, &history, config))?;
                Ok(())
            }
        }
        Command::Order { .. } => {
            let form = command
                .order_form()
                .ok_or_else(|| ApiError::internal("order form missing"))?;
            let placed = order::place_order(db, catalog, &form, order::today()).await?;
            if json {
                write_json(out, &placed)
            } else {
                let bookname = db
                    .inner()
                    .books()
                    .get_by_id(placed.order.bookid)
                    .await?
                    .map(|b| b.bookname);
                writeln!(out, "{}", render::placed(&placed, bookname.as_deref(), config))?;
                Ok(())
            }
        }
        Command::Register {
            name,
            address,
            phone,
        } => {
            let created =
                customer::register_customer(db, catalog, name, address, phone.as_deref()).await?;
            if json {
                write_json(out, &created)
            } else {
                writeln!(out, "{}", render::registered(&created))?;
                Ok(())
            }
        }
        Command::Books => {
            let books = book::list_books(db).await?;
            if json {
                write_json(out, &books)
            } else {
                writeln!(out, "{}", render::books(&books, config))?;
                Ok(())
            }
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> ApiResult<()> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("JSON encoding failed: {}", e)))?;
    writeln!(out, "{}", body)?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=madang=trace` - Show trace for madang crates only
/// - Default: info, debug for madang crates
///
/// Logs go to stderr so they never mix with tables on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,madang=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
