//! # Command Line
//!
//! `madang [--db PATH] [--seed-dir DIR] [--config FILE] [--json] <command>`

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::order::OrderForm;
use crate::state::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "madang")]
#[command(author, version, about = "Madang bookstore counter", long_about = None)]
pub struct Cli {
    /// SQLite database file (default: MADANG_DB_PATH, config file, or madang.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory with the seed CSVs used when the database is first created
    #[arg(long, global = true)]
    pub seed_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/madang/counter.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results of one-shot commands as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Shell,
    /// Show the order history of a customer
    Lookup {
        /// Customer name (exact match)
        name: String,
    },
    /// Record one order; registers the customer if --address is given
    Order {
        /// Customer name
        #[arg(long)]
        name: String,
        /// Book id or "id,title" token
        #[arg(long)]
        book: String,
        /// Sale price in won, digits only
        #[arg(long)]
        price: String,
        /// Address, required for a new customer
        #[arg(long)]
        address: Option<String>,
        /// Phone, optional (000-0000-0000)
        #[arg(long)]
        phone: Option<String>,
    },
    /// Register a customer without placing an order
    Register {
        /// Customer name
        #[arg(long)]
        name: String,
        /// Address
        #[arg(long)]
        address: String,
        /// Phone, optional (000-0000-0000)
        #[arg(long)]
        phone: Option<String>,
    },
    /// List the book catalog
    Books,
}

impl Cli {
    /// The flags that override file and environment configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            database_path: self.db.clone(),
            seed_dir: self.seed_dir.clone(),
        }
    }

    /// The subcommand to run; no subcommand means the shell.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Shell)
    }
}

impl Command {
    /// Builds the order form of an `order` subcommand.
    pub fn order_form(&self) -> Option<OrderForm> {
        match self {
            Command::Order {
                name,
                book,
                price,
                address,
                phone,
            } => Some(OrderForm {
                name: name.clone(),
                book: Some(book.clone()),
                price: price.clone(),
                address: address.clone(),
                phone: phone.clone(),
            }),
            _ => None,
        }
    }
}
