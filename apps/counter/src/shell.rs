//! # Interactive Shell
//!
//! The counter's two views in a line-oriented terminal session.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  마당서점 counter. Type 'help' for commands.                            │
//! │                                                                         │
//! │  madang> lookup 박지성          ◄── customer lookup view                │
//! │  ╭────────┬──────────────┬────────────┬─────────╮                       │
//! │  │ ...    │ ...          │ ...        │ ...     │                       │
//! │                                                                         │
//! │  madang> order                  ◄── transaction entry view              │
//! │  Customer name: 손흥민                                                  │
//! │  New customer. Address: 영국 런던                                       │
//! │  Phone (000-0000-0000, optional):                                       │
//! │  Book (id or "id,title"): 3                                             │
//! │  Sale price (won, digits only): 22000                                   │
//! │  Order #11 recorded: ...                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generic over input and output so tests drive it with byte buffers.
//! A failed command prints its error and the session continues; only
//! terminal I/O errors end it.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use madang_core::{CustomerResolution, PHONE_FORMAT_HINT};

use crate::commands::order::{self, OrderForm};
use crate::commands::{book, customer};
use crate::error::ApiResult;
use crate::render;
use crate::state::{CatalogState, CounterConfig, DbState};

const PROMPT: &str = "madang> ";

const HELP: &str = "\
Commands:
  lookup [NAME]   Order history of a customer
  order [NAME]    Record a sale (registers new customers)
  register [NAME] Register a customer without an order
  books           List the catalog
  help            Show this help
  quit            Leave the counter";

/// An interactive counter session.
pub struct Shell<'a, R, W> {
    input: R,
    output: W,
    db: &'a DbState,
    catalog: &'a CatalogState,
    config: &'a CounterConfig,
}

impl<'a, R, W> Shell<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        input: R,
        output: W,
        db: &'a DbState,
        catalog: &'a CatalogState,
        config: &'a CounterConfig,
    ) -> Self {
        Shell {
            input,
            output,
            db,
            catalog,
            config,
        }
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self) -> ApiResult<()> {
        writeln!(
            self.output,
            "{} counter. Type 'help' for commands.",
            self.config.store_name
        )?;

        loop {
            let Some(line) = self.prompt(PROMPT).await? else {
                break;
            };
            let (command, arg) = match line.split_once(char::is_whitespace) {
                Some((command, arg)) => (command, Some(arg.trim()).filter(|a| !a.is_empty())),
                None => (line.as_str(), None),
            };

            let result = match command {
                "" => Ok(()),
                "lookup" => self.lookup(arg).await,
                "order" => self.order(arg).await,
                "register" => self.register(arg).await,
                "books" => self.books().await,
                "help" => writeln!(self.output, "{}", HELP).map_err(Into::into),
                "quit" | "exit" => break,
                other => writeln!(self.output, "Unknown command '{}'. Type 'help'.", other)
                    .map_err(Into::into),
            };

            if let Err(err) = result {
                writeln!(self.output, "error: {}", err)?;
            }
        }

        debug!("Shell session ended");
        Ok(())
    }

    /// Writes `label`, reads one line. `None` at end of input.
    async fn prompt(&mut self, label: &str) -> ApiResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Uses the inline argument or asks for it.
    async fn arg_or_prompt(&mut self, arg: Option<&str>, label: &str) -> ApiResult<String> {
        match arg {
            Some(value) => Ok(value.to_string()),
            None => Ok(self.prompt(label).await?.unwrap_or_default()),
        }
    }

    // =========================================================================
    // Customer lookup view
    // =========================================================================

    async fn lookup(&mut self, arg: Option<&str>) -> ApiResult<()> {
        let name = self.arg_or_prompt(arg, "Customer name: ").await?;
        let history = customer::lookup_history(self.db, &name).await?;

        writeln!(self.output, "{}", render::history(&name, &history, self.config))?;
        Ok(())
    }

    // =========================================================================
    // Transaction entry view
    // =========================================================================

    async fn order(&mut self, arg: Option<&str>) -> ApiResult<()> {
        let name = self.arg_or_prompt(arg, "Customer name: ").await?;

        let mut form = OrderForm {
            name: name.clone(),
            ..Default::default()
        };

        match customer::resolve_customer(self.db, &name).await? {
            CustomerResolution::Existing(c) => {
                writeln!(self.output, "Existing customer: {} (custid {})", c.name, c.custid)?;
            }
            CustomerResolution::New { name } => {
                writeln!(self.output, "'{}' is a new customer.", name)?;
                form.address = Some(self.prompt("Address: ").await?.unwrap_or_default());
                let phone_label = format!("Phone ({}, optional): ", PHONE_FORMAT_HINT);
                form.phone = self.prompt(&phone_label).await?;
            }
        }

        let choices = book::book_choices(self.db, self.catalog).await?;
        let tokens = book::selection_tokens(&choices);
        writeln!(self.output, "{}", render::choices(&tokens))?;

        form.book = self
            .prompt("Book (id or \"id,title\"): ")
            .await?
            .filter(|b| !b.is_empty());
        form.price = self
            .prompt("Sale price (won, digits only): ")
            .await?
            .unwrap_or_default();

        let placed = order::place_order(self.db, self.catalog, &form, order::today()).await?;
        let bookname = choices
            .iter()
            .find(|c| c.bookid == placed.order.bookid)
            .map(|c| c.bookname.as_str());

        writeln!(self.output, "{}", render::placed(&placed, bookname, self.config))?;
        Ok(())
    }

    async fn register(&mut self, arg: Option<&str>) -> ApiResult<()> {
        let name = self.arg_or_prompt(arg, "Customer name: ").await?;
        let address = self.prompt("Address: ").await?.unwrap_or_default();
        let phone_label = format!("Phone ({}, optional): ", PHONE_FORMAT_HINT);
        let phone = self.prompt(&phone_label).await?;

        let created =
            customer::register_customer(self.db, self.catalog, &name, &address, phone.as_deref())
                .await?;
        writeln!(self.output, "{}", render::registered(&created))?;
        Ok(())
    }

    async fn books(&mut self) -> ApiResult<()> {
        let books = book::list_books(self.db).await?;
        writeln!(self.output, "{}", render::books(&books, self.config))?;
        Ok(())
    }
}
