use anyhow::{anyhow, bail, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::application::{CategoryReport, LedgerService};
use crate::domain::{
    format_cents, format_signed_cents, parse_cents, Category, Transaction, TransactionId,
    TransactionType,
};
use crate::io::{ExportFormat, Exporter};

/// Fintrack - in-memory personal finance ledger
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Record income and expenses, then check your balance and spending")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the welcome banner
    #[arg(short, long)]
    pub quiet: bool,
}

/// A single line typed at the console prompt
#[derive(Parser)]
#[command(name = "fintrack", no_binary_name = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a transaction
    Add {
        /// Transaction type: income, expense
        kind: String,

        /// Amount (e.g., "50.00" or "50")
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Category: GOODS, TRANSPORT, SALARY, ENTERTAINMENT
        category: String,

        /// Free-text description
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// List transactions, newest first
    List {
        /// Which transactions: all, income, expense, category
        filter: Option<String>,

        /// Category name when listing by category
        category: Option<String>,
    },

    /// Show the current balance
    Balance,

    /// Show expenses grouped by category
    Summary {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Delete a transaction by ID
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Export all transactions
    Export {
        /// Format: csv, json
        format: String,

        /// Output file (printed to the console if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Leave the program
    #[command(alias = "quit")]
    Exit,
}

enum Flow {
    Continue,
    Exit,
}

impl Cli {
    /// Install the stderr log subscriber.
    pub fn init_logging(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut console = Console::new(LedgerService::new(), stdin.lock(), stdout.lock());

        if !self.quiet {
            console.print_welcome()?;
        }
        console.run()
    }
}

/// Interactive command loop over any line source and output sink.
pub struct Console<R, W> {
    service: LedgerService,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(service: LedgerService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn into_parts(self) -> (LedgerService, W) {
        (self.service, self.output)
    }

    pub fn print_welcome(&mut self) -> Result<()> {
        let categories: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();

        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output, "Fintrack {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output)?;
        write!(self.output, "{}", CommandLine::command().render_help())?;
        writeln!(self.output)?;
        writeln!(self.output, "Categories: {}", categories.join(", "))?;
        Ok(())
    }

    /// Read and execute commands until `exit` or end of input.
    ///
    /// Command errors are printed and the loop carries on; only console I/O
    /// failures end the session with an error.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("session started");

        loop {
            write!(self.output, "\n> ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read command")?;
            if read == 0 {
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.execute_line(line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) => {
                    tracing::warn!(command = line, "command failed: {err:#}");
                    writeln!(self.output, "Error: {err:#}")?;
                }
            }
        }

        writeln!(self.output, "\nSession finished. Goodbye!")?;
        tracing::info!(transactions = self.service.len(), "session finished");
        Ok(())
    }

    fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if let Some(first) = words.first_mut() {
            *first = first.to_lowercase();
        }

        match CommandLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command),
            Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
                bail!("Unknown command. Type 'help' for the list of commands")
            }
            Err(err)
                if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                write!(self.output, "{}", err.render())?;
                Ok(Flow::Continue)
            }
            Err(err) => {
                let rendered = err.render().to_string();
                let message = rendered
                    .split("\n\nFor more information")
                    .next()
                    .unwrap_or_default()
                    .trim();
                bail!("{}", message.strip_prefix("error: ").unwrap_or(message))
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Add {
                kind,
                amount,
                category,
                description,
            } => {
                let kind = TransactionType::from_str(&kind).ok_or_else(|| {
                    anyhow!("Unsupported transaction type '{kind}'. Use income or expense")
                })?;
                let amount_cents =
                    parse_cents(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
                let category = parse_category(&category)?;

                let transaction = self.service.record_transaction(
                    kind,
                    amount_cents,
                    Some(category),
                    description.join(" "),
                )?;
                writeln!(self.output, "Transaction {} added", transaction.id())?;
            }

            Command::List { filter, category } => {
                let filter = filter.unwrap_or_else(|| "all".to_string()).to_lowercase();
                if let Some(extra) = category.as_deref().filter(|_| filter != "category") {
                    bail!("Unexpected argument '{extra}' for 'list {filter}'");
                }
                let transactions = match filter.as_str() {
                    "all" => self.service.list_transactions(),
                    "income" => self.service.list_by_type(TransactionType::Income),
                    "expense" => self.service.list_by_type(TransactionType::Expense),
                    "category" => {
                        let name = category.context("Specify a category to list")?;
                        self.service.list_by_category(parse_category(&name)?)
                    }
                    other => bail!(
                        "Unsupported list filter '{other}'. Use all, income, expense or category <CATEGORY>"
                    ),
                };
                render_transactions(&mut self.output, &transactions)?;
            }

            Command::Balance => {
                writeln!(
                    self.output,
                    "Current balance: {}",
                    format_signed_cents(self.service.balance())
                )?;
            }

            Command::Summary { format } => {
                let report = self.service.expense_report();
                match format.to_lowercase().as_str() {
                    "table" => render_summary(&mut self.output, &report)?,
                    "json" => writeln!(self.output, "{}", serde_json::to_string_pretty(&report)?)?,
                    other => bail!("Unsupported format '{other}'. Use table or json"),
                }
            }

            Command::Delete { id } => {
                let id: TransactionId = id
                    .parse()
                    .with_context(|| format!("Invalid transaction ID '{id}'"))?;

                if self.service.delete_transaction(id) {
                    writeln!(self.output, "Transaction {id} deleted")?;
                } else {
                    writeln!(self.output, "Transaction {id} not found")?;
                }
            }

            Command::Export { format, output } => {
                let export_format = ExportFormat::from_str(&format)
                    .ok_or_else(|| anyhow!("Unsupported format '{format}'. Use csv or json"))?;
                let exporter = Exporter::new(&self.service);

                match output {
                    Some(path) => {
                        let file = File::create(&path)
                            .with_context(|| format!("Failed to create {}", path.display()))?;
                        let count = exporter.export(export_format, BufWriter::new(file))?;
                        writeln!(
                            self.output,
                            "Exported {count} transactions to {}",
                            path.display()
                        )?;
                    }
                    None => {
                        exporter.export(export_format, &mut self.output)?;
                    }
                }
            }

            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }
}

fn parse_category(name: &str) -> Result<Category> {
    Category::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        anyhow!("Unknown category '{name}'. Use one of: {}", known.join(", "))
    })
}

fn render_transactions<W: Write>(out: &mut W, transactions: &[Transaction]) -> Result<()> {
    if transactions.is_empty() {
        writeln!(out, "No transactions to display.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<5} {:<10} {:<8} {:<13} {:>12}  {}",
        "ID", "DATE", "TYPE", "CATEGORY", "AMOUNT", "DESCRIPTION"
    )?;
    writeln!(out, "{}", "-".repeat(70))?;
    for transaction in transactions {
        writeln!(
            out,
            "{:<5} {:<10} {:<8} {:<13} {:>12}  {}",
            transaction.id(),
            transaction.date().format("%Y-%m-%d"),
            transaction.kind().as_str(),
            transaction.category().as_str(),
            format_cents(transaction.amount_cents()),
            truncate(transaction.description(), 30)
        )?;
    }
    Ok(())
}

fn render_summary<W: Write>(out: &mut W, report: &CategoryReport) -> Result<()> {
    if report.is_empty() {
        writeln!(out, "No expense data.")?;
        return Ok(());
    }

    writeln!(out, "Expenses by Category")?;
    writeln!(
        out,
        "{:<15} {:>12} {:>6} {:>8}",
        "CATEGORY", "TOTAL", "COUNT", "SHARE"
    )?;
    writeln!(out, "{}", "-".repeat(44))?;
    for summary in &report.categories {
        writeln!(
            out,
            "{:<15} {:>12} {:>6} {:>7.1}%",
            summary.category.as_str(),
            format_cents(summary.total),
            summary.count,
            summary.percentage
        )?;
    }
    writeln!(out, "{}", "-".repeat(44))?;
    writeln!(out, "{:<15} {:>12}", "TOTAL", format_cents(report.total))?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
