//! budgetbook - personal budgets and expenses
//!
//! Record a budget per category, log dated expenses, and compare the two.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Database: $XDG_DATA_HOME/budgetbook/budgetbook.db (~/.local/share/budgetbook/budgetbook.db)
//! - Logs: $XDG_STATE_HOME/budgetbook/budgetbook.log.YYYY-MM-DD (~/.local/state/budgetbook/)
//! - Config: $XDG_CONFIG_HOME/budgetbook/config.toml (~/.config/budgetbook/config.toml)

mod chart;

use anyhow::{Context, Result};
use budgetbook_core::validate::{parse_amount, parse_date};
use budgetbook_core::{Aggregator, BudgetStore, Config, Database, ExpenseStore, SortOrder};
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "budgetbook")]
#[command(about = "Track budgets and expenses by category")]
#[command(version)]
struct Args {
    /// Database file (default: from config, else the XDG data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log every store statement (debug level) unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set, update, delete and list budgets
    #[command(subcommand)]
    Budget(BudgetCommand),

    /// Add, update, delete and list expenses
    #[command(subcommand)]
    Expense(ExpenseCommand),

    /// Chart summaries of spending
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Subcommand)]
enum BudgetCommand {
    /// Create a budget for a category that has none
    Set {
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Change a budget's category and/or amount
    Update {
        id: i64,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Permanently delete a budget
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List budgets by category
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ExpenseCommand {
    /// Record an expense
    Add {
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date of the expense, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change any field of an expense
    Update {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Permanently delete an expense
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List expenses, newest first
    List {
        /// Oldest first instead
        #[arg(long)]
        oldest_first: bool,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Share of total spending per category
    Distribution {
        #[arg(long)]
        json: bool,
    },

    /// Budgeted vs. actual spending per budgeted category
    Compare {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    let _log_guard = budgetbook_core::logging::init(&config.logging).ok();

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Command failed");
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Print a failed command's error for the user.
///
/// Store errors that reach here unwrapped get their friendly message;
/// anything carrying extra context (startup failures) prints the full chain.
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<budgetbook_core::Error>() {
        Some(core) if err.chain().count() == 1 => eprintln!("Error: {}", core.user_message()),
        _ => eprintln!("Error: {err:#}"),
    }
}

fn run(args: Args, config: &Config) -> Result<()> {
    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| config.resolved_database_path());

    tracing::info!(path = %db_path.display(), "Opening database");

    let db = match &args.db {
        Some(path) => Database::open(path)
            .map(|db| db.with_busy_timeout(config.database.busy_timeout())),
        None => Database::from_config(config),
    }
    .with_context(|| format!("unable to open database at {}", db_path.display()))?;
    db.migrate().context("failed to run database migrations")?;

    match args.command {
        Command::Budget(cmd) => run_budget(BudgetStore::new(db), cmd),
        Command::Expense(cmd) => run_expense(ExpenseStore::new(db), cmd),
        Command::Report(cmd) => run_report(Aggregator::for_database(&db), cmd),
    }
}

fn run_budget(store: BudgetStore, cmd: BudgetCommand) -> Result<()> {
    match cmd {
        BudgetCommand::Set { category, amount } => {
            let amount = parse_amount(&amount)?;
            let id = store.set(&category, amount)?;
            println!("Budget set successfully (id {id})");
        }
        BudgetCommand::Update {
            id,
            category,
            amount,
        } => {
            let current = store.get(id)?.ok_or(budgetbook_core::Error::NotFound {
                entity: "budget",
                id,
            })?;
            let category = category.unwrap_or(current.category);
            let amount = match amount {
                Some(text) => parse_amount(&text)?,
                None => current.amount,
            };
            store.update(id, &category, amount)?;
            println!("Budget updated successfully");
        }
        BudgetCommand::Delete { id, yes } => {
            let current = store.get(id)?.ok_or(budgetbook_core::Error::NotFound {
                entity: "budget",
                id,
            })?;
            let prompt = format!(
                "Are you sure you want to delete the {} budget?",
                current.category
            );
            if !yes && !confirm(&prompt)? {
                println!("Delete cancelled");
                return Ok(());
            }
            store.delete(id)?;
            println!("Budget deleted successfully");
        }
        BudgetCommand::List { json } => {
            let budgets = store.list()?;
            if json {
                print_json(&budgets)?;
            } else {
                print!("{}", chart::render_budgets(&budgets));
            }
        }
    }
    Ok(())
}

fn run_expense(store: ExpenseStore, cmd: ExpenseCommand) -> Result<()> {
    match cmd {
        ExpenseCommand::Add {
            category,
            amount,
            date,
        } => {
            let date = match date {
                Some(text) => parse_date(&text)?,
                None => Local::now().date_naive(),
            };
            let amount = parse_amount(&amount)?;
            let id = store.add(date, &category, amount)?;
            println!("Expense added successfully (id {id})");
        }
        ExpenseCommand::Update {
            id,
            date,
            category,
            amount,
        } => {
            let current = store.get(id)?.ok_or(budgetbook_core::Error::NotFound {
                entity: "expense",
                id,
            })?;
            let date = match date {
                Some(text) => parse_date(&text)?,
                None => current.date,
            };
            let category = category.unwrap_or(current.category);
            let amount = match amount {
                Some(text) => parse_amount(&text)?,
                None => current.amount,
            };
            store.update(id, date, &category, amount)?;
            println!("Expense updated successfully");
        }
        ExpenseCommand::Delete { id, yes } => {
            let current = store.get(id)?.ok_or(budgetbook_core::Error::NotFound {
                entity: "expense",
                id,
            })?;
            let prompt = format!(
                "Are you sure you want to delete the {} expense from {}?",
                current.category, current.date
            );
            if !yes && !confirm(&prompt)? {
                println!("Delete cancelled");
                return Ok(());
            }
            store.delete(id)?;
            println!("Expense deleted successfully");
        }
        ExpenseCommand::List { oldest_first, json } => {
            let order = if oldest_first {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            let expenses = store.list(order)?;
            if json {
                print_json(&expenses)?;
            } else {
                print!("{}", chart::render_expenses(&expenses));
            }
        }
    }
    Ok(())
}

fn run_report(aggregator: Aggregator, cmd: ReportCommand) -> Result<()> {
    match cmd {
        ReportCommand::Distribution { json } => {
            let dist = aggregator.distribution()?;
            if json {
                print_json(&dist)?;
            } else {
                print!("{}", chart::render_distribution(&dist));
            }
        }
        ReportCommand::Compare { json } => {
            let rows = aggregator.budget_vs_actual()?;
            if json {
                print_json(&rows)?;
            } else {
                print!("{}", chart::render_comparison(&rows));
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
