use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use split_cli::export;
use split_cli::session::SessionState;
use split_core::models::CalculationResult;
use split_core::utils::format_amount;
use split_core::validate::RawCalculationInput;
use split_store::{FileStore, HistoryStore};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tip, tax, and bill-splitting calculator.
///
/// Computes per-person totals, keeps a short history of past calculations,
/// and builds shareable query strings and plain-text summaries.
#[derive(Debug, Parser)]
#[command(name = "tipsplit")]
struct Cli {
    /// Directory for persisted history.
    /// Defaults to the platform data directory.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate a split and save it to history.
    Calc(CalcArgs),

    /// List saved calculations, most recent first.
    History,

    /// Replay a saved calculation by its position in the history list.
    Load {
        /// 1-based position, as printed by `history`.
        index: usize,
    },

    /// Remove all saved calculations.
    Clear,

    /// Print a shareable query string for a calculation.
    Share(CalcArgs),

    /// Calculate from a shared query string.
    Open {
        /// Query string, e.g. `bill=50&tax=5&tip=15&people=3&roundUp=true`.
        query: String,
    },

    /// Print a plain-text summary document for a calculation.
    Export(CalcArgs),
}

/// Raw form fields. Validation happens in one place for every entry path,
/// so these stay strings here.
#[derive(Debug, Args)]
struct CalcArgs {
    /// Bill amount before tax and tip.
    #[arg(long)]
    bill: Option<String>,

    /// Tax amount.
    #[arg(long)]
    tax: Option<String>,

    /// Tip percentage (0-100).
    #[arg(long, default_value = "15")]
    tip: String,

    /// Number of people splitting the bill (1-100).
    #[arg(long, default_value = "1")]
    people: String,

    /// Title or event name.
    #[arg(long)]
    title: Option<String>,

    /// Restaurant name.
    #[arg(long)]
    restaurant: Option<String>,

    /// Location.
    #[arg(long)]
    location: Option<String>,

    /// Round each person's total up to the next whole currency unit.
    #[arg(long)]
    round_up: bool,
}

impl CalcArgs {
    fn into_form(self) -> (RawCalculationInput, bool) {
        let form = RawCalculationInput {
            bill_amount: self.bill.unwrap_or_default(),
            tax_amount: self.tax.unwrap_or_default(),
            tip_percentage: self.tip,
            number_of_people: self.people,
            title: self.title.unwrap_or_default(),
            restaurant_name: self.restaurant.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        };
        (form, self.round_up)
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let store = match cli.store_dir {
        Some(dir) => FileStore::open(dir)?,
        None => FileStore::open_default()?,
    };
    debug!("history stored in {}", store.dir().display());

    let mut history = HistoryStore::new(store);
    history.hydrate()?;

    let mut session = SessionState::new();

    match cli.command {
        Command::Calc(args) => cmd_calc(&mut session, &mut history, args),
        Command::History => cmd_history(&history),
        Command::Load { index } => cmd_load(&mut session, &history, index),
        Command::Clear => cmd_clear(&mut history),
        Command::Share(args) => cmd_share(&mut session, args),
        Command::Open { query } => cmd_open(&mut session, &query),
        Command::Export(args) => cmd_export(&mut session, args),
    }
}

// ─── subcommands ─────────────────────────────────────────────────────────────

fn cmd_calc(
    session: &mut SessionState,
    history: &mut HistoryStore<FileStore>,
    args: CalcArgs,
) -> Result<()> {
    let (form, round_up) = args.into_form();
    session.form = form;
    session.round_up = round_up;

    match session.submit() {
        Ok((input, result)) => {
            print_result(&result);
            history.record(&input, &result, session.round_up)?;
            Ok(())
        }
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("error: {error}");
            }
            bail!("calculation blocked by {} validation error(s)", errors.len());
        }
    }
}

fn cmd_history(history: &HistoryStore<FileStore>) -> Result<()> {
    if history.entries().is_empty() {
        println!("No saved calculations.");
        return Ok(());
    }

    for (i, entry) in history.entries().iter().enumerate() {
        let bill = entry.input.bill_amount.unwrap_or_default();
        let tax = entry.input.tax_amount.unwrap_or_default();
        println!(
            "{}. {} — {} | Bill: ${} Tax: ${} Tip: {}% People: {} | Total/Person: ${}",
            i + 1,
            entry.label(),
            entry.saved_at.format("%Y-%m-%d"),
            format_amount(bill),
            format_amount(tax),
            entry.input.tip_percentage,
            entry.input.number_of_people,
            format_amount(entry.total_per_person),
        );
    }
    Ok(())
}

fn cmd_load(
    session: &mut SessionState,
    history: &HistoryStore<FileStore>,
    index: usize,
) -> Result<()> {
    let Some(entry) = index.checked_sub(1).and_then(|i| history.entries().get(i)) else {
        bail!(
            "no history entry at position {index} ({} saved)",
            history.entries().len()
        );
    };

    println!("Loaded: {}", entry.label());
    session.load_history_entry(entry);
    run_pending(session)
}

fn cmd_clear(history: &mut HistoryStore<FileStore>) -> Result<()> {
    history.clear()?;
    println!("History cleared.");
    Ok(())
}

fn cmd_share(
    session: &mut SessionState,
    args: CalcArgs,
) -> Result<()> {
    let (form, round_up) = args.into_form();
    session.form = form;
    session.round_up = round_up;

    match session.submit() {
        Ok((input, result)) => {
            let query = export::share_query(&input, &result, session.round_up)?;
            println!("{query}");
            Ok(())
        }
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("error: {error}");
            }
            bail!("cannot share: correct the errors first");
        }
    }
}

fn cmd_open(
    session: &mut SessionState,
    query: &str,
) -> Result<()> {
    if !session.load_from_query(query) {
        bail!("query string contains no recognized calculation fields");
    }
    run_pending(session)
}

fn cmd_export(
    session: &mut SessionState,
    args: CalcArgs,
) -> Result<()> {
    let (form, round_up) = args.into_form();
    session.form = form;
    session.round_up = round_up;

    match session.submit() {
        Ok((input, result)) => {
            let doc = export::render_summary(&input, &result, session.round_up)?;
            print!("{doc}");
            Ok(())
        }
        Err(errors) => {
            for error in errors.iter() {
                eprintln!("error: {error}");
            }
            bail!("cannot export: correct the errors first");
        }
    }
}

/// Drives the pending-replay step for `load` and `open`.
fn run_pending(session: &mut SessionState) -> Result<()> {
    match session.process_pending() {
        Some(Ok((_, result))) => {
            print_result(&result);
            Ok(())
        }
        Some(Err(errors)) => {
            for error in errors.iter() {
                eprintln!("error: {error}");
            }
            bail!("loaded values failed validation; form reset to defaults");
        }
        None => Ok(()),
    }
}

fn print_result(result: &CalculationResult) {
    println!("Total Tip:                    ${}", format_amount(result.total_tip_amount));
    println!(
        "Total Bill (incl. Tax & Tip): ${}",
        format_amount(result.total_bill_with_tip)
    );
    println!("Tip Per Person:               ${}", format_amount(result.tip_per_person));
    println!("Total Per Person:             ${}", format_amount(result.total_per_person));
}
