// 🧾 monzolib CLI - summarise, list and export a saved transactions feed
// FILE is either a `{"transactions": [...]}` response body or a bare array of records.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monzolib::{
    group_transactions, ClientConfig, GroupingStrategy, Transaction, TransactionRecord,
    TransactionsResponse,
};

#[derive(Parser)]
#[command(name = "monzolib")]
#[command(about = "Inspect a saved Monzo transactions feed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group transactions and print each group's total spend
    Summary {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// day, category, merchant or none
        #[arg(short, long, default_value = "day")]
        by: GroupingStrategy,

        /// Reference time for relative day titles (RFC 3339, defaults to now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// One line per transaction
    List {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write derived transaction fields as CSV
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Feed {
    Bare(Vec<TransactionRecord>),
    Envelope(TransactionsResponse),
}

/// Flattened row written by `export`
#[derive(Serialize)]
struct ExportRow {
    id: String,
    created: String,
    name: String,
    amount: String,
    currency: String,
    category: String,
    status: String,
    declined: Option<String>,
    location: String,
    icon: String,
    notes: String,
    hidden: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    match cli.command {
        Commands::Summary { file, by, now } => {
            run_summary(&file, by, now.unwrap_or_else(Utc::now))
        }
        Commands::List { file } => run_list(&file),
        Commands::Export { file, output } => run_export(&file, output.as_deref(), &config),
    }
}

fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let feed: Feed = serde_json::from_str(&text).context("Failed to parse transactions JSON")?;

    let records = match feed {
        Feed::Bare(records) => records,
        Feed::Envelope(response) => response.transactions,
    };

    let transactions = records
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            Transaction::new(record).with_context(|| format!("Invalid transaction {}", id))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = transactions.len(), path = %path.display(), "loaded transactions");
    Ok(transactions)
}

fn run_summary(path: &Path, strategy: GroupingStrategy, now: DateTime<Utc>) -> Result<()> {
    let transactions = load_transactions(path)?;
    let groups = group_transactions(&transactions, strategy);

    for group in &groups {
        let total = group
            .sum()
            .with_context(|| format!("Failed to sum group {}", group.id))?;
        println!("{:<32} {:>4}  {}", group.title(now), group.len(), total);
    }

    Ok(())
}

fn run_list(path: &Path) -> Result<()> {
    let transactions = load_transactions(path)?;

    for tx in &transactions {
        let status = match tx.decline_reason() {
            Some(reason) => format!("Declined: {}", reason),
            None => tx.settled_text(),
        };
        println!(
            "{:<32} {:>12}  {:<40} {}",
            tx.display_name(),
            tx.amount().to_string(),
            status,
            tx.category().formatted
        );
    }

    Ok(())
}

fn run_export(path: &Path, output: Option<&Path>, config: &ClientConfig) -> Result<()> {
    let transactions = load_transactions(path)?;

    let writer: Box<dyn Write> = match output {
        Some(output) => Box::new(
            fs::File::create(output)
                .with_context(|| format!("Failed to create {}", output.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let mut wtr = csv::Writer::from_writer(writer);

    for tx in &transactions {
        let amount = tx.amount();
        wtr.serialize(ExportRow {
            id: tx.id().to_string(),
            created: tx.created().to_rfc3339(),
            name: tx.display_name().to_string(),
            amount: amount.to_string(),
            currency: amount.currency().to_string(),
            category: tx.category().raw,
            status: tx.settled_text(),
            declined: tx.decline_reason(),
            location: tx.location(),
            icon: tx.icon_with(config),
            notes: tx.notes().short,
            hidden: tx.hidden(),
        })
        .context("Failed to write CSV row")?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    info!(count = transactions.len(), "exported transactions");
    Ok(())
}
