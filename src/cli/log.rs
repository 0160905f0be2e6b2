//! Handlers for the `log` subcommands.

use std::fs;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tabled::{Table, Tabled};

use crate::app::Config;
use crate::cli::command::{Cli, LogClearArgs, LogCommand, LogExportArgs, LogShowArgs};
use crate::cli::detect::render_table;
use crate::cli::output;
use crate::domain::{OpportunitySummary, Ticker};
use crate::error::Result;
use crate::store::{JsonFileStore, OpportunityStore};

/// Dispatch a `log` subcommand.
pub fn execute(cli: &Cli, command: &LogCommand) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    let store = JsonFileStore::new(config.simulation.log_path.clone());

    match command {
        LogCommand::Show(args) => show(&store, args),
        LogCommand::Summary => summary(&store),
        LogCommand::Export(args) => export(&store, args),
        LogCommand::Clear(args) => clear(&store, args),
    }
}

fn show(store: &JsonFileStore, args: &LogShowArgs) -> Result<()> {
    let mut records = store.load()?;
    if let Some(ref ticker) = args.ticker {
        let ticker = Ticker::new(ticker.trim().to_uppercase());
        records.retain(|r| r.ticker() == &ticker);
    }
    let total = records.len();
    let tail = records.split_off(total.saturating_sub(args.limit));

    if output::is_json() {
        output::json_value("opportunities", &tail);
        return Ok(());
    }

    output::header();
    output::field("Log", store.path().display());
    if tail.is_empty() {
        output::note("No opportunities recorded");
        return Ok(());
    }

    output::section(&format!("Last {} of {} opportunities", tail.len(), total));
    output::table(&render_table(&tail));
    Ok(())
}

#[derive(Tabled)]
struct TickerRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Max Diff %")]
    max_difference: String,
    #[tabled(rename = "Total Est. Profit")]
    profit: String,
}

#[derive(Tabled)]
struct HourRow {
    #[tabled(rename = "Hour (UTC)")]
    hour: String,
    #[tabled(rename = "Count")]
    count: usize,
}

fn summary(store: &JsonFileStore) -> Result<()> {
    let summary = OpportunitySummary::from_records(&store.load()?);

    if output::is_json() {
        output::json_value("summary", &summary);
        return Ok(());
    }

    output::header();
    output::field("Log", store.path().display());
    output::field("Total", summary.total);
    if summary.total == 0 {
        output::note("No opportunities recorded");
        return Ok(());
    }
    if let (Some(first), Some(last)) = (summary.first_at, summary.last_at) {
        output::field("First", first.format("%Y-%m-%d %H:%M:%S"));
        output::field("Last", last.format("%Y-%m-%d %H:%M:%S"));
    }

    let tickers = summary.by_ticker.iter().map(|(ticker, s)| TickerRow {
        ticker: ticker.clone(),
        count: s.count,
        max_difference: format!("{:.4}", s.max_difference_pct),
        profit: format!("{:.2}", s.total_estimated_profit),
    });
    output::section("By ticker");
    output::table(&Table::new(tickers).to_string());

    let hours = summary.by_hour.iter().map(|bucket| HourRow {
        hour: bucket.hour.format("%Y-%m-%d %H:00").to_string(),
        count: bucket.count,
    });
    output::section("By hour");
    output::table(&Table::new(hours).to_string());
    Ok(())
}

fn export(store: &JsonFileStore, args: &LogExportArgs) -> Result<()> {
    let records = store.load()?;
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(&args.output, json)?;

    output::success(&format!(
        "Exported {} opportunities to {}",
        records.len(),
        args.output.display()
    ));
    Ok(())
}

fn clear(store: &JsonFileStore, args: &LogClearArgs) -> Result<()> {
    let count = store.load()?.len();
    if count == 0 {
        output::note("Opportunity log is already empty");
        return Ok(());
    }

    if !args.yes && !confirm(&format!("Delete {count} recorded opportunities?"))? {
        output::note("Aborted");
        return Ok(());
    }

    store.clear()?;
    output::success(&format!("Cleared {count} opportunities"));
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}
