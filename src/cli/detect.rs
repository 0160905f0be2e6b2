//! Handler for the `detect` command.

use tabled::{Table, Tabled};

use crate::app::Config;
use crate::cli::command::{Cli, DetectArgs};
use crate::cli::output;
use crate::domain::{detect, parse_snapshot, OpportunityRecord};
use crate::error::Result;
use crate::store::{JsonFileStore, OpportunityStore};

#[derive(Tabled)]
pub(crate) struct OpportunityRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Source 1")]
    price_1: String,
    #[tabled(rename = "Source 2")]
    price_2: String,
    #[tabled(rename = "Diff %")]
    difference: String,
    #[tabled(rename = "Est. Profit")]
    profit: String,
}

impl From<&OpportunityRecord> for OpportunityRow {
    fn from(record: &OpportunityRecord) -> Self {
        Self {
            time: record.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
            ticker: record.ticker().to_string(),
            price_1: format!("{:.2}", record.price_source_1()),
            price_2: format!("{:.2}", record.price_source_2()),
            difference: format!("{:.4}", record.difference_pct()),
            profit: format!("{:.2}", record.estimated_profit()),
        }
    }
}

/// Render records as a table.
pub(crate) fn render_table(records: &[OpportunityRecord]) -> String {
    Table::new(records.iter().map(OpportunityRow::from)).to_string()
}

/// Execute the detect command.
pub fn execute(cli: &Cli, args: &DetectArgs) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    let threshold = args.threshold.unwrap_or(config.simulation.threshold);

    let first = parse_snapshot(args.first.as_slice())?;
    let second = parse_snapshot(args.second.as_slice())?;
    let records = detect(&first, &second, threshold)?;

    if output::is_json() {
        output::json_value("opportunities", &records);
    } else {
        output::header();
        output::field("Tickers", first.len());
        output::field("Threshold", format!("{:.2}%", threshold * 100.0));
        if records.is_empty() {
            output::success("No divergence above threshold");
        } else {
            output::section(&format!("{} opportunities", records.len()));
            output::table(&render_table(&records));
        }
    }

    if args.record && !records.is_empty() {
        let store = JsonFileStore::new(config.simulation.log_path.clone());
        store.append(&records)?;
        output::success(&format!(
            "Recorded {} opportunities to {}",
            records.len(),
            store.path().display()
        ));
    }

    Ok(())
}
