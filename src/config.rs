use crate::domain::money::Money;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

/// Runtime settings for the batch binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Settings {
    /// Input operations CSV file
    pub input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "BILLABLE_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Processor identifiers to register with the sandbox adapter.
    #[arg(
        long = "processor",
        value_name = "NAME",
        default_values_t = [String::from("stripe"), String::from("braintree")]
    )]
    pub processors: Vec<String>,

    /// Plan price used for sandbox invoices, as `plan=amount`.
    #[arg(long = "price", value_name = "PLAN=AMOUNT", value_parser = parse_price)]
    pub prices: Vec<(String, Money)>,

    /// Evaluate trials and subscriptions at this RFC 3339 instant instead of now.
    #[arg(long, env = "BILLABLE_AS_OF")]
    pub as_of: Option<DateTime<Utc>>,
}

fn parse_price(raw: &str) -> Result<(String, Money), String> {
    let (plan, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PLAN=AMOUNT, got `{raw}`"))?;
    let plan = plan.trim();
    if plan.is_empty() {
        return Err(format!("missing plan in `{raw}`"));
    }
    let amount = amount.parse::<Money>().map_err(|e| e.to_string())?;
    Ok((plan.to_string(), amount))
}
