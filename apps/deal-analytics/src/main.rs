#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Deal Analytics Binary
//!
//! Command-line adapter over the analysis service.
//!
//! # Usage
//!
//! ```bash
//! # Metrics as JSON
//! deal-analytics metrics --deals deals.json
//!
//! # Human-readable report for one strategy in January
//! deal-analytics report --deals deals.json --ea-id M:42 --from 2024-01-01 --to 2024-01-31
//!
//! # Filter choices
//! deal-analytics filters --deals deals.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: extra tracing directives (logs go to stderr)
//!
//! A missing or malformed export fails with `SOURCE_UNAVAILABLE` or
//! `SOURCE_DECODE` and a non-zero exit; a fetch timeout reports an empty
//! history.
//! - any variable referenced as `${VAR}` in the config file (`.env` is loaded)

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use clap::{Args, Parser, Subcommand};

use deal_analytics::config::load_config;
use deal_analytics::deals::{EaId, FetchWindow, JsonFileDealSource, TradeFilter};
use deal_analytics::telemetry::init_tracing;
use deal_analytics::{AnalysisService, AnalyticsError};

#[derive(Parser)]
#[command(name = "deal-analytics")]
#[command(about = "Trading performance metrics over closed broker deals")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the metrics snapshot as JSON
    Metrics(QueryArgs),

    /// Print a plain-text report with breakdowns
    Report(QueryArgs),

    /// Print the normalized, filtered trades as JSON
    Deals(QueryArgs),

    /// Print available symbols and EA ids as JSON
    Filters(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// JSON export of raw deals
    #[arg(short, long)]
    deals: String,

    /// Window start (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_from)]
    from: Option<DateTime<Utc>>,

    /// Window end, inclusive (RFC 3339 or YYYY-MM-DD for the whole day)
    #[arg(long, value_parser = parse_to)]
    to: Option<DateTime<Utc>>,

    /// Keep only these symbols
    #[arg(long = "symbol")]
    symbols: Vec<String>,

    /// Keep only these EA ids ("Manual" or "M:<magic>")
    #[arg(long = "ea-id", value_parser = parse_ea_id)]
    ea_ids: Vec<EaId>,

    /// Keep only these magic numbers
    #[arg(long = "magic")]
    magic_numbers: Vec<i64>,

    /// Keep only trades closed on these weekdays, UTC ("Mon", "tuesday", ...)
    #[arg(long = "weekday", value_parser = parse_weekday)]
    weekdays: Vec<Weekday>,

    /// Keep only trades closed in these hours, UTC (0-23)
    #[arg(long = "hour", value_parser = clap::value_parser!(u32).range(0..=23))]
    hours: Vec<u32>,

    /// Config file (default: deal-analytics.yaml if present)
    #[arg(short, long)]
    config: Option<String>,
}

impl QueryArgs {
    fn filter(&self) -> TradeFilter {
        TradeFilter::all()
            .with_symbols(self.symbols.iter().cloned())
            .with_ea_ids(self.ea_ids.iter().copied())
            .with_magic_numbers(self.magic_numbers.iter().copied())
            .with_weekdays(self.weekdays.iter().copied())
            .with_hours(self.hours.iter().copied())
            .with_window(self.from, self.to)
    }
}

fn parse_from(value: &str) -> Result<DateTime<Utc>, String> {
    parse_time(value, NaiveTime::MIN)
}

fn parse_to(value: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    parse_time(value, end_of_day)
}

fn parse_time(value: &str, date_only_time: NaiveTime) -> Result<DateTime<Utc>, String> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.and_time(date_only_time).and_utc())
        .map_err(|_| format!("'{value}' is neither RFC 3339 nor YYYY-MM-DD"))
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    value
        .parse::<Weekday>()
        .map_err(|_| format!("'{value}' is not a day of week"))
}

fn parse_ea_id(value: &str) -> Result<EaId, String> {
    EaId::parse(value).ok_or_else(|| format!("'{value}' is not \"Manual\" or \"M:<magic>\""))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let response = e
                .downcast_ref::<AnalyticsError>()
                .map(AnalyticsError::to_response);
            match response.and_then(|r| serde_json::to_string(&r).ok()) {
                Some(json) => eprintln!("{json}"),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let args = match &command {
        Commands::Metrics(a) | Commands::Report(a) | Commands::Deals(a) | Commands::Filters(a) => a,
    };

    let config = load_config(args.config.as_deref()).map_err(AnalyticsError::from)?;
    init_tracing(&config.observability.logging).map_err(AnalyticsError::from)?;

    tracing::info!(deals = %args.deals, "Starting deal analytics");

    let source = Arc::new(JsonFileDealSource::new(&args.deals));
    let service = AnalysisService::new(source, &config).with_strict_source(true);
    let filter = args.filter();

    match &command {
        Commands::Metrics(_) => {
            let report = service.analyze(&filter).await?;
            let json = serde_json::to_string_pretty(&report.metrics)
                .context("failed to serialize metrics")?;
            println!("{json}");
        }
        Commands::Report(_) => {
            let report = service.analyze(&filter).await?;
            println!("{}", report.metrics.summary());
            println!();
            println!("{}", report.breakdown.render());
        }
        Commands::Deals(_) => {
            let trades = service.trades(&filter).await?;
            let json =
                serde_json::to_string_pretty(&trades).context("failed to serialize trades")?;
            println!("{json}");
        }
        Commands::Filters(_) => {
            let window = FetchWindow {
                from: filter.from,
                to: filter.to,
            };
            let options = service.filter_options(window).await?;
            let json =
                serde_json::to_string_pretty(&options).context("failed to serialize filters")?;
            println!("{json}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_date_bounds() {
        let from = parse_from("2024-01-31").unwrap();
        let to = parse_to("2024-01-31").unwrap();
        assert_eq!(from.to_rfc3339(), "2024-01-31T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2024-01-31T23:59:59+00:00");
    }

    #[test]
    fn test_parses_rfc3339_with_offset() {
        let t = parse_from("2024-01-31T10:00:00+02:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2024-01-31T08:00:00+00:00");
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(parse_from("31/01/2024").is_err());
        assert!(parse_ea_id("EA 42").is_err());
        assert_eq!(parse_ea_id("M:42").unwrap(), EaId::Magic(42));
    }

    #[test]
    fn test_cli_builds_filter() {
        let cli = Cli::parse_from([
            "deal-analytics",
            "metrics",
            "--deals",
            "d.json",
            "--symbol",
            "EURUSD",
            "--ea-id",
            "Manual",
            "--magic",
            "7",
            "--weekday",
            "fri",
            "--hour",
            "9",
            "--hour",
            "15",
        ]);
        let Commands::Metrics(args) = cli.command else {
            panic!("expected metrics subcommand");
        };
        let filter = args.filter();
        assert_eq!(filter.symbols, vec!["EURUSD"]);
        assert_eq!(filter.ea_ids, vec![EaId::Manual]);
        assert_eq!(filter.magic_numbers, vec![7]);
        assert_eq!(filter.weekdays, vec![Weekday::Fri]);
        assert_eq!(filter.hours, vec![9, 15]);
    }

    #[test]
    fn test_cli_rejects_out_of_range_hour() {
        let result = Cli::try_parse_from(["deal-analytics", "report", "--deals", "d.json", "--hour", "24"]);
        assert!(result.is_err());
        assert!(parse_weekday("someday").is_err());
    }
}
