//! headcount-runner: headless headcount analytics runner.
//!
//! Usage:
//!   headcount-runner --db org.db --org 1
//!   headcount-runner --db org.db --org 1 --process 1001 --today 2025-03-03
//!   headcount-runner --db org.db --org 1 --lob 101 --rollup
//!   headcount-runner --seed 42 --org 7 --rollup        (in-memory demo)
//!
//! Prints the JSON result on stdout. Progress goes through the logger
//! (set RUST_LOG=info to see it).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use headcount_core::{
    analytics::AnalyticsFacade, clock::AnalyticsClock, config::AnalyticsConfig,
    demo::DemoSeeder, store::AnalyticsStore,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let org = parse_arg(&args, "--org", 1i64);
    let process: Option<i64> = parse_opt(&args, "--process");
    let lob: Option<i64> = parse_opt(&args, "--lob");
    let seed: Option<u64> = parse_opt(&args, "--seed");
    let rollup = args.iter().any(|a| a == "--rollup");
    let events = args.iter().any(|a| a == "--events");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");

    let clock = match string_arg(&args, "--today") {
        Some(raw) => AnalyticsClock::pinned(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("--today must be YYYY-MM-DD, got '{raw}'"))?,
        ),
        None => AnalyticsClock::system(),
    };
    let today = clock.today();

    let config = if Path::new(data_dir).join("analytics.json").exists() {
        AnalyticsConfig::load(data_dir)?
    } else {
        log::warn!("no analytics.json under {data_dir}; using built-in defaults");
        AnalyticsConfig::default()
    };

    log::info!("headcount-runner: db={db} org={org} today={today}");

    let store = AnalyticsStore::open(db, &config.store)?;
    store.migrate()?;

    if let Some(seed) = seed {
        let summary = DemoSeeder::new(&store, &config.demo, seed).seed(org, today)?;
        log::info!("demo data: {}", serde_json::to_string(&summary)?);
    }

    let facade = AnalyticsFacade::over_store(&store, &config);

    let output = match (process, lob) {
        (Some(process), _) if events => {
            serde_json::to_value(facade.process_events(org, process, today)?)?
        }
        (Some(process), _) => serde_json::to_value(facade.process_analytics(org, process, today)?)?,
        (None, Some(lob)) if rollup => {
            serde_json::to_value(facade.line_of_business_rollup(org, lob, today)?)?
        }
        (None, Some(lob)) => {
            serde_json::to_value(facade.line_of_business_analytics(org, lob, today)?)?
        }
        (None, None) if rollup => serde_json::to_value(facade.organization_rollup(org, today)?)?,
        (None, None) => serde_json::to_value(facade.organization_analytics(org, today)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt(args, flag).unwrap_or(default)
}

fn parse_opt<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    string_arg(args, flag).and_then(|raw| raw.parse().ok())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
