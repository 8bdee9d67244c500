use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use raseed_forecast::prelude::*;
use raseed_forecast::UnitConverter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(version, about = "Forecasts when a prepaid plan will run out of balance")]
struct Args {
    /// Plan definition file (JSON). Defaults to ~/.raseedguard/plan.json
    #[arg(short = 'p', long = "plan")]
    plan: Option<String>,

    /// Balance log file (JSONL) or a directory of .jsonl files.
    /// Defaults to ~/.raseedguard/logs.jsonl
    #[arg(short = 'l', long = "logs")]
    logs: Option<String>,

    /// Reference timestamp (RFC 3339). Defaults to the current time
    #[arg(long = "now")]
    now: Option<String>,

    /// Print the prediction as JSON instead of a report
    #[arg(long = "json")]
    json: bool,
}

fn default_data_path(file: &str) -> PathBuf {
    let expanded = shellexpand::tilde(&format!("~/.raseedguard/{file}")).into_owned();
    PathBuf::from(expanded)
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now timestamp: {raw}"))
            .map(|dt| dt.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn print_report(plan: &Plan, prediction: &PredictionResult, decision: &AlertDecision) {
    let converter = UnitConverter::new();
    let unit = plan.unit();

    println!("Plan {} ({})", plan.id(), unit.name());
    println!(
        "  Remaining:        {:.2} {}",
        converter.from_normalized(prediction.remaining_normalized(), unit),
        unit.name()
    );
    println!("  Days until end:   {}", prediction.days_until_end());
    println!(
        "  Daily rate:       {:.2} {}/day",
        converter.rate_from_normalized(prediction.smoothed_daily_rate(), unit),
        unit.name()
    );
    println!(
        "  Safe daily usage: {:.2} {}/day",
        converter.rate_from_normalized(prediction.safe_daily_usage_target(), unit),
        unit.name()
    );

    match prediction.predicted_depletion_at() {
        Some(at) => println!("  Depletion:        {}", at.to_rfc3339()),
        None => println!("  Depletion:        none at the current rate"),
    }

    println!(
        "  Risk:             {} - {}",
        prediction.risk_level().name(),
        prediction.risk_level().description()
    );

    if decision.should_notify() {
        println!("  Alert:            would notify");
    } else {
        println!("  Alert:            quiet");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let plan_path = args
        .plan
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_data_path("plan.json"));
    let logs_path = args
        .logs
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_data_path("logs.jsonl"));

    let now = parse_now(args.now.as_deref())?;

    let mut tracker = BalanceTracker::new();
    tracker.load_plan(&plan_path)?;

    if Path::new(&logs_path).is_dir() {
        tracker.load_logs_from_directory(&logs_path)?;
    } else {
        tracker.load_logs(&logs_path)?;
    }

    let plan = tracker
        .plans()
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("No plan found in {}", plan_path.display()))?;

    let prediction = tracker
        .predict_for(plan.id(), now)
        .ok_or_else(|| anyhow::anyhow!("Unknown plan: {}", plan.id()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    let decision = tracker.check_alert(plan.id(), now);
    print_report(&plan, &prediction, &decision);

    Ok(())
}
