use chrono::Duration;
use raseed_forecast::prelude::*;
use raseed_forecast::{AlertPolicy, PlanCategory, PlanType, UnitConverter};

fn main() {
    let now = Utc::now();

    // A 30-day, 5 GB data plan we are 10 days into.
    let plan = Plan::new(
        "demo-plan".to_string(),
        PlanType::Internet,
        PlanCategory::Mobile,
        now - Duration::days(10),
        now + Duration::days(20),
        5.0,
        PlanUnit::Gb,
    );

    // Weekly-ish readings entered by the user.
    let logs = vec![
        BalanceLog::new("demo-plan".to_string(), now - Duration::days(7), 4.2),
        BalanceLog::new("demo-plan".to_string(), now - Duration::days(3), 3.5),
        BalanceLog::new("demo-plan".to_string(), now, 3.0),
    ];

    let predictor = UsagePredictor::new();
    let prediction = predictor.predict(&plan, &logs, now);

    let converter = UnitConverter::new();
    let unit = plan.unit();

    println!("Remaining balance: {:.2} {}", converter.from_normalized(prediction.remaining_normalized(), unit), unit.name());
    println!("Days until plan end: {}", prediction.days_until_end());
    println!("Smoothed daily rate: {:.3} {}/day", converter.rate_from_normalized(prediction.smoothed_daily_rate(), unit), unit.name());
    println!("Safe daily usage: {:.3} {}/day", converter.rate_from_normalized(prediction.safe_daily_usage_target(), unit), unit.name());

    match prediction.predicted_depletion_at() {
        Some(at) => println!("Projected depletion: {}", at.to_rfc3339()),
        None => println!("Projected depletion: none at the current rate"),
    }

    println!("Risk: {} ({})", prediction.risk_level().name(), prediction.risk_level().description());

    let decision = AlertPolicy::new().decide_alert(Some(&prediction));
    if decision.should_notify() {
        println!("-> would send a usage alert");
    } else {
        println!("-> no alert needed");
    }
}
