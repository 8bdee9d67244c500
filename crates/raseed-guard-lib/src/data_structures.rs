use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanType {
    Internet,
    Voice,
    Mixed,
}

/// Informational grouping only; never consulted by the forecasting math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanCategory {
    Mobile,
    Home,
    Voice,
}

/// The unit a plan's allowance is declared in.
///
/// Internally all arithmetic runs on a normalized amount: MB for data plans,
/// minutes for voice plans. The two spaces never mix because a prediction
/// only ever sees a single plan's unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanUnit {
    Mb,
    Gb,
    Minutes,
}

impl PlanUnit {
    pub fn name(&self) -> &'static str {
        match self {
            PlanUnit::Mb => "MB",
            PlanUnit::Gb => "GB",
            PlanUnit::Minutes => "minutes",
        }
    }
}

/// Ordered by severity: SAFE < WARNING < CRITICAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Safe,
    Warning,
    Critical,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Warning => "WARNING",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Balance should outlast the plan",
            RiskLevel::Warning => "Balance projected to run out more than 48h before plan end",
            RiskLevel::Critical => "Balance projected to run out within 48h of plan end",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    id: String,
    #[serde(rename = "type")]
    plan_type: PlanType,
    category: PlanCategory,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    initial_amount: f64,
    unit: PlanUnit,
}

impl Plan {
    pub fn new(
        id: String,
        plan_type: PlanType,
        category: PlanCategory,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        initial_amount: f64,
        unit: PlanUnit,
    ) -> Self {
        Self {
            id,
            plan_type,
            category,
            start_at,
            end_at,
            initial_amount,
            unit,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn plan_type(&self) -> PlanType {
        self.plan_type
    }

    pub fn category(&self) -> PlanCategory {
        self.category
    }

    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    pub fn initial_amount(&self) -> f64 {
        self.initial_amount
    }

    pub fn unit(&self) -> PlanUnit {
        self.unit
    }
}

/// One observed "remaining balance" reading, in the owning plan's unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceLog {
    plan_id: String,
    logged_at: DateTime<Utc>,
    remaining_amount: f64,
}

impl BalanceLog {
    pub fn new(plan_id: String, logged_at: DateTime<Utc>, remaining_amount: f64) -> Self {
        Self {
            plan_id,
            logged_at,
            remaining_amount,
        }
    }

    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }

    pub fn logged_at(&self) -> DateTime<Utc> {
        self.logged_at
    }

    pub fn remaining_amount(&self) -> f64 {
        self.remaining_amount
    }
}

/// The engine's sole output. A pure value owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    remaining_normalized: f64,
    days_until_end: i64,
    daily_rate: f64,
    smoothed_daily_rate: f64,
    predicted_depletion_at: Option<DateTime<Utc>>,
    risk_level: RiskLevel,
    safe_daily_usage_target: f64,
}

impl PredictionResult {
    pub fn new(
        remaining_normalized: f64,
        days_until_end: i64,
        daily_rate: f64,
        smoothed_daily_rate: f64,
        predicted_depletion_at: Option<DateTime<Utc>>,
        risk_level: RiskLevel,
        safe_daily_usage_target: f64,
    ) -> Self {
        Self {
            remaining_normalized,
            days_until_end,
            daily_rate,
            smoothed_daily_rate,
            predicted_depletion_at,
            risk_level,
            safe_daily_usage_target,
        }
    }

    pub fn remaining_normalized(&self) -> f64 {
        self.remaining_normalized
    }

    pub fn days_until_end(&self) -> i64 {
        self.days_until_end
    }

    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    pub fn smoothed_daily_rate(&self) -> f64 {
        self.smoothed_daily_rate
    }

    pub fn predicted_depletion_at(&self) -> Option<DateTime<Utc>> {
        self.predicted_depletion_at
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn safe_daily_usage_target(&self) -> f64 {
        self.safe_daily_usage_target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDecision {
    should_notify: bool,
    risk_level: Option<RiskLevel>,
}

impl AlertDecision {
    pub fn none() -> Self {
        Self {
            should_notify: false,
            risk_level: None,
        }
    }

    pub fn notify(risk_level: RiskLevel) -> Self {
        Self {
            should_notify: true,
            risk_level: Some(risk_level),
        }
    }

    pub fn should_notify(&self) -> bool {
        self.should_notify
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_order_by_severity() {
        assert!(RiskLevel::Safe < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::Critical);
    }

    #[test]
    fn test_balance_log_deserializes_from_json_line() {
        let line = r#"{"plan_id": "plan-1", "logged_at": "2024-01-01T12:00:00Z", "remaining_amount": 2500.0}"#;
        let log: BalanceLog = serde_json::from_str(line).unwrap();
        assert_eq!(log.plan_id(), "plan-1");
        assert_eq!(log.remaining_amount(), 2500.0);
    }

    #[test]
    fn test_plan_unit_uses_uppercase_names() {
        let unit: PlanUnit = serde_json::from_str(r#""GB""#).unwrap();
        assert_eq!(unit, PlanUnit::Gb);
        assert_eq!(serde_json::to_string(&PlanUnit::Mb).unwrap(), r#""MB""#);
    }

    #[test]
    fn test_plan_deserializes_with_type_field() {
        let json = r#"{
            "id": "plan-1",
            "type": "INTERNET",
            "category": "MOBILE",
            "start_at": "2024-01-01T00:00:00Z",
            "end_at": "2024-01-31T00:00:00Z",
            "initial_amount": 3000.0,
            "unit": "MB"
        }"#;
        let plan: Plan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.plan_type(), PlanType::Internet);
        assert_eq!(plan.unit(), PlanUnit::Mb);
        assert_eq!(plan.initial_amount(), 3000.0);
    }
}
