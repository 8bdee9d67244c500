use crate::alert::AlertPolicy;
use crate::data_structures::{AlertDecision, BalanceLog, Plan, PredictionResult};
use crate::loader::DataLoader;
use crate::predictor::UsagePredictor;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// In-memory façade over the engine: holds plans and their balance logs and
/// answers per-plan predictions and alert decisions.
pub struct BalanceTracker {
    plans: Vec<Plan>,
    balance_logs: Vec<BalanceLog>,
    predictor: UsagePredictor,
    policy: AlertPolicy,
    loader: DataLoader,
}

impl BalanceTracker {
    pub fn new() -> Self {
        Self {
            plans: Vec::new(),
            balance_logs: Vec::new(),
            predictor: UsagePredictor::new(),
            policy: AlertPolicy::new(),
            loader: DataLoader::new(),
        }
    }

    /// Adds a plan, replacing any existing plan with the same id.
    pub fn add_plan(&mut self, plan: Plan) {
        self.plans.retain(|existing| existing.id() != plan.id());
        self.plans.push(plan);
    }

    pub fn add_log(&mut self, log: BalanceLog) {
        self.balance_logs.push(log);
        self.balance_logs.sort_by_key(|log| log.logged_at());
    }

    pub fn load_plan<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let plan = self.loader.load_plan_from_file(path)?;
        self.add_plan(plan);
        Ok(())
    }

    pub fn load_logs<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut logs = self.loader.load_logs_from_file(path)?;
        self.balance_logs.append(&mut logs);
        self.balance_logs.sort_by_key(|log| log.logged_at());
        Ok(())
    }

    pub fn load_logs_from_directory<P: AsRef<Path>>(&mut self, dir_path: P) -> Result<()> {
        let mut logs = self.loader.load_logs_from_directory(dir_path)?;
        self.balance_logs.append(&mut logs);
        self.balance_logs.sort_by_key(|log| log.logged_at());
        Ok(())
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.id() == plan_id)
    }

    pub fn logs_for_plan(&self, plan_id: &str) -> Vec<&BalanceLog> {
        self.balance_logs
            .iter()
            .filter(|log| log.plan_id() == plan_id)
            .collect()
    }

    /// Runs a forecast for one plan. `None` when the plan is unknown.
    pub fn predict_for(&self, plan_id: &str, now: DateTime<Utc>) -> Option<PredictionResult> {
        let plan = self.plan(plan_id)?;
        let logs: Vec<BalanceLog> = self
            .balance_logs
            .iter()
            .filter(|log| log.plan_id() == plan_id)
            .cloned()
            .collect();

        Some(self.predictor.predict(plan, &logs, now))
    }

    pub fn check_alert(&self, plan_id: &str, now: DateTime<Utc>) -> AlertDecision {
        let prediction = self.predict_for(plan_id, now);
        self.policy.decide_alert(prediction.as_ref())
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    pub fn log_count(&self) -> usize {
        self.balance_logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty() && self.balance_logs.is_empty()
    }

    pub fn clear_data(&mut self) {
        self.plans.clear();
        self.balance_logs.clear();
    }
}

impl Default for BalanceTracker {
    fn default() -> Self {
        Self::new()
    }
}
