use crate::converter::UnitConverter;
use crate::data_structures::{BalanceLog, Plan, PlanUnit, PredictionResult, RiskLevel};
use chrono::{DateTime, Duration, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The forecasting engine. Every method is a pure function of its arguments;
/// degenerate inputs always map to a defined result rather than an error.
pub struct UsagePredictor {
    converter: UnitConverter,
}

impl UsagePredictor {
    /// Depletion landing within this many hours of plan end is CRITICAL.
    pub const WARNING_THRESHOLD_HOURS: i64 = 48;
    /// EWMA smoothing factor.
    pub const ALPHA: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            converter: UnitConverter::new(),
        }
    }

    /// Plan-unit amount -> normalized space (MB for data, minutes for voice).
    pub fn normalize(&self, amount: f64, unit: PlanUnit) -> f64 {
        self.converter.to_normalized(amount, unit)
    }

    /// Smoothed daily consumption rate over a log series, in normalized
    /// units per day.
    ///
    /// Logs are stable-sorted by timestamp (equal timestamps keep their
    /// insertion order), then consecutive pairs are folded through the EWMA
    /// recurrence. Intervals where the balance rose (a top-up or a mistyped
    /// reading) or where no time elapsed are skipped. Returns `None` when
    /// fewer than two logs exist or every interval was skipped.
    pub fn daily_rate_from_logs(&self, logs: &[BalanceLog], unit: PlanUnit) -> Option<f64> {
        if logs.len() < 2 {
            return None;
        }

        let mut sorted: Vec<&BalanceLog> = logs.iter().collect();
        sorted.sort_by_key(|log| log.logged_at());

        let mut smoothed: Option<f64> = None;

        for pair in sorted.windows(2) {
            let (start, end) = (pair[0], pair[1]);

            let start_amount = self.normalize(start.remaining_amount(), unit);
            let end_amount = self.normalize(end.remaining_amount(), unit);

            if end_amount > start_amount {
                continue;
            }

            let duration_seconds = (end.logged_at() - start.logged_at()).num_seconds();
            if duration_seconds <= 0 {
                continue;
            }

            let consumed = start_amount - end_amount;
            let days = duration_seconds as f64 / SECONDS_PER_DAY;
            let interval_rate = consumed / days;

            smoothed = Some(match smoothed {
                // first valid interval seeds the running rate unsmoothed
                None => interval_rate,
                Some(previous) => self.ewma_smoothed_rate(previous, interval_rate, Self::ALPHA),
            });
        }

        smoothed
    }

    /// The smoothing recurrence in isolation.
    pub fn ewma_smoothed_rate(&self, previous_rate: f64, latest_rate: f64, alpha: f64) -> f64 {
        alpha * latest_rate + (1.0 - alpha) * previous_rate
    }

    /// Projected moment the remaining balance reaches zero at the given
    /// rate. `None` when the rate is non-positive (nothing to project).
    pub fn predicted_depletion_at(
        &self,
        now: DateTime<Utc>,
        remaining: f64,
        smoothed_rate: f64,
    ) -> Option<DateTime<Utc>> {
        if smoothed_rate <= 0.0 {
            return None;
        }

        let days_left = remaining / smoothed_rate;
        let seconds_left = (days_left * SECONDS_PER_DAY) as i64;

        Some(now + Duration::seconds(seconds_left))
    }

    /// Classifies how the projected depletion relates to plan expiry:
    /// SAFE when the balance outlasts the plan (or nothing is projected),
    /// CRITICAL when depletion lands within 48 whole hours of plan end,
    /// WARNING otherwise.
    pub fn risk_level(
        &self,
        end_at: DateTime<Utc>,
        predicted_depletion_at: Option<DateTime<Utc>>,
    ) -> RiskLevel {
        let depletion_at = match predicted_depletion_at {
            Some(at) => at,
            None => return RiskLevel::Safe,
        };

        if depletion_at >= end_at {
            return RiskLevel::Safe;
        }

        let gap_hours = (end_at - depletion_at).num_hours();

        if gap_hours <= Self::WARNING_THRESHOLD_HOURS {
            RiskLevel::Critical
        } else {
            RiskLevel::Warning
        }
    }

    /// The daily budget that would exactly exhaust the remaining balance at
    /// plan expiry. Zero when no days remain.
    pub fn recommended_safe_daily_usage(&self, remaining: f64, days_until_end: f64) -> f64 {
        if days_until_end <= 0.0 {
            return 0.0;
        }
        remaining / days_until_end
    }

    pub fn time_remaining_to_expiry(&self, now: DateTime<Utc>, end_at: DateTime<Utc>) -> Duration {
        if now > end_at {
            return Duration::zero();
        }
        end_at - now
    }

    /// Runs the full forecast for one plan.
    ///
    /// The rate is computed over a baseline-augmented series: when real logs
    /// exist and the plan started before the earliest one, a synthetic log at
    /// `(start_at, initial_amount)` anchors the rate to the declared
    /// allowance, so a single real reading already yields a usable rate.
    /// Logs stamped after `now` are ignored when picking the current balance
    /// but still feed the rate computation.
    pub fn predict(&self, plan: &Plan, logs: &[BalanceLog], now: DateTime<Utc>) -> PredictionResult {
        let normalized_initial = self.normalize(plan.initial_amount(), plan.unit());

        let mut sorted: Vec<BalanceLog> = logs.to_vec();
        sorted.sort_by_key(|log| log.logged_at());

        let augmented = match sorted.first() {
            Some(first) if plan.start_at() < first.logged_at() => {
                let baseline = BalanceLog::new(
                    plan.id().to_string(),
                    plan.start_at(),
                    plan.initial_amount(),
                );
                let mut series = Vec::with_capacity(sorted.len() + 1);
                series.push(baseline);
                series.extend(sorted.iter().cloned());
                series
            }
            _ => sorted.clone(),
        };

        let remaining_normalized = sorted
            .iter()
            .rev()
            .find(|log| log.logged_at() <= now)
            .map(|log| self.normalize(log.remaining_amount(), plan.unit()))
            .unwrap_or(normalized_initial);

        let days_until_end = (plan.end_at() - now).num_days().max(0);

        let rate = self.daily_rate_from_logs(&augmented, plan.unit());

        let safe_usage =
            self.recommended_safe_daily_usage(remaining_normalized, days_until_end as f64);

        match rate {
            Some(rate) if rate > 0.0 => {
                let depletion_at = self.predicted_depletion_at(now, remaining_normalized, rate);
                let risk = self.risk_level(plan.end_at(), depletion_at);

                PredictionResult::new(
                    remaining_normalized,
                    days_until_end,
                    rate,
                    rate,
                    depletion_at,
                    risk,
                    safe_usage,
                )
            }
            _ => PredictionResult::new(
                remaining_normalized,
                days_until_end,
                0.0,
                0.0,
                None,
                RiskLevel::Safe,
                safe_usage,
            ),
        }
    }
}

impl Default for UsagePredictor {
    fn default() -> Self {
        Self::new()
    }
}
