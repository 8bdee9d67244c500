use crate::data_structures::{AlertDecision, PredictionResult, RiskLevel};

/// Maps a prediction onto a notify/don't-notify decision. Total over the
/// whole input space: absent prediction and SAFE both stay quiet.
pub struct AlertPolicy;

impl AlertPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn decide_alert(&self, prediction: Option<&PredictionResult>) -> AlertDecision {
        let prediction = match prediction {
            Some(prediction) => prediction,
            None => return AlertDecision::none(),
        };

        if prediction.risk_level() == RiskLevel::Safe {
            return AlertDecision::none();
        }

        AlertDecision::notify(prediction.risk_level())
    }
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction_with_risk(risk_level: RiskLevel) -> PredictionResult {
        PredictionResult::new(1000.0, 10, 50.0, 50.0, None, risk_level, 100.0)
    }

    #[test]
    fn test_no_prediction_means_no_alert() {
        let policy = AlertPolicy::new();
        let decision = policy.decide_alert(None);
        assert!(!decision.should_notify());
        assert!(decision.risk_level().is_none());
    }

    #[test]
    fn test_safe_prediction_means_no_alert() {
        let policy = AlertPolicy::new();
        let decision = policy.decide_alert(Some(&prediction_with_risk(RiskLevel::Safe)));
        assert!(!decision.should_notify());
    }

    #[test]
    fn test_warning_prediction_notifies() {
        let policy = AlertPolicy::new();
        let decision = policy.decide_alert(Some(&prediction_with_risk(RiskLevel::Warning)));
        assert!(decision.should_notify());
        assert_eq!(decision.risk_level(), Some(RiskLevel::Warning));
    }

    #[test]
    fn test_critical_prediction_notifies() {
        let policy = AlertPolicy::new();
        let decision = policy.decide_alert(Some(&prediction_with_risk(RiskLevel::Critical)));
        assert!(decision.should_notify());
        assert_eq!(decision.risk_level(), Some(RiskLevel::Critical));
    }
}
