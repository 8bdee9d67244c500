use crate::data_structures::PlanUnit;

const MB_PER_GB: f64 = 1024.0;

/// Stateless conversion between normalized amounts and a plan's display unit.
///
/// Minutes are never converted; voice amounts stay in minutes on both sides.
pub struct UnitConverter;

impl UnitConverter {
    pub fn new() -> Self {
        Self
    }

    /// Plan-unit amount -> normalized (MB for data, minutes for voice).
    pub fn to_normalized(&self, amount: f64, unit: PlanUnit) -> f64 {
        match unit {
            PlanUnit::Mb => amount,
            PlanUnit::Gb => amount * MB_PER_GB,
            PlanUnit::Minutes => amount,
        }
    }

    /// Normalized amount -> the plan's display unit.
    pub fn from_normalized(&self, value: f64, unit: PlanUnit) -> f64 {
        match unit {
            PlanUnit::Mb => value,
            PlanUnit::Gb => value / MB_PER_GB,
            PlanUnit::Minutes => value,
        }
    }

    /// Normalized per-day rate -> display unit per day.
    pub fn rate_from_normalized(&self, rate_per_day: f64, unit: PlanUnit) -> f64 {
        match unit {
            PlanUnit::Mb => rate_per_day,
            PlanUnit::Gb => rate_per_day / MB_PER_GB,
            PlanUnit::Minutes => rate_per_day,
        }
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mb_is_identity_both_ways() {
        let converter = UnitConverter::new();
        assert_eq!(converter.to_normalized(250.0, PlanUnit::Mb), 250.0);
        assert_eq!(converter.from_normalized(250.0, PlanUnit::Mb), 250.0);
    }

    #[test]
    fn test_gb_scales_by_1024() {
        let converter = UnitConverter::new();
        assert_eq!(converter.to_normalized(2.0, PlanUnit::Gb), 2048.0);
        assert_eq!(converter.from_normalized(2048.0, PlanUnit::Gb), 2.0);
    }

    #[test]
    fn test_minutes_pass_through() {
        let converter = UnitConverter::new();
        assert_eq!(converter.to_normalized(60.0, PlanUnit::Minutes), 60.0);
        assert_eq!(converter.from_normalized(60.0, PlanUnit::Minutes), 60.0);
    }

    #[test]
    fn test_rate_uses_same_table() {
        let converter = UnitConverter::new();
        assert_eq!(
            converter.rate_from_normalized(102.4, PlanUnit::Gb),
            102.4 / 1024.0
        );
        assert_eq!(converter.rate_from_normalized(20.0, PlanUnit::Mb), 20.0);
    }

    #[test]
    fn test_sign_is_not_validated() {
        let converter = UnitConverter::new();
        assert_eq!(converter.to_normalized(-1.0, PlanUnit::Gb), -1024.0);
        assert_eq!(converter.from_normalized(0.0, PlanUnit::Gb), 0.0);
    }
}
