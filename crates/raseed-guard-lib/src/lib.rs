pub mod alert;
pub mod converter;
pub mod data_structures;
pub mod loader;
pub mod predictor;
pub mod tracker;

pub use alert::AlertPolicy;
pub use converter::UnitConverter;
pub use data_structures::{
    AlertDecision, BalanceLog, Plan, PlanCategory, PlanType, PlanUnit, PredictionResult, RiskLevel,
};
pub use loader::DataLoader;
pub use predictor::UsagePredictor;
pub use tracker::BalanceTracker;

pub use anyhow::Result;
pub use chrono::{DateTime, Duration, Utc};

pub mod prelude {
    pub use crate::data_structures::{
        AlertDecision, BalanceLog, Plan, PlanCategory, PlanType, PlanUnit, PredictionResult,
        RiskLevel,
    };
    pub use crate::predictor::UsagePredictor;
    pub use crate::tracker::BalanceTracker;
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
}
