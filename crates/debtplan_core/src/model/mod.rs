mod consolidation;
mod debt;
mod ids;
mod money;
mod schedule;

pub use consolidation::{
    ConsolidationAnalysis, ConsolidationOpportunity, ConsolidationProduct, ConsolidationType,
    RiskLevel, UserProfile,
};
pub use debt::{DebtAccount, DebtType, PriorityWeights, Strategy};
pub use ids::DebtId;
pub use money::{
    Currency, DISPLAY_SCALE, Money, Percentage, STORAGE_SCALE, round_storage,
};
pub use schedule::{DebtPayoff, PayoffResult, Schedule, ScheduleEntry};
