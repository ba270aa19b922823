//! Scenario result types

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{Money, PayoffResult, Strategy};

/// One evaluated amount during a target solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverStep {
    pub extra_payment: Money,
    /// `None` when the debt set diverged at this amount
    pub payoff_months: Option<u32>,
    pub meets_target: bool,
}

/// Every amount the solver evaluated, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverHistory {
    pub steps: Vec<SolverStep>,
}

impl SolverHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: SolverStep) {
        self.steps.push(step);
    }

    #[must_use]
    pub fn num_evaluations(&self) -> usize {
        self.steps.len()
    }

    /// Smallest evaluated amount that met the target
    #[must_use]
    pub fn best_feasible(&self) -> Option<&SolverStep> {
        self.steps
            .iter()
            .filter(|s| s.meets_target)
            .min_by_key(|s| s.extra_payment.amount())
    }
}

/// Minimal extra payment that retires the debt set within a target horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSolution {
    pub strategy: Strategy,
    pub target_months: u32,
    pub required_extra_payment: Money,
    pub payoff_months: u32,
    pub payoff_date: Date,
    pub total_interest: Money,
    /// Bisection steps after the two endpoint evaluations
    pub iterations: usize,
    pub converged: bool,
    pub history: SolverHistory,
}

/// Simulation outcome for one extra-payment amount in a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub extra_payment: Money,
    pub result: Result<PayoffResult, EngineError>,
}

impl SweepPoint {
    pub fn payoff_months(&self) -> Option<u32> {
        self.result.as_ref().ok().map(|r| r.payoff_months)
    }

    pub fn total_interest(&self) -> Option<Money> {
        self.result.as_ref().ok().map(|r| r.total_interest)
    }
}
