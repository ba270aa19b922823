//! What-if sweep over extra-payment amounts
//!
//! Each amount is an independent simulation, so with the `parallel` feature
//! the points run on the rayon pool. Output order is always ascending by
//! amount.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::model::{DebtAccount, Money, Strategy};
use crate::simulation::{simulate, validate_debts};

use super::result::SweepPoint;

/// Simulate `debts` once per distinct extra amount, ascending
///
/// A malformed debt set fails the whole sweep. Anything specific to one
/// amount (a negative amount, a currency mismatch, divergence) is reported on
/// that point alone.
pub fn sweep(
    debts: &[DebtAccount],
    strategy: Strategy,
    extra_amounts: &[Money],
    config: &SimulationConfig,
) -> Result<Vec<SweepPoint>> {
    validate_debts(debts)?;

    let mut amounts = extra_amounts.to_vec();
    amounts.sort_by_key(|m| m.amount());
    amounts.dedup_by_key(|m| m.amount());

    tracing::debug!(%strategy, points = amounts.len(), "running extra-payment sweep");

    let run = |extra: &Money| SweepPoint {
        extra_payment: *extra,
        result: simulate(debts, strategy, *extra, config),
    };

    #[cfg(feature = "parallel")]
    let mut points: Vec<SweepPoint> = amounts.par_iter().map(run).collect();

    #[cfg(not(feature = "parallel"))]
    let mut points: Vec<SweepPoint> = amounts.iter().map(run).collect();

    points.sort_by_key(|p| p.extra_payment.amount());
    Ok(points)
}
