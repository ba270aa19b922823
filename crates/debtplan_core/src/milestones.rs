//! Payoff milestones derived from a computed schedule

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::model::{DebtId, Money, PayoffResult, Schedule};

pub const DEFAULT_THRESHOLDS: [Decimal; 5] = [dec!(25), dec!(50), dec!(75), dec!(90), dec!(100)];

/// First month in which a share of the original debt was paid off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Percent of the original debt paid off, 0..=100
    pub percentage: Decimal,
    pub target_remaining_balance: Money,
    pub month_index: u32,
    pub date: Date,
    /// False when the schedule ended above the target and the final month
    /// was reported instead
    pub reached: bool,
}

/// A single debt's completion month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtCompletion {
    pub debt_id: DebtId,
    pub month_index: u32,
    pub date: Date,
    /// 1..10, larger for earlier wins
    pub motivation_boost: Decimal,
}

/// Milestones for each threshold, in the order given
///
/// An empty schedule has nothing to report and yields no milestones.
pub fn milestones(
    schedule: &Schedule,
    total_original_debt: Money,
    thresholds: &[Decimal],
) -> Result<Vec<Milestone>> {
    if let Some(bad) = thresholds
        .iter()
        .find(|t| **t < Decimal::ZERO || **t > dec!(100))
    {
        return Err(InputError::InvalidThreshold(*bad).into());
    }
    let Some(last) = schedule.last() else {
        return Ok(Vec::new());
    };

    let found = thresholds
        .iter()
        .map(|&percentage| {
            let target = total_original_debt.scale(Decimal::ONE - percentage / dec!(100));
            let hit = schedule
                .iter()
                .find(|e| e.aggregate_remaining_balance.amount() <= target.amount());
            let entry = hit.unwrap_or(last);
            Milestone {
                percentage,
                target_remaining_balance: target,
                month_index: entry.month_index,
                date: entry.date,
                reached: hit.is_some(),
            }
        })
        .collect();

    Ok(found)
}

/// Milestones at 25, 50, 75, 90 and 100 percent of a payoff result
pub fn default_milestones(result: &PayoffResult) -> Result<Vec<Milestone>> {
    milestones(&result.schedule, result.original_balance, &DEFAULT_THRESHOLDS)
}

/// How much a payoff in `month_index` tends to lift motivation, on a 1..10 scale
pub fn motivation_boost(month_index: u32) -> Decimal {
    match month_index {
        0..=6 => dec!(10),
        7..=12 => dec!(7.5),
        13..=24 => dec!(5),
        _ => dec!(2.5),
    }
}

/// Every debt's completion month, in payoff order
pub fn debt_payoffs(schedule: &Schedule) -> Vec<DebtCompletion> {
    schedule
        .iter()
        .flat_map(|entry| {
            entry
                .debts_completed_this_month
                .iter()
                .map(move |&debt_id| DebtCompletion {
                    debt_id,
                    month_index: entry.month_index,
                    date: entry.date,
                    motivation_boost: motivation_boost(entry.month_index),
                })
        })
        .collect()
}
