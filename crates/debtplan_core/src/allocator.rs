//! Strategy allocator: which debt receives the extra payment
//!
//! A pure function of its inputs. The simulator calls it every month with the
//! shrinking active set, so nothing here is cached.

use rust_decimal::Decimal;

use crate::error::{EngineError, Result};
use crate::model::{DebtAccount, DebtId, Percentage, PriorityWeights, Strategy};

/// The facts the allocator ranks on
#[derive(Debug, Clone, Copy)]
pub struct RankKey {
    pub debt_id: DebtId,
    pub rate: Percentage,
    pub balance: Decimal,
}

/// Return the indices of `items` in priority order.
///
/// Sorting is stable: ties keep their input order, with no secondary
/// numeric tiebreak.
pub fn rank_indices<T>(
    items: &[T],
    strategy: Strategy,
    weights: Option<&PriorityWeights>,
    key: impl Fn(&T) -> RankKey,
) -> Result<Vec<usize>> {
    let keys: Vec<RankKey> = items.iter().map(key).collect();
    let mut order: Vec<usize> = (0..items.len()).collect();

    match strategy {
        Strategy::Avalanche => order.sort_by(|&a, &b| keys[b].rate.cmp(&keys[a].rate)),
        Strategy::Snowball => order.sort_by(|&a, &b| keys[a].balance.cmp(&keys[b].balance)),
        Strategy::Custom => {
            let weights = weights.ok_or(EngineError::StrategyNotConfigured(strategy))?;
            order.sort_by(|&a, &b| {
                weights
                    .weight(keys[b].debt_id)
                    .cmp(&weights.weight(keys[a].debt_id))
            });
        }
    }

    Ok(order)
}

/// Order debts for extra-payment application.
///
/// Avalanche: descending interest rate. Snowball: ascending balance.
/// Custom: descending caller weight; without weights the input order is left
/// untouched and `StrategyNotConfigured` is returned.
pub fn priority_order<'a>(
    debts: &'a [DebtAccount],
    strategy: Strategy,
    weights: Option<&PriorityWeights>,
) -> Result<Vec<&'a DebtAccount>> {
    let order = rank_indices(debts, strategy, weights, |d| RankKey {
        debt_id: d.id,
        rate: d.interest_rate,
        balance: d.balance.amount(),
    })?;
    Ok(order.into_iter().map(|i| &debts[i]).collect())
}
