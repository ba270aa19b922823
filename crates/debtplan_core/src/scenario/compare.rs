//! Avalanche vs. snowball vs. minimum-only comparison
//!
//! The recommendation is a deterministic function of the three results and
//! the scenario config:
//!
//! 1. Avalanche saves more than the material threshold: Avalanche.
//! 2. Snowball is strictly cheaper: Snowball.
//! 3. Otherwise the difference is immaterial and the psychological
//!    preference decides.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::allocator::priority_order;
use crate::error::{EngineError, Result};
use crate::model::{
    Currency, DebtAccount, DebtId, Money, PayoffResult, Percentage, Strategy, round_storage,
};
use crate::simulation::{simulate, simulate_minimum_only, validate_debts};

use super::config::{PsychologicalPreference, ScenarioConfig};

/// Smallest-debt share of the total below which early wins come quickly
const QUICK_WIN_SHARE: Decimal = dec!(0.2);
/// Avalanche savings above which the math is overwhelming
const LARGE_SAVINGS: Decimal = dec!(1000);

/// Soft factors that inform the recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychologicalFactors {
    /// 0..1, higher when the smallest debt is a small share of the total
    pub quick_wins_importance: Decimal,
    /// 0..1, higher when avalanche saves more interest
    pub mathematical_optimality: Decimal,
    pub avalanche_first_payoff_month: Option<u32>,
    pub snowball_first_payoff_month: Option<u32>,
}

/// How hard one debt's interest works against its minimum payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtEfficiency {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub interest_rate: Percentage,
    pub monthly_interest_cost: Money,
    /// Monthly interest over the minimum payment, zero without a minimum
    pub interest_to_payment_ratio: Decimal,
    /// Share of the minimum that reaches principal in the first month
    pub principal_share: Decimal,
    /// Balance per point of APR; `None` for interest-free debts
    pub payoff_efficiency: Option<Decimal>,
    pub amortizes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub avalanche: PayoffResult,
    pub snowball: PayoffResult,
    /// Extra payment of zero; failure here does not abort the comparison
    pub minimum_only: std::result::Result<PayoffResult, EngineError>,
    pub recommended_strategy: Strategy,
    pub recommendation_reason: String,
    /// Snowball total interest minus avalanche total interest
    pub interest_difference: Money,
    /// Recommended strategy vs. the minimum-only baseline
    pub interest_savings_vs_minimum: Option<Money>,
    pub time_savings_vs_minimum_months: Option<i64>,
    pub psychological_factors: PsychologicalFactors,
    /// Per-debt interest drag, highest rate first
    pub efficiency: Vec<DebtEfficiency>,
}

impl ComparisonResult {
    pub fn recommended(&self) -> &PayoffResult {
        match self.recommended_strategy {
            Strategy::Snowball => &self.snowball,
            _ => &self.avalanche,
        }
    }
}

/// Run avalanche, snowball, and the minimum-only baseline and recommend one
pub fn compare(
    debts: &[DebtAccount],
    extra_payment: Money,
    config: &ScenarioConfig,
) -> Result<ComparisonResult> {
    validate_debts(debts)?;
    let sim = &config.simulation;

    #[cfg(feature = "parallel")]
    let (avalanche, snowball) = rayon::join(
        || simulate(debts, Strategy::Avalanche, extra_payment, sim),
        || simulate(debts, Strategy::Snowball, extra_payment, sim),
    );

    #[cfg(not(feature = "parallel"))]
    let (avalanche, snowball) = (
        simulate(debts, Strategy::Avalanche, extra_payment, sim),
        simulate(debts, Strategy::Snowball, extra_payment, sim),
    );

    let (avalanche, snowball) = (avalanche?, snowball?);
    let minimum_only = simulate_minimum_only(debts, sim);

    let interest_difference = snowball.total_interest.checked_sub(&avalanche.total_interest)?;
    let difference = interest_difference.amount();
    let factors = psychological_factors(debts, &avalanche, &snowball, difference, config);
    let (recommended_strategy, recommendation_reason) =
        recommend(difference, &factors, config, extra_payment.currency());

    let recommended = match recommended_strategy {
        Strategy::Snowball => &snowball,
        _ => &avalanche,
    };
    let (interest_savings_vs_minimum, time_savings_vs_minimum_months) = match &minimum_only {
        Ok(baseline) => (
            Some(baseline.total_interest.checked_sub(&recommended.total_interest)?),
            Some(i64::from(baseline.payoff_months) - i64::from(recommended.payoff_months)),
        ),
        Err(_) => (None, None),
    };

    tracing::debug!(
        %recommended_strategy,
        avalanche_interest = %avalanche.total_interest,
        snowball_interest = %snowball.total_interest,
        "strategies compared"
    );

    Ok(ComparisonResult {
        interest_difference,
        avalanche,
        snowball,
        minimum_only,
        recommended_strategy,
        recommendation_reason,
        interest_savings_vs_minimum,
        time_savings_vs_minimum_months,
        psychological_factors: factors,
        efficiency: efficiency_metrics(debts)?,
    })
}

/// Interest cost and payment efficiency of each debt, highest rate first
pub fn efficiency_metrics(debts: &[DebtAccount]) -> Result<Vec<DebtEfficiency>> {
    let ordered = priority_order(debts, Strategy::Avalanche, None)?;

    let metrics = ordered
        .into_iter()
        .map(|debt| {
            let monthly_interest_cost = debt.monthly_interest_charge();
            let minimum = debt.minimum_payment.amount();
            let interest_to_payment_ratio = if minimum > Decimal::ZERO {
                round_storage(monthly_interest_cost.amount() / minimum)
            } else {
                Decimal::ZERO
            };
            let rate = debt.interest_rate.value();
            let payoff_efficiency =
                (rate > Decimal::ZERO).then(|| round_storage(debt.balance.amount() / rate));

            DebtEfficiency {
                debt_id: debt.id,
                debt_name: debt.name.clone(),
                interest_rate: debt.interest_rate,
                monthly_interest_cost,
                interest_to_payment_ratio,
                principal_share: debt.payment_to_principal_ratio(),
                payoff_efficiency,
                amortizes: debt.amortizes(),
            }
        })
        .collect();

    Ok(metrics)
}

fn psychological_factors(
    debts: &[DebtAccount],
    avalanche: &PayoffResult,
    snowball: &PayoffResult,
    difference: Decimal,
    config: &ScenarioConfig,
) -> PsychologicalFactors {
    let total = avalanche.original_balance.amount();
    let smallest = debts
        .iter()
        .map(|d| d.balance.amount())
        .filter(|b| *b > Decimal::ZERO)
        .min();

    let quick_wins_importance = match smallest {
        Some(small) if total > Decimal::ZERO && small / total < QUICK_WIN_SHARE => dec!(0.8),
        _ => dec!(0.4),
    };

    let mathematical_optimality = if difference > LARGE_SAVINGS {
        dec!(0.9)
    } else if difference > config.material_savings_threshold {
        dec!(0.7)
    } else {
        dec!(0.4)
    };

    PsychologicalFactors {
        quick_wins_importance,
        mathematical_optimality,
        avalanche_first_payoff_month: avalanche.first_payoff_month(),
        snowball_first_payoff_month: snowball.first_payoff_month(),
    }
}

fn recommend(
    difference: Decimal,
    factors: &PsychologicalFactors,
    config: &ScenarioConfig,
    currency: Currency,
) -> (Strategy, String) {
    let savings = Money::new(difference, currency);

    if difference > config.material_savings_threshold {
        return (
            Strategy::Avalanche,
            format!(
                "Avalanche saves {savings} in interest, above the {} threshold",
                Money::new(config.material_savings_threshold, currency)
            ),
        );
    }

    if difference < Decimal::ZERO {
        return (
            Strategy::Snowball,
            format!(
                "Snowball costs {} less in interest for this debt set",
                Money::new(-difference, currency)
            ),
        );
    }

    match config.psychological_preference {
        PsychologicalPreference::QuickWins => (
            Strategy::Snowball,
            format!("Interest difference of {savings} is small; Snowball gives earlier wins"),
        ),
        PsychologicalPreference::Mathematical => (
            Strategy::Avalanche,
            format!("Avalanche minimizes interest (saves {savings})"),
        ),
        PsychologicalPreference::Balanced => {
            if factors.quick_wins_importance > config.quick_wins_weight {
                (
                    Strategy::Snowball,
                    format!(
                        "Interest difference of {savings} is small and a quick first payoff is available; Snowball keeps motivation up"
                    ),
                )
            } else {
                (
                    Strategy::Avalanche,
                    format!("Interest difference of {savings} is small; Avalanche costs no more"),
                )
            }
        }
    }
}
