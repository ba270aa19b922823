//! Tests for the amortization simulator
//!
//! These tests verify:
//! - Zero-interest payoffs are exact
//! - Divergence is reported instead of a truncated schedule, and only when
//!   payoff is impossible
//! - Inputs are rejected before any month runs
//! - Schedule totals reconcile with starting balances

use jiff::Timestamp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{card, loan, usd};
use crate::config::{DebtBuilder, SimulationConfig};
use crate::error::{EngineError, InputError, MoneyError};
use crate::model::{Currency, DebtId, Money, PayoffResult, PriorityWeights, Strategy};
use crate::simulation::{simulate, simulate_minimum_only};

fn config() -> SimulationConfig {
    SimulationConfig::default().with_start_date(jiff::civil::date(2025, 1, 1))
}

/// 1200 at 0% with a 100 minimum pays off in exactly 12 months
#[test]
fn test_zero_interest_determinism() {
    let debts = vec![loan(0, dec!(1200), dec!(0), dec!(100))];
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap();

    assert_eq!(result.payoff_months, 12);
    assert_eq!(result.total_interest.amount(), Decimal::ZERO);
    assert_eq!(result.total_payments.amount(), dec!(1200));
    assert_eq!(result.schedule.len(), 12);
    assert_eq!(result.payoff_date, jiff::civil::date(2026, 1, 1));

    for (i, entry) in result.schedule.iter().enumerate() {
        assert_eq!(entry.month_index, i as u32 + 1);
        assert_eq!(entry.principal_portion.amount(), dec!(100));
        assert_eq!(
            entry.aggregate_remaining_balance.amount(),
            dec!(1200) - dec!(100) * Decimal::from(i + 1)
        );
    }

    let last = result.schedule.last().unwrap();
    assert_eq!(last.active_debt_count, 0);
    assert_eq!(last.debts_completed_this_month, vec![DebtId(0)]);
}

/// Interest above the minimum is reported as divergence in the first month
#[test]
fn test_divergence_detected() {
    let debts = vec![card(0, dec!(10000), dec!(30), dec!(50))];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap_err();

    assert_eq!(
        err,
        EngineError::Diverging {
            month: 1,
            debt_ids: vec![DebtId(0)],
            remaining_balance: dec!(10200),
        }
    );
    assert!(err.is_diverging());
}

/// A debt that outgrows its minimum is not fatal once freed minimums roll into it
#[test]
fn test_rollover_rescues_growing_debt() {
    let debts = vec![
        card(0, dec!(10), dec!(0), dec!(500)),
        card(1, dec!(10000), dec!(30), dec!(50)),
    ];

    let rolling = simulate(
        &debts,
        Strategy::Avalanche,
        usd(dec!(0)),
        &config().with_rollover(true),
    )
    .unwrap();
    let order: Vec<_> = rolling.debt_payoffs.iter().map(|p| p.debt_id).collect();
    assert_eq!(order, vec![DebtId(0), DebtId(1)]);
    assert_eq!(rolling.debt_payoffs[0].month_index, 1);
    // Month 1 grows the card by 200 before the freed 500 reaches it
    assert_eq!(
        rolling.schedule.entries()[0].aggregate_remaining_balance.amount(),
        dec!(10200)
    );
    assert!(rolling.payoff_months < 40);

    // Without rollover the card only ever sees its own 50
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::Diverging {
            month: 1,
            debt_ids: vec![DebtId(1)],
            remaining_balance: dec!(10200),
        }
    );
}

/// The aggregate may rise for a while as long as the budget beats the interest floor
#[test]
fn test_rising_aggregate_that_recovers_pays_off() {
    let debts = vec![
        card(0, dec!(10000), dec!(30), dec!(0)),
        loan(1, dec!(2000), dec!(12), dec!(0)),
    ];
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(260)), &config()).unwrap();

    let first = result.schedule.entries()[0].aggregate_remaining_balance.amount();
    assert!(first > dec!(12000));
    assert_eq!(result.debt_payoffs[0].debt_id, DebtId(0));
    assert!(result.payoff_months < 600);
}

/// A balance that neither grows nor shrinks repeats forever
#[test]
fn test_fixed_point_is_divergence() {
    let debts = vec![loan(0, dec!(100), dec!(0), dec!(0))];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap_err();

    assert_eq!(
        err,
        EngineError::Diverging {
            month: 1,
            debt_ids: vec![DebtId(0)],
            remaining_balance: dec!(100),
        }
    );
}

#[test]
fn test_horizon_past_last_date_rejected() {
    let debts = vec![loan(0, dec!(1200), dec!(0), dec!(100))];
    let config = SimulationConfig::default().with_start_date(jiff::civil::date(9999, 1, 1));
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config).unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidInput(InputError::HorizonOutOfRange {
            start_date: jiff::civil::date(9999, 1, 1),
            max_months: 600,
        })
    );

    // A short enough cap fits
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config.with_max_months(11));
    assert!(result.is_err_and(|e| e.is_diverging()));
}

/// Slow but amortizing debts still diverge when they outlast the month cap
#[test]
fn test_month_cap_is_divergence() {
    let debts = vec![loan(0, dec!(1200), dec!(0), dec!(1))];
    let config = config().with_max_months(12);
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config).unwrap_err();

    assert_eq!(
        err,
        EngineError::Diverging {
            month: 12,
            debt_ids: vec![DebtId(0)],
            remaining_balance: dec!(1188),
        }
    );
}

#[test]
fn test_invalid_inputs_rejected() {
    let cfg = config();
    let err = simulate(&[], Strategy::Avalanche, usd(dec!(0)), &cfg).unwrap_err();
    assert_eq!(err, EngineError::InvalidInput(InputError::NoDebts));

    let debts = vec![loan(0, dec!(-1), dec!(5), dec!(10))];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &cfg).unwrap_err();
    assert_eq!(err, EngineError::InvalidInput(InputError::NegativeBalance(DebtId(0))));

    let debts = vec![loan(0, dec!(100), dec!(-5), dec!(10))];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &cfg).unwrap_err();
    assert_eq!(err, EngineError::InvalidInput(InputError::NegativeRate(DebtId(0))));

    let debts = vec![loan(0, dec!(100), dec!(5), dec!(-10))];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &cfg).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput(InputError::NegativeMinimumPayment(DebtId(0)))
    );

    let debts = vec![
        loan(0, dec!(100), dec!(5), dec!(10)),
        loan(0, dec!(200), dec!(5), dec!(10)),
    ];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &cfg).unwrap_err();
    assert_eq!(err, EngineError::InvalidInput(InputError::DuplicateDebtId(DebtId(0))));

    let debts = vec![loan(0, dec!(100), dec!(5), dec!(10))];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(-1)), &cfg).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput(InputError::NegativeExtraPayment(dec!(-1)))
    );
}

#[test]
fn test_currency_mismatch_rejected() {
    let debts = vec![
        loan(0, dec!(100), dec!(5), dec!(10)),
        DebtBuilder::credit_card("Euro card")
            .id(DebtId(1))
            .currency(Currency::EUR)
            .balance(dec!(100))
            .minimum_payment(dec!(10))
            .build(),
    ];
    let err = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap_err();
    assert_eq!(
        err,
        EngineError::Money(MoneyError::CurrencyMismatch {
            expected: Currency::USD,
            actual: Currency::EUR,
        })
    );

    let debts = vec![loan(0, dec!(100), dec!(5), dec!(10))];
    let extra = Money::new(dec!(10), Currency::GBP);
    let err = simulate(&debts, Strategy::Avalanche, extra, &config()).unwrap_err();
    assert!(matches!(err, EngineError::Money(MoneyError::CurrencyMismatch { .. })));
}

#[test]
fn test_custom_strategy_requires_weights() {
    let debts = vec![
        card(0, dec!(5000), dec!(20), dec!(100)),
        card(1, dec!(1000), dec!(5), dec!(50)),
    ];
    let err = simulate(&debts, Strategy::Custom, usd(dec!(200)), &config()).unwrap_err();
    assert_eq!(err, EngineError::StrategyNotConfigured(Strategy::Custom));

    // Weighting the low-rate debt first makes custom behave like snowball here
    let weights = PriorityWeights::new().with(DebtId(1), dec!(1));
    let custom = simulate(
        &debts,
        Strategy::Custom,
        usd(dec!(200)),
        &config().with_custom_weights(weights),
    )
    .unwrap();
    let snowball = simulate(&debts, Strategy::Snowball, usd(dec!(200)), &config()).unwrap();
    assert_eq!(custom.total_interest, snowball.total_interest);
    assert_eq!(custom.debt_payoffs[0].debt_id, DebtId(1));
}

/// Principal applied equals starting balances plus any capitalized interest
#[test]
fn test_principal_conservation() {
    let debts = vec![
        card(0, dec!(4321.17), dec!(23.99), dec!(97.45)),
        card(1, dec!(812.40), dec!(17.5), dec!(25)),
        loan(2, dec!(9150), dec!(7.25), dec!(180)),
    ];
    let result = simulate(&debts, Strategy::Snowball, usd(dec!(150)), &config()).unwrap();

    let original: Decimal = debts.iter().map(|d| d.balance.amount()).sum();
    assert_eq!(result.original_balance.amount(), original);
    assert_eq!(result.schedule.total_capitalized_interest(), Decimal::ZERO);
    assert_eq!(result.schedule.total_principal(), original);
    assert_eq!(
        result.total_payments.amount(),
        result.total_interest.amount() + original
    );
}

/// A minimum below the interest is capitalized until the extra payment reaches the debt
#[test]
fn test_capitalized_interest_reconciles() {
    let debts = vec![card(0, dec!(10000), dec!(30), dec!(50))];
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(500)), &config()).unwrap();

    let capitalized = result.schedule.total_capitalized_interest();
    assert!(capitalized > Decimal::ZERO);
    assert_eq!(result.schedule.total_principal(), dec!(10000) + capitalized);
}

#[test]
fn test_balance_non_increasing_and_payment_budget() {
    let debts = vec![
        card(0, dec!(5000), dec!(20), dec!(100)),
        card(1, dec!(1000), dec!(5), dec!(50)),
    ];
    let extra = dec!(200);
    let result = simulate(&debts, Strategy::Avalanche, usd(extra), &config()).unwrap();

    let budget = dec!(100) + dec!(50) + extra;
    let mut previous = dec!(6000);
    for entry in &result.schedule {
        let balance = entry.aggregate_remaining_balance.amount();
        assert!(balance <= previous, "balance rose in month {}", entry.month_index);
        assert!(entry.total_payment_this_month.amount() <= budget);
        previous = balance;
    }
}

/// Folding freed minimums into the extra budget can only speed things up
#[test]
fn test_rollover_accelerates_payoff() {
    let debts = vec![
        card(0, dec!(600), dec!(19.99), dec!(40)),
        card(1, dec!(7000), dec!(22.99), dec!(175)),
        loan(2, dec!(12000), dec!(6.5), dec!(240)),
    ];
    let fixed = simulate(&debts, Strategy::Snowball, usd(dec!(100)), &config()).unwrap();
    let rolling = simulate(
        &debts,
        Strategy::Snowball,
        usd(dec!(100)),
        &config().with_rollover(true),
    )
    .unwrap();

    assert!(rolling.payoff_months < fixed.payoff_months);
    assert!(rolling.total_interest.amount() < fixed.total_interest.amount());
}

#[test]
fn test_debt_payoffs_in_completion_order() {
    let debts = vec![
        card(0, dec!(5000), dec!(20), dec!(100)),
        card(1, dec!(1000), dec!(5), dec!(50)),
    ];
    let result = simulate(&debts, Strategy::Snowball, usd(dec!(200)), &config()).unwrap();

    let order: Vec<_> = result.debt_payoffs.iter().map(|p| p.debt_id).collect();
    assert_eq!(order, vec![DebtId(1), DebtId(0)]);
    assert_eq!(result.first_payoff_month(), Some(result.debt_payoffs[0].month_index));

    let per_debt: Decimal = result
        .debt_payoffs
        .iter()
        .map(|p| p.interest_paid.amount())
        .sum();
    assert_eq!(per_debt, result.total_interest.amount());
}

/// Without a configured start, month 0 is the UTC date of the newest snapshot
#[test]
fn test_start_date_from_created_at() {
    let created: Timestamp = "2024-03-15T23:30:00Z".parse().unwrap();
    let older: Timestamp = "2023-01-01T00:00:00Z".parse().unwrap();
    let debts = vec![
        DebtBuilder::personal_loan("New")
            .id(DebtId(0))
            .balance(dec!(300))
            .minimum_payment(dec!(100))
            .created_at(created)
            .build(),
        DebtBuilder::personal_loan("Old")
            .id(DebtId(1))
            .balance(dec!(300))
            .minimum_payment(dec!(100))
            .created_at(older)
            .build(),
    ];
    let result = simulate(
        &debts,
        Strategy::Avalanche,
        usd(dec!(0)),
        &SimulationConfig::default(),
    )
    .unwrap();

    assert_eq!(result.schedule.entries()[0].date, jiff::civil::date(2024, 4, 15));
    assert_eq!(result.payoff_date, jiff::civil::date(2024, 6, 15));
}

#[test]
fn test_already_paid_set_is_empty_schedule() {
    let debts = vec![loan(0, dec!(0), dec!(12), dec!(50))];
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap();

    assert_eq!(result.payoff_months, 0);
    assert!(result.schedule.is_empty());
    assert_eq!(result.payoff_date, jiff::civil::date(2025, 1, 1));
}

#[test]
fn test_minimum_only_ignores_rollover() {
    let debts = vec![
        loan(0, dec!(100), dec!(0), dec!(100)),
        loan(1, dec!(1000), dec!(0), dec!(100)),
    ];
    let result = simulate_minimum_only(&debts, &config().with_rollover(true)).unwrap();
    assert_eq!(result.payoff_months, 10);
    assert_eq!(result.extra_payment.amount(), Decimal::ZERO);
}

/// Results and errors are plain data that survive a JSON round trip
#[test]
fn test_result_and_error_serialize() {
    let debts = vec![
        card(0, dec!(5000), dec!(20), dec!(100)),
        card(1, dec!(1000), dec!(5), dec!(50)),
    ];
    let result = simulate(&debts, Strategy::Snowball, usd(dec!(200)), &config()).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let back: PayoffResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["payoff_months"], result.payoff_months);
    assert_eq!(value["schedule"][0]["month_index"], 1);

    let err = simulate(
        &[card(0, dec!(10000), dec!(30), dec!(50))],
        Strategy::Avalanche,
        usd(dec!(0)),
        &config(),
    )
    .unwrap_err();
    let back: EngineError = serde_json::from_str(&serde_json::to_string(&err).unwrap()).unwrap();
    assert_eq!(back, err);
}
