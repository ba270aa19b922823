//! Tests for payoff milestones

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{loan, usd};
use crate::config::SimulationConfig;
use crate::error::{EngineError, InputError};
use crate::milestones::{
    DEFAULT_THRESHOLDS, debt_payoffs, default_milestones, milestones, motivation_boost,
};
use crate::model::{DebtId, Schedule, Strategy};
use crate::simulation::simulate;

fn config() -> SimulationConfig {
    SimulationConfig::default().with_start_date(jiff::civil::date(2025, 1, 1))
}

#[test]
fn test_default_thresholds_on_linear_payoff() {
    let debts = vec![loan(0, dec!(1200), dec!(0), dec!(100))];
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap();
    let found = default_milestones(&result).unwrap();

    let months: Vec<_> = found.iter().map(|m| m.month_index).collect();
    assert_eq!(months, vec![3, 6, 9, 11, 12]);
    assert!(found.iter().all(|m| m.reached));

    assert_eq!(found[0].percentage, dec!(25));
    assert_eq!(found[0].target_remaining_balance.amount(), dec!(900));
    assert_eq!(found[0].date, jiff::civil::date(2025, 4, 1));
    assert_eq!(found[4].target_remaining_balance.amount(), Decimal::ZERO);
}

#[test]
fn test_unreached_threshold_reports_final_month() {
    let debts = vec![loan(0, dec!(1200), dec!(0), dec!(100))];
    let result = simulate(&debts, Strategy::Avalanche, usd(dec!(0)), &config()).unwrap();

    // Only the first half year, so the balance never reaches zero
    let partial = Schedule::from_entries(result.schedule.entries()[..6].to_vec());
    let found = milestones(&partial, usd(dec!(1200)), &[dec!(50), dec!(100)]).unwrap();

    assert_eq!(found[0].month_index, 6);
    assert!(found[0].reached);
    assert_eq!(found[1].month_index, 6);
    assert!(!found[1].reached);
}

#[test]
fn test_invalid_threshold() {
    let err = milestones(&Schedule::default(), usd(dec!(100)), &[dec!(50), dec!(101)]).unwrap_err();
    assert_eq!(err, EngineError::InvalidInput(InputError::InvalidThreshold(dec!(101))));
}

#[test]
fn test_empty_schedule_has_no_milestones() {
    let found = milestones(&Schedule::default(), usd(dec!(0)), &DEFAULT_THRESHOLDS).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_debt_payoffs_follow_schedule() {
    let debts = vec![
        loan(0, dec!(1000), dec!(0), dec!(100)),
        loan(1, dec!(200), dec!(0), dec!(100)),
    ];
    let result = simulate(&debts, Strategy::Snowball, usd(dec!(0)), &config()).unwrap();
    let payoffs = debt_payoffs(&result.schedule);

    assert_eq!(payoffs.len(), 2);
    assert_eq!(payoffs[0].debt_id, DebtId(1));
    assert_eq!(payoffs[0].month_index, 2);
    assert_eq!(payoffs[1].debt_id, DebtId(0));
    assert_eq!(payoffs[1].month_index, 10);
    assert_eq!(payoffs[1].date, jiff::civil::date(2025, 11, 1));

    assert_eq!(payoffs[0].motivation_boost, dec!(10));
    assert_eq!(payoffs[1].motivation_boost, dec!(7.5));
}

#[test]
fn test_motivation_boost_fades_with_time() {
    assert_eq!(motivation_boost(1), dec!(10));
    assert_eq!(motivation_boost(6), dec!(10));
    assert_eq!(motivation_boost(7), dec!(7.5));
    assert_eq!(motivation_boost(12), dec!(7.5));
    assert_eq!(motivation_boost(24), dec!(5));
    assert_eq!(motivation_boost(25), dec!(2.5));
    assert_eq!(motivation_boost(360), dec!(2.5));
}
