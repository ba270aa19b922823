//! Tests for the Builder DSL
//!
//! These tests demonstrate and verify the fluent builder API for creating plans.

use rust_decimal_macros::dec;

use crate::config::{DebtBuilder, PlanBuilder};
use crate::model::{Currency, DebtId, DebtType, Money, Strategy};
use crate::simulation::simulate;

/// Test basic PlanBuilder usage
#[test]
fn test_plan_builder_basic() {
    let (debts, config, metadata) = PlanBuilder::new()
        .start(2025, 1, 1)
        .max_months(360)
        .rollover_freed_minimums(true)
        .build();

    assert!(debts.is_empty());
    assert_eq!(config.start_date, Some(jiff::civil::date(2025, 1, 1)));
    assert_eq!(config.max_months, 360);
    assert!(config.rollover_freed_minimums);
    assert!(config.custom_weights.is_none());
    assert!(metadata.debts.is_empty());
}

/// Test sequential IDs and name lookups
#[test]
fn test_debt_ids_and_metadata() {
    let (debts, _config, metadata) = PlanBuilder::new()
        .debt(
            DebtBuilder::credit_card("Visa")
                .description("Everyday card")
                .balance(dec!(2500))
                .apr(dec!(21.99))
                .minimum_payment(dec!(75)),
        )
        .debt(
            DebtBuilder::auto_loan("Car")
                .balance(dec!(14000))
                .apr(dec!(6.9))
                .minimum_payment(dec!(310)),
        )
        .credit_card("Store Card", dec!(600), dec!(27.99), dec!(35))
        .build();

    assert_eq!(debts.len(), 3);
    assert_eq!(metadata.debt_id("Visa"), Some(DebtId(0)));
    assert_eq!(metadata.debt_id("Car"), Some(DebtId(1)));
    assert_eq!(metadata.debt_id("Store Card"), Some(DebtId(2)));
    assert_eq!(metadata.debt_name(DebtId(1)), Some("Car"));
    assert_eq!(
        metadata.debts[&DebtId(0)].description.as_deref(),
        Some("Everyday card")
    );
    assert_eq!(debts[1].debt_type, DebtType::AutoLoan);
}

/// Plan currency applies unless a debt sets its own
#[test]
fn test_plan_currency() {
    let (debts, _config, _metadata) = PlanBuilder::new()
        .currency(Currency::GBP)
        .debt(DebtBuilder::credit_card("Barclaycard").balance(dec!(900)))
        .debt(
            DebtBuilder::personal_loan("Euro loan")
                .currency(Currency::EUR)
                .balance(dec!(900)),
        )
        .build();

    assert_eq!(debts[0].currency(), Currency::GBP);
    assert_eq!(debts[1].currency(), Currency::EUR);
}

/// Weights resolve by name and drive the custom strategy
#[test]
fn test_custom_weights_by_name() {
    let (debts, config, metadata) = PlanBuilder::new()
        .start(2025, 1, 1)
        .credit_card("High", dec!(5000), dec!(20), dec!(100))
        .credit_card("Low", dec!(1000), dec!(5), dec!(50))
        .weight("Low", dec!(10))
        .weight("Missing", dec!(99))
        .build();

    let weights = config.custom_weights.as_ref().unwrap();
    assert_eq!(weights.weight(metadata.debt_id("Low").unwrap()), dec!(10));
    assert_eq!(weights.weights.len(), 1);

    let extra = Money::new(dec!(200), Currency::USD);
    let result = simulate(&debts, Strategy::Custom, extra, &config).unwrap();
    assert_eq!(result.debt_payoffs[0].name, "Low");
}
