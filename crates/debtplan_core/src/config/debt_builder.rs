//! Debt Builder DSL
//!
//! Provides a fluent API for creating debt accounts with preset types.
//!
//! # Examples
//!
//! ```ignore
//! use debtplan_core::config::DebtBuilder;
//! use rust_decimal_macros::dec;
//!
//! let card = DebtBuilder::credit_card("Visa")
//!     .balance(dec!(5_000))
//!     .apr(dec!(19.99))
//!     .minimum_payment(dec!(150))
//!     .credit_limit(dec!(10_000))
//!     .build();
//! ```
//!
//! Amounts are not validated here; the engine rejects negative balances,
//! rates and minimums before it simulates.

use jiff::Timestamp;
use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::model::{Currency, DebtAccount, DebtId, DebtType, Money, Percentage};

/// Builder for creating debt accounts with a fluent API
#[derive(Debug, Clone)]
pub struct DebtBuilder {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) id: Option<DebtId>,
    pub(crate) currency: Option<Currency>,
    debt_type: DebtType,
    balance: Decimal,
    apr: Decimal,
    minimum_payment: Decimal,
    credit_limit: Option<Decimal>,
    due_date: Option<Date>,
    last_payment: Option<(Date, Decimal)>,
    created_at: Timestamp,
}

impl DebtBuilder {
    /// Start a debt of any type
    #[must_use]
    pub fn new(name: impl Into<String>, debt_type: DebtType) -> Self {
        Self {
            name: name.into(),
            description: None,
            id: None,
            currency: None,
            debt_type,
            balance: Decimal::ZERO,
            apr: Decimal::ZERO,
            minimum_payment: Decimal::ZERO,
            credit_limit: None,
            due_date: None,
            last_payment: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    // =========================================================================
    // Preset Debt Type Constructors
    // =========================================================================

    /// Revolving credit card balance
    #[must_use]
    pub fn credit_card(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::CreditCard)
    }

    #[must_use]
    pub fn student_loan(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::StudentLoan)
    }

    #[must_use]
    pub fn mortgage(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::Mortgage)
    }

    #[must_use]
    pub fn auto_loan(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::AutoLoan)
    }

    #[must_use]
    pub fn personal_loan(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::PersonalLoan)
    }

    #[must_use]
    pub fn home_equity_loan(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::HomeEquityLoan)
    }

    #[must_use]
    pub fn medical_debt(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::MedicalDebt)
    }

    #[must_use]
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, DebtType::Other)
    }

    // =========================================================================
    // Terms
    // =========================================================================

    #[must_use]
    pub fn id(mut self, id: DebtId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    #[must_use]
    pub fn balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    /// Annual percentage rate in percentage points (`19.99` for 19.99%)
    #[must_use]
    pub fn apr(mut self, apr: Decimal) -> Self {
        self.apr = apr;
        self
    }

    #[must_use]
    pub fn minimum_payment(mut self, minimum_payment: Decimal) -> Self {
        self.minimum_payment = minimum_payment;
        self
    }

    #[must_use]
    pub fn credit_limit(mut self, limit: Decimal) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn due_date(mut self, year: i16, month: i8, day: i8) -> Self {
        self.due_date = Some(jiff::civil::date(year, month, day));
        self
    }

    #[must_use]
    pub fn last_payment(mut self, date: Date, amount: Decimal) -> Self {
        self.last_payment = Some((date, amount));
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the account, defaulting to `DebtId(0)` and USD when unset
    #[must_use]
    pub fn build(self) -> DebtAccount {
        let currency = self.currency.unwrap_or_default();
        DebtAccount {
            id: self.id.unwrap_or(DebtId(0)),
            name: self.name,
            debt_type: self.debt_type,
            balance: Money::new(self.balance, currency),
            interest_rate: Percentage::from_raw(self.apr),
            minimum_payment: Money::new(self.minimum_payment, currency),
            credit_limit: self.credit_limit.map(|l| Money::new(l, currency)),
            due_date: self.due_date,
            last_payment_date: self.last_payment.map(|(d, _)| d),
            last_payment_amount: self.last_payment.map(|(_, a)| Money::new(a, currency)),
            created_at: self.created_at,
        }
    }
}
