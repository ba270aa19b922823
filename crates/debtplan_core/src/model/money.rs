//! Exact decimal money and rate primitives
//!
//! Amounts are `rust_decimal::Decimal` end to end; nothing in the engine
//! converts through binary floating point. Amounts are stored at four
//! fractional digits and displayed at two.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, MoneyError};

/// Fractional digits kept for stored amounts
pub const STORAGE_SCALE: u32 = 4;
/// Fractional digits shown to users
pub const DISPLAY_SCALE: u32 = 2;

/// Round a computed figure to the storage scale (banker's rounding).
///
/// Called once per computed figure, never mid-expression.
#[inline]
pub fn round_storage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STORAGE_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Supported ISO 4217 currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    JPY,
    CHF,
    CNY,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CNY => "CNY",
        };
        f.write_str(code)
    }
}

/// A decimal amount tagged with its currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create an amount, rounded to the storage scale
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: round_storage(amount),
            currency,
        }
    }

    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Amount rounded to the display scale
    #[must_use]
    pub fn display_amount(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, self.currency))
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, self.currency))
    }

    /// Multiply by a decimal factor, rounding the product once
    #[must_use]
    pub fn scale(&self, factor: Decimal) -> Money {
        Money::new(self.amount * factor, self.currency)
    }

    pub fn checked_div(&self, divisor: Decimal) -> Result<Money, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Money::new(self.amount / divisor, self.currency))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                actual: other.currency,
            })
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.display_amount())
    }
}

/// An annual percentage rate, e.g. `18.99` means 18.99% per year
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    /// Create a percentage, rejecting negative values
    pub fn new(value: Decimal) -> Result<Self, InputError> {
        if value < Decimal::ZERO {
            return Err(InputError::NegativePercentage(value));
        }
        Ok(Self(value))
    }

    /// Wrap a value without the sign check; the engine validates it later
    pub(crate) fn from_raw(value: Decimal) -> Self {
        Self(value)
    }

    /// Percentage points, e.g. `18.99`
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Fraction form, e.g. `0.1899`
    #[must_use]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    /// Periodic monthly rate as a fraction (annual / 100 / 12), unrounded
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        self.0 / dec!(1200)
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}
