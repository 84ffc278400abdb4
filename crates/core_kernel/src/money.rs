//! Money in integer minor currency units
//!
//! All monetary arithmetic in the platform happens on `i64` cent values.
//! `Decimal` appears only at the storage and display boundaries: persisted
//! booking aggregates come in as decimals and are converted once, and
//! formatted strings go out at render time.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
///
/// Every supported currency uses two minor-unit decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    USD,
    CAD,
    EUR,
    GBP,
    AUD,
}

/// Minor units per major unit, uniform across supported currencies.
pub const MINOR_PER_MAJOR: i64 = 100;

impl Currency {
    /// Returns the currency symbol used in rendered documents
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::CAD => "C$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::AUD => "A$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::CAD => "CAD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AUD => "AUD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount held as integer minor units with its currency
///
/// Construction from a decimal rounds half-up (midpoint away from zero) to
/// whole cents; every operation afterwards is exact integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
    currency: Currency,
}

impl Money {
    /// Creates Money from an integer count of minor units (cents)
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Creates Money from a whole number of major units
    pub fn from_major(units: i64, currency: Currency) -> Self {
        Self {
            cents: units.saturating_mul(MINOR_PER_MAJOR),
            currency,
        }
    }

    /// Converts a decimal amount to cents, rounding half-up
    ///
    /// This is the only inbound conversion from persisted decimal values.
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let scaled = (amount * Decimal::from(MINOR_PER_MAJOR))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let cents = scaled.to_i64().ok_or(MoneyError::Overflow)?;
        Ok(Self { cents, currency })
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self { cents: 0, currency }
    }

    /// Returns the amount in minor units
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Converts back to a two-decimal-place value for the output boundary
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            cents: self.cents.saturating_abs(),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        let cents = self.cents.checked_add(other.cents).ok_or(MoneyError::Overflow)?;
        Ok(Self { cents, currency: self.currency })
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        let cents = self.cents.checked_sub(other.cents).ok_or(MoneyError::Overflow)?;
        Ok(Self { cents, currency: self.currency })
    }

    /// Multiplies by an integer count (rate-per-day times day count)
    pub fn times(&self, count: u32) -> Self {
        Self {
            cents: self.cents.saturating_mul(i64::from(count)),
            currency: self.currency,
        }
    }

    /// Formats the amount with its three-letter currency code appended
    ///
    /// Used on grand-total lines: `$123.45 USD`.
    pub fn format_with_code(&self) -> String {
        format!("{} {}", self, self.currency.code())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.saturating_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / MINOR_PER_MAJOR,
            abs % MINOR_PER_MAJOR
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            cents: self.cents.saturating_neg(),
            currency: self.currency,
        }
    }
}

/// A percentage rate applied to money amounts (e.g. a tax rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.07 for 7%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.07 for 7%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 7.0 for 7%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / Decimal::ONE_HUNDRED,
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * Decimal::ONE_HUNDRED
    }

    /// Applies this rate to an amount, rounding half-up to whole cents
    pub fn apply(&self, money: &Money) -> Money {
        let cents = (Decimal::from(money.cents()) * self.value)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX);
        Money::from_cents(cents, money.currency())
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(2))
    }
}
