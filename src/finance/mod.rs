//! Financing calculations.
//!
//! Pure functions over plain numbers: the amortization engine, customer
//! quotes built on top of it, the comparison of financing packages, and
//! affordability ratios. Currency values are `f64` rounded to cents at the
//! points where the figures are presented.

pub mod amortization;
pub mod comparison;
pub mod quote;
pub mod ratios;

use thiserror::Error;

pub use amortization::{
    monthly_payment, payment_schedule, total_interest, AmortizationSchedule, LoanTerms,
    PaymentScheduleEntry,
};
pub use comparison::{compare, FinanceOption};
pub use quote::{FinanceQuote, QuoteRequest};
pub use ratios::{affordability, debt_to_income, loan_to_value, Affordability};

/// Rejected financing input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FinanceError {
    /// Input outside the domain of the formulas (zero term, non-positive
    /// principal, negative rate, non-finite number).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The down payment covers the whole amount.
    #[error("nothing to finance: down payment {down_payment} covers total amount {total_amount}")]
    NothingToFinance {
        /// Total project amount
        total_amount: f64,
        /// Down payment
        down_payment: f64,
    },
}

impl FinanceError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FinanceError::InvalidArgument(message.into())
    }
}

/// Result alias for financing calculations.
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Rounds to two decimals, half away from zero.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fails unless `value` is finite.
pub(crate) fn ensure_finite(name: &str, value: f64) -> FinanceResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FinanceError::invalid(format!("{name} must be a finite number, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(454.556_748), 454.56);
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(625.0), 625.0);
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("rate", 1.0).is_ok());
        assert!(ensure_finite("rate", f64::NAN).is_err());
        assert!(ensure_finite("rate", f64::INFINITY).is_err());
    }
}
