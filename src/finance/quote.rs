//! Customer financing quotes.

use serde::{Deserialize, Serialize};

use super::amortization::{AmortizationSchedule, LoanTerms, PaymentScheduleEntry};
use super::{ensure_finite, round_to_cents, FinanceError, FinanceResult};

/// What the customer enters in the financing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    /// Total project price
    pub total_amount: f64,
    /// Paid up front
    pub down_payment: f64,
    /// Nominal annual rate in percent
    pub interest_rate: f64,
    /// Term in months
    pub loan_term_months: u32,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            total_amount: 15_000.0,
            down_payment: 3_000.0,
            interest_rate: 8.5,
            loan_term_months: 24,
        }
    }
}

/// A computed financing offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceQuote {
    /// Total project price
    pub total_amount: f64,
    /// Paid up front
    pub down_payment: f64,
    /// `total_amount - down_payment`
    pub financing_amount: f64,
    /// Nominal annual rate in percent
    pub interest_rate: f64,
    /// Term in months
    pub loan_term_months: u32,
    /// Fixed monthly payment
    pub monthly_payment: f64,
    /// Interest over the whole term
    pub total_interest: f64,
    /// Project price plus interest
    pub total_cost: f64,
    /// Month-by-month schedule of the financed part
    pub payment_schedule: Vec<PaymentScheduleEntry>,
}

impl FinanceQuote {
    /// Computes a quote.
    ///
    /// Fails with [`FinanceError::NothingToFinance`] when the down payment
    /// covers the total amount.
    pub fn compute(request: QuoteRequest) -> FinanceResult<Self> {
        ensure_finite("total amount", request.total_amount)?;
        ensure_finite("down payment", request.down_payment)?;
        if request.total_amount < 0.0 || request.down_payment < 0.0 {
            return Err(FinanceError::invalid(
                "total amount and down payment cannot be negative",
            ));
        }

        let financing_amount = request.total_amount - request.down_payment;
        if financing_amount <= 0.0 {
            return Err(FinanceError::NothingToFinance {
                total_amount: request.total_amount,
                down_payment: request.down_payment,
            });
        }

        let schedule = AmortizationSchedule::compute(LoanTerms::new(
            financing_amount,
            request.interest_rate,
            request.loan_term_months,
        )?)?;

        Ok(Self {
            total_amount: request.total_amount,
            down_payment: request.down_payment,
            financing_amount,
            interest_rate: request.interest_rate,
            loan_term_months: request.loan_term_months,
            monthly_payment: schedule.monthly_payment,
            total_interest: schedule.total_interest,
            total_cost: round_to_cents(request.total_amount + schedule.total_interest),
            payment_schedule: schedule.entries,
        })
    }
}
