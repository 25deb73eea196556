//! Lending ratios and affordability.

use serde::{Deserialize, Serialize};

use super::{ensure_finite, round_to_cents, FinanceError, FinanceResult};

/// Loan-to-value ratio in percent, rounded to cents.
pub fn loan_to_value(loan_amount: f64, property_value: f64) -> FinanceResult<f64> {
    ensure_finite("loan amount", loan_amount)?;
    ensure_finite("property value", property_value)?;
    if property_value <= 0.0 {
        return Err(FinanceError::invalid("property value must be greater than 0"));
    }
    Ok(round_to_cents(loan_amount / property_value * 100.0))
}

/// Debt-to-income ratio in percent, rounded to cents.
pub fn debt_to_income(monthly_debt_payments: f64, monthly_income: f64) -> FinanceResult<f64> {
    ensure_finite("monthly debt payments", monthly_debt_payments)?;
    ensure_finite("monthly income", monthly_income)?;
    if monthly_income <= 0.0 {
        return Err(FinanceError::invalid("monthly income must be greater than 0"));
    }
    Ok(round_to_cents(monthly_debt_payments / monthly_income * 100.0))
}

/// What a customer can afford, rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    /// Largest loan whose payment fits the income limit
    pub max_loan_amount: f64,
    /// Largest loan plus the down payment
    pub max_home_price: f64,
    /// Income share available for the payment
    pub monthly_payment: f64,
}

/// Largest loan and purchase price a monthly income supports.
///
/// The payment budget is `monthly_income × max_dti`; the loan is the present
/// value of that payment over the term.
pub fn affordability(
    monthly_income: f64,
    down_payment: f64,
    annual_rate_percent: f64,
    term_months: u32,
    max_dti: f64,
) -> FinanceResult<Affordability> {
    for (name, value) in [
        ("monthly income", monthly_income),
        ("down payment", down_payment),
        ("annual rate", annual_rate_percent),
        ("max DTI", max_dti),
    ] {
        ensure_finite(name, value)?;
    }
    if monthly_income <= 0.0 {
        return Err(FinanceError::invalid("monthly income must be greater than 0"));
    }
    if down_payment < 0.0 {
        return Err(FinanceError::invalid("down payment cannot be negative"));
    }
    if annual_rate_percent < 0.0 {
        return Err(FinanceError::invalid("annual rate cannot be negative"));
    }
    if term_months == 0 {
        return Err(FinanceError::invalid("term must be at least 1 month"));
    }
    if max_dti <= 0.0 || max_dti > 1.0 {
        return Err(FinanceError::invalid(format!(
            "max DTI must be in (0, 1], got {max_dti}"
        )));
    }

    let budget = monthly_income * max_dti;
    let months = f64::from(term_months);
    let max_loan = if annual_rate_percent == 0.0 {
        budget * months
    } else {
        let rate = annual_rate_percent / 100.0 / 12.0;
        budget * -(-months * rate.ln_1p()).exp_m1() / rate
    };
    ensure_finite("max loan amount", max_loan)?;
    ensure_finite("max home price", max_loan + down_payment)?;

    Ok(Affordability {
        max_loan_amount: max_loan.round(),
        max_home_price: (max_loan + down_payment).round(),
        monthly_payment: budget.round(),
    })
}
