//! Side-by-side financing packages derived from a base quote.

use serde::{Deserialize, Serialize};

use super::amortization::{monthly_payment, total_interest};
use super::quote::FinanceQuote;
use super::{round_to_cents, FinanceResult};
use crate::constants::{MAX_COMPARISON_TERM_MONTHS, PREMIUM_RATE_FLOOR};

/// One financing package in the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceOption {
    /// Package name
    pub name: String,
    /// One-line pitch
    pub description: String,
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
    /// Suggested down payment
    pub down_payment: f64,
    /// Selling points
    pub features: Vec<String>,
    /// Highlighted package
    #[serde(default)]
    pub recommended: bool,
}

struct Package {
    name: &'static str,
    description: &'static str,
    features: &'static [&'static str],
    recommended: bool,
}

const STANDARD: Package = Package {
    name: "Standard Financing",
    description: "Our standard financing option with competitive rates",
    features: &["Flexible terms", "No prepayment penalty", "Quick approval"],
    recommended: false,
};

const EXTENDED: Package = Package {
    name: "Extended Terms",
    description: "Lower monthly payments with extended repayment period",
    features: &["Lower monthly payments", "Extended terms", "Same approval process"],
    recommended: false,
};

const PREMIUM: Package = Package {
    name: "Premium Package",
    description: "Best rates for qualified customers with larger down payments",
    features: &[
        "Lowest interest rates",
        "Priority support",
        "Flexible payment options",
        "Early payoff benefits",
    ],
    recommended: true,
};

const QUICK: Package = Package {
    name: "Quick Approval",
    description: "Fast approval with slightly higher rates for immediate financing",
    features: &["Same-day approval", "Minimal documentation", "Quick funding"],
    recommended: false,
};

/// Builds the four packages offered next to `base`.
///
/// - Standard: the base quote as is
/// - Extended: rate + 1.5, term + 12 months capped at 60
/// - Premium: rate − 2 with a 4.9 % floor; suggests a larger down payment
///   (`max(down × 1.5, total × 0.3)`) but prices the same financed amount
/// - Quick approval: rate + 3
pub fn compare(base: &FinanceQuote) -> FinanceResult<Vec<FinanceOption>> {
    let standard = FinanceOption {
        name: STANDARD.name.to_string(),
        description: STANDARD.description.to_string(),
        interest_rate: base.interest_rate,
        loan_term_months: base.loan_term_months,
        monthly_payment: base.monthly_payment,
        total_interest: base.total_interest,
        total_cost: base.total_cost,
        down_payment: base.down_payment,
        features: to_strings(STANDARD.features),
        recommended: STANDARD.recommended,
    };

    let extended_term = (base.loan_term_months + 12).min(MAX_COMPARISON_TERM_MONTHS);
    let premium_down = (base.down_payment * 1.5).max(base.total_amount * 0.3);

    Ok(vec![
        standard,
        priced(base, &EXTENDED, base.interest_rate + 1.5, extended_term, base.down_payment)?,
        priced(
            base,
            &PREMIUM,
            (base.interest_rate - 2.0).max(PREMIUM_RATE_FLOOR),
            base.loan_term_months,
            premium_down,
        )?,
        priced(base, &QUICK, base.interest_rate + 3.0, base.loan_term_months, base.down_payment)?,
    ])
}

fn priced(
    base: &FinanceQuote,
    package: &Package,
    rate: f64,
    months: u32,
    down_payment: f64,
) -> FinanceResult<FinanceOption> {
    let payment = monthly_payment(base.financing_amount, rate, months)?;
    let interest = total_interest(payment, months, base.financing_amount)?;

    Ok(FinanceOption {
        name: package.name.to_string(),
        description: package.description.to_string(),
        interest_rate: rate,
        loan_term_months: months,
        monthly_payment: payment,
        total_interest: interest,
        total_cost: round_to_cents(base.total_amount + interest),
        down_payment,
        features: to_strings(package.features),
        recommended: package.recommended,
    })
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
