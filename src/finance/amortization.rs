//! Fixed-payment loan amortization.

use serde::{Deserialize, Serialize};

use super::{ensure_finite, round_to_cents, FinanceError, FinanceResult};

/// Loan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Amount borrowed, > 0
    pub principal: f64,
    /// Nominal annual interest rate in percent (8.5 means 8.5 %), >= 0
    pub annual_rate_percent: f64,
    /// Number of monthly payments, >= 1
    pub term_months: u32,
}

impl LoanTerms {
    /// Creates validated loan terms.
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> FinanceResult<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Rejects inputs the formulas are not defined for.
    pub fn validate(&self) -> FinanceResult<()> {
        ensure_finite("principal", self.principal)?;
        ensure_finite("annual rate", self.annual_rate_percent)?;
        if self.principal <= 0.0 {
            return Err(FinanceError::invalid(format!(
                "principal must be greater than 0, got {}",
                self.principal
            )));
        }
        if self.annual_rate_percent < 0.0 {
            return Err(FinanceError::invalid(format!(
                "annual rate cannot be negative, got {}",
                self.annual_rate_percent
            )));
        }
        if self.term_months == 0 {
            return Err(FinanceError::invalid("term must be at least 1 month"));
        }
        Ok(())
    }

    /// Periodic (monthly) rate as a fraction.
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }
}

/// One row of a payment schedule. All amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleEntry {
    /// 1-based month number
    pub month: u32,
    /// Payment made this month
    pub payment: f64,
    /// Principal part of the payment
    pub principal: f64,
    /// Interest part of the payment
    pub interest: f64,
    /// Balance left after this payment, never negative
    pub remaining_balance: f64,
}

/// Fixed monthly payment, rounded to cents.
///
/// A zero rate pays the principal off in equal parts. Otherwise the
/// standard annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)` is used with
/// `r = rate / 100 / 12`.
///
/// # Examples
///
/// ```
/// use kitchenplan::finance::monthly_payment;
///
/// assert_eq!(monthly_payment(15_000.0, 0.0, 24).unwrap(), 625.0);
/// assert_eq!(monthly_payment(10_000.0, 8.5, 24).unwrap(), 454.56);
/// assert!(monthly_payment(10_000.0, 8.5, 0).is_err());
/// ```
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, months: u32) -> FinanceResult<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent, months)?;
    rounded_payment(&terms)
}

/// Rounded payment for validated terms; fails instead of returning a
/// non-finite figure.
fn rounded_payment(terms: &LoanTerms) -> FinanceResult<f64> {
    let payment = round_to_cents(raw_payment(terms));
    ensure_finite("monthly payment", payment)?;
    ensure_finite("principal", round_to_cents(terms.principal))?;
    Ok(payment)
}

fn raw_payment(terms: &LoanTerms) -> f64 {
    let months = f64::from(terms.term_months);
    if terms.annual_rate_percent == 0.0 {
        return terms.principal / months;
    }

    // P·r / (1 − (1+r)^−n), with exp_m1/ln_1p so tiny rates and long terms stay finite
    let rate = terms.monthly_rate();
    let discount = -(-months * rate.ln_1p()).exp_m1();
    terms.principal * rate / discount
}

/// Total interest implied by a (rounded) monthly payment, rounded to cents.
///
/// This is `payment × months − principal`. Because the payment is already
/// rounded, the figure can differ by a few cents from the sum of the
/// schedule's interest column; see [`AmortizationSchedule::scheduled_interest`].
pub fn total_interest(monthly_payment: f64, months: u32, principal: f64) -> FinanceResult<f64> {
    ensure_finite("monthly payment", monthly_payment)?;
    ensure_finite("principal", principal)?;
    if months == 0 {
        return Err(FinanceError::invalid("term must be at least 1 month"));
    }
    if principal <= 0.0 {
        return Err(FinanceError::invalid(format!(
            "principal must be greater than 0, got {principal}"
        )));
    }
    if monthly_payment < 0.0 {
        return Err(FinanceError::invalid(format!(
            "monthly payment cannot be negative, got {monthly_payment}"
        )));
    }
    let interest = round_to_cents(monthly_payment * f64::from(months) - principal);
    ensure_finite("total interest", interest)?;
    Ok(interest)
}

/// Month-by-month split of each payment into principal and interest.
///
/// The running balance is carried unrounded; each emitted row is rounded to
/// cents. The balance is clamped at zero so rounding drift in the last
/// month never produces a negative balance.
pub fn payment_schedule(
    principal: f64,
    annual_rate_percent: f64,
    months: u32,
) -> FinanceResult<Vec<PaymentScheduleEntry>> {
    let terms = LoanTerms::new(principal, annual_rate_percent, months)?;
    Ok(build_schedule(&terms, rounded_payment(&terms)?))
}

fn build_schedule(terms: &LoanTerms, payment: f64) -> Vec<PaymentScheduleEntry> {
    let rate = terms.monthly_rate();
    let mut balance = terms.principal;

    (1..=terms.term_months)
        .map(|month| {
            let interest = balance * rate;
            let principal_part = payment - interest;
            balance = (balance - principal_part).max(0.0);

            PaymentScheduleEntry {
                month,
                payment: round_to_cents(payment),
                principal: round_to_cents(principal_part),
                interest: round_to_cents(interest),
                remaining_balance: round_to_cents(balance),
            }
        })
        .collect()
}

/// Complete amortization of a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    /// Input terms
    pub terms: LoanTerms,
    /// Fixed monthly payment
    pub monthly_payment: f64,
    /// Interest derived from the rounded payment
    pub total_interest: f64,
    /// Principal plus total interest
    pub total_cost: f64,
    /// One entry per month
    pub entries: Vec<PaymentScheduleEntry>,
}

impl AmortizationSchedule {
    /// Computes payment, totals and schedule for `terms`.
    pub fn compute(terms: LoanTerms) -> FinanceResult<Self> {
        terms.validate()?;
        let payment = rounded_payment(&terms)?;
        let interest = total_interest(payment, terms.term_months, terms.principal)?;

        Ok(Self {
            terms,
            monthly_payment: payment,
            total_interest: interest,
            total_cost: round_to_cents(terms.principal + interest),
            entries: build_schedule(&terms, payment),
        })
    }

    /// Sum of the schedule's interest column, rounded to cents.
    pub fn scheduled_interest(&self) -> f64 {
        round_to_cents(self.entries.iter().map(|e| e.interest).sum())
    }

    /// Sum of the schedule's principal column, rounded to cents.
    pub fn scheduled_principal(&self) -> f64 {
        round_to_cents(self.entries.iter().map(|e| e.principal).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = monthly_payment(15_000.0, 0.0, 24).unwrap();
        assert_eq!(payment, 625.0);
        assert_eq!(total_interest(payment, 24, 15_000.0).unwrap(), 0.0);

        let schedule = payment_schedule(15_000.0, 0.0, 24).unwrap();
        assert!(schedule.iter().all(|e| e.interest == 0.0 && e.principal == 625.0));
        assert_eq!(schedule[23].remaining_balance, 0.0);
    }

    #[test]
    fn test_zero_rate_rounds_to_cents() {
        assert_eq!(monthly_payment(1_000.0, 0.0, 3).unwrap(), 333.33);
    }

    #[test]
    fn test_standard_loan_payment() {
        assert_eq!(monthly_payment(10_000.0, 8.5, 24).unwrap(), 454.56);
        assert_eq!(monthly_payment(10_000.0, 10.0, 36).unwrap(), 322.67);
        assert_eq!(monthly_payment(12_000.0, 8.5, 24).unwrap(), 545.47);
    }

    #[test]
    fn test_total_interest_uses_rounded_payment() {
        assert_eq!(total_interest(454.56, 24, 10_000.0).unwrap(), 909.44);
        assert_eq!(total_interest(322.67, 36, 10_000.0).unwrap(), 1616.12);
    }

    #[test]
    fn test_schedule_shape() {
        let schedule = payment_schedule(10_000.0, 8.5, 24).unwrap();
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule[0].month, 1);
        assert_eq!(schedule[23].month, 24);
        assert_eq!(schedule[23].remaining_balance, 0.0);
        assert!(schedule.iter().all(|e| e.payment == 454.56));

        // First month: interest on the full balance
        assert_eq!(schedule[0].interest, 70.83);
        assert_eq!(schedule[0].principal, 383.73);
    }

    #[test]
    fn test_schedule_principal_sums_to_loan() {
        let schedule = payment_schedule(10_000.0, 8.5, 24).unwrap();
        let principal: f64 = schedule.iter().map(|e| e.principal).sum();
        assert!(close(principal, 10_000.0, 0.25), "principal sum {principal}");
    }

    #[test]
    fn test_balances_non_increasing_for_many_terms() {
        for (principal, rate, months) in [
            (500.0, 3.0, 1),
            (10_000.0, 8.5, 24),
            (25_000.0, 14.9, 60),
            (7_500.0, 0.0, 7),
            (1.0, 29.9, 12),
        ] {
            let schedule = payment_schedule(principal, rate, months).unwrap();
            assert_eq!(schedule.len(), months as usize);
            for pair in schedule.windows(2) {
                assert!(
                    pair[1].remaining_balance <= pair[0].remaining_balance,
                    "balance increased for {principal}/{rate}/{months}"
                );
            }
            assert!(schedule.iter().all(|e| e.remaining_balance >= 0.0));
            assert!(close(schedule[schedule.len() - 1].remaining_balance, 0.0, 0.05));
        }
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        assert!(matches!(
            monthly_payment(10_000.0, 5.0, 0),
            Err(FinanceError::InvalidArgument(_))
        ));
        assert!(monthly_payment(0.0, 5.0, 12).is_err());
        assert!(monthly_payment(-100.0, 5.0, 12).is_err());
        assert!(monthly_payment(100.0, -1.0, 12).is_err());
        assert!(monthly_payment(f64::NAN, 5.0, 12).is_err());
        assert!(monthly_payment(100.0, f64::INFINITY, 12).is_err());
        assert!(payment_schedule(100.0, 5.0, 0).is_err());
        assert!(total_interest(100.0, 0, 1_000.0).is_err());
        assert!(total_interest(f64::NAN, 12, 1_000.0).is_err());
    }

    #[test]
    fn test_tiny_rate_matches_straight_line() {
        let payment = monthly_payment(10_000.0, 1e-14, 24).unwrap();
        assert!(payment.is_finite());
        assert_eq!(payment, 416.67);

        let schedule = payment_schedule(10_000.0, 1e-14, 24).unwrap();
        assert!(schedule
            .iter()
            .all(|e| e.payment.is_finite() && e.principal.is_finite() && e.interest.is_finite()));
    }

    #[test]
    fn test_very_long_term_stays_finite() {
        // Payment approaches interest-only: 10 000 × 30 % / 12
        let payment = monthly_payment(10_000.0, 30.0, 100_000).unwrap();
        assert!(payment.is_finite());
        assert_eq!(payment, 250.0);

        let schedule = AmortizationSchedule::compute(LoanTerms::new(10_000.0, 30.0, 100_000).unwrap())
            .unwrap();
        assert!(schedule.total_interest.is_finite());
        assert!(schedule.entries.iter().all(|e| e.remaining_balance.is_finite()));
    }

    #[test]
    fn test_overflowing_amounts_are_rejected() {
        assert!(matches!(
            monthly_payment(f64::MAX, 12.0, 12),
            Err(FinanceError::InvalidArgument(_))
        ));
        assert!(matches!(
            payment_schedule(f64::MAX / 10.0, 0.0, 1),
            Err(FinanceError::InvalidArgument(_))
        ));
        assert!(total_interest(f64::MAX, 12, 1.0).is_err());
    }

    #[test]
    fn test_compute_bundles_figures() {
        let schedule = AmortizationSchedule::compute(LoanTerms::new(10_000.0, 8.5, 24).unwrap())
            .unwrap();
        assert_eq!(schedule.monthly_payment, 454.56);
        assert_eq!(schedule.total_interest, 909.44);
        assert_eq!(schedule.total_cost, 10_909.44);
        assert_eq!(schedule.entries.len(), 24);
        assert!(close(schedule.scheduled_principal(), 10_000.0, 0.25));
        // Interest column is computed from the running balance, not the rounded payment
        assert!(close(schedule.scheduled_interest(), schedule.total_interest, 0.25));
    }

    #[test]
    fn test_entries_serialize_camel_case() {
        let schedule = payment_schedule(1_000.0, 5.0, 2).unwrap();
        let json = serde_json::to_value(schedule[0]).unwrap();
        assert!(json.get("remainingBalance").is_some());
        assert_eq!(json["month"], 1);
    }
}
