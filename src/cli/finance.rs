//! Financing commands: payments, schedules, quotes and affordability.

use crate::cli::common::{print_json, CliError, CliResult, Context};
use crate::finance::{
    self, AmortizationSchedule, FinanceError, FinanceQuote, LoanTerms, PaymentScheduleEntry,
    QuoteRequest,
};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Financing calculations
#[derive(Debug, Args)]
pub struct FinanceArgs {
    #[command(subcommand)]
    command: FinanceCommand,
}

#[derive(Debug, Subcommand)]
enum FinanceCommand {
    /// Fixed monthly payment for a loan
    Payment(LoanArgs),
    /// Month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Quote for a project price and down payment
    Quote(QuoteArgs),
    /// Compare the financing packages for a quote
    Compare(QuoteArgs),
    /// Largest loan a monthly income supports
    Afford(AffordArgs),
    /// Loan-to-value and debt-to-income ratios
    Ratios(RatiosArgs),
}

/// Loan parameters
#[derive(Debug, Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(short, long)]
    principal: f64,

    /// Annual interest rate in percent (8.5 means 8.5 %)
    #[arg(short, long)]
    rate: f64,

    /// Term in months
    #[arg(short, long)]
    months: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Quote parameters; omitted values come from the configuration
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Total project price
    #[arg(long)]
    total: Option<f64>,

    /// Down payment
    #[arg(long)]
    down: Option<f64>,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<f64>,

    /// Term in months
    #[arg(long)]
    months: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Affordability parameters
#[derive(Debug, Args)]
pub struct AffordArgs {
    /// Gross monthly income
    #[arg(long)]
    income: f64,

    /// Down payment
    #[arg(long)]
    down: f64,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: f64,

    /// Term in months
    #[arg(long)]
    months: u32,

    /// Maximum debt-to-income ratio (defaults to the configured value)
    #[arg(long)]
    max_dti: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Ratio parameters
#[derive(Debug, Args)]
pub struct RatiosArgs {
    /// Loan amount
    #[arg(long, requires = "value")]
    loan: Option<f64>,

    /// Property or project value
    #[arg(long, requires = "loan")]
    value: Option<f64>,

    /// Monthly debt payments
    #[arg(long, requires = "income")]
    debt: Option<f64>,

    /// Monthly income
    #[arg(long, requires = "debt")]
    income: Option<f64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentResponse {
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
    monthly_payment: f64,
    total_interest: f64,
    total_cost: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RatiosResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    loan_to_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debt_to_income: Option<f64>,
}

impl FinanceArgs {
    /// Execute finance subcommand
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        match &self.command {
            FinanceCommand::Payment(args) => args.payment(),
            FinanceCommand::Schedule(args) => args.schedule(),
            FinanceCommand::Quote(args) => args.quote(ctx),
            FinanceCommand::Compare(args) => args.compare(ctx),
            FinanceCommand::Afford(args) => args.execute(ctx),
            FinanceCommand::Ratios(args) => args.execute(),
        }
    }
}

impl LoanArgs {
    fn compute(&self) -> CliResult<AmortizationSchedule> {
        LoanTerms::new(self.principal, self.rate, self.months)
            .and_then(AmortizationSchedule::compute)
            .map_err(finance_error)
    }

    fn payment(&self) -> CliResult<()> {
        let schedule = self.compute()?;

        if self.json {
            return print_json(&PaymentResponse {
                principal: schedule.terms.principal,
                annual_rate_percent: schedule.terms.annual_rate_percent,
                term_months: schedule.terms.term_months,
                monthly_payment: schedule.monthly_payment,
                total_interest: schedule.total_interest,
                total_cost: schedule.total_cost,
            });
        }

        println!("Monthly payment: {:.2}", schedule.monthly_payment);
        println!("Total interest:  {:.2}", schedule.total_interest);
        println!("Total cost:      {:.2}", schedule.total_cost);
        Ok(())
    }

    fn schedule(&self) -> CliResult<()> {
        let schedule = self.compute()?;

        if self.json {
            return print_json(&schedule);
        }

        println!(
            "Monthly payment {:.2} over {} months",
            schedule.monthly_payment, schedule.terms.term_months
        );
        println!();
        print_schedule(&schedule.entries);
        println!();
        println!("Total interest: {:.2}", schedule.total_interest);
        Ok(())
    }
}

impl QuoteArgs {
    fn request(&self, ctx: &Context) -> QuoteRequest {
        let defaults = ctx.config.finance.quote_request();
        QuoteRequest {
            total_amount: self.total.unwrap_or(defaults.total_amount),
            down_payment: self.down.unwrap_or(defaults.down_payment),
            interest_rate: self.rate.unwrap_or(defaults.interest_rate),
            loan_term_months: self.months.unwrap_or(defaults.loan_term_months),
        }
    }

    fn quote(&self, ctx: &Context) -> CliResult<()> {
        let quote = FinanceQuote::compute(self.request(ctx)).map_err(finance_error)?;

        if self.json {
            return print_json(&quote);
        }

        println!("Total amount:     {:.2}", quote.total_amount);
        println!("Down payment:     {:.2}", quote.down_payment);
        println!("Financed:         {:.2}", quote.financing_amount);
        println!(
            "Rate / term:      {}% over {} months",
            quote.interest_rate, quote.loan_term_months
        );
        println!("Monthly payment:  {:.2}", quote.monthly_payment);
        println!("Total interest:   {:.2}", quote.total_interest);
        println!("Total cost:       {:.2}", quote.total_cost);
        Ok(())
    }

    fn compare(&self, ctx: &Context) -> CliResult<()> {
        let quote = FinanceQuote::compute(self.request(ctx)).map_err(finance_error)?;
        let options = finance::compare(&quote).map_err(finance_error)?;

        if self.json {
            return print_json(&options);
        }

        for option in &options {
            let marker = if option.recommended { " (recommended)" } else { "" };
            println!("{}{}", option.name, marker);
            println!("  {}", option.description);
            println!(
                "  {}% over {} months, {:.2}/month, interest {:.2}, total {:.2}, down {:.2}",
                option.interest_rate,
                option.loan_term_months,
                option.monthly_payment,
                option.total_interest,
                option.total_cost,
                option.down_payment
            );
            println!("  {}", option.features.join(" · "));
            println!();
        }
        Ok(())
    }
}

impl AffordArgs {
    fn execute(&self, ctx: &Context) -> CliResult<()> {
        let max_dti = self.max_dti.unwrap_or(ctx.config.finance.max_dti);
        let result = finance::affordability(self.income, self.down, self.rate, self.months, max_dti)
            .map_err(finance_error)?;

        if self.json {
            return print_json(&result);
        }

        println!("Monthly payment budget: {:.0}", result.monthly_payment);
        println!("Maximum loan:           {:.0}", result.max_loan_amount);
        println!("Maximum price:          {:.0}", result.max_home_price);
        Ok(())
    }
}

impl RatiosArgs {
    fn execute(&self) -> CliResult<()> {
        if self.loan.is_none() && self.debt.is_none() {
            return Err(CliError::validation(
                "Specify --loan/--value, --debt/--income, or both",
            ));
        }

        let loan_to_value = match (self.loan, self.value) {
            (Some(loan), Some(value)) => {
                Some(finance::loan_to_value(loan, value).map_err(finance_error)?)
            }
            _ => None,
        };
        let debt_to_income = match (self.debt, self.income) {
            (Some(debt), Some(income)) => {
                Some(finance::debt_to_income(debt, income).map_err(finance_error)?)
            }
            _ => None,
        };

        if self.json {
            return print_json(&RatiosResponse {
                loan_to_value,
                debt_to_income,
            });
        }

        if let Some(ltv) = loan_to_value {
            println!("Loan-to-value:  {ltv:.2}%");
        }
        if let Some(dti) = debt_to_income {
            println!("Debt-to-income: {dti:.2}%");
        }
        Ok(())
    }
}

fn print_schedule(entries: &[PaymentScheduleEntry]) {
    println!(
        "{:>5}  {:>10}  {:>10}  {:>10}  {:>12}",
        "Month", "Payment", "Principal", "Interest", "Balance"
    );
    for entry in entries {
        println!(
            "{:>5}  {:>10.2}  {:>10.2}  {:>10.2}  {:>12.2}",
            entry.month, entry.payment, entry.principal, entry.interest, entry.remaining_balance
        );
    }
}

fn finance_error(err: FinanceError) -> CliError {
    CliError::validation(err.to_string())
}
