//! 15-year loan feasibility calculators.
//!
//! `dsr_icr_calculator` checks that operating profit covers both the loan
//! interest (RTI) and the full repayment (DSR). `irr_calculator` checks the
//! project's internal rate of return against a 6% hurdle.

use crate::error::{FeasibilityError, Result};
use crate::irr::solve_rate;
use crate::loan::{Loan, LoanTerms};
use crate::projection::{
    cash_flow_15year, operating_profit_15year, renovation_fund_15year, HORIZON_YEARS,
};
use crate::ratio::{
    checked_debt_savings_ratio, checked_interest_coverage_ratio, debt_savings_ratio,
    interest_coverage_ratio,
};
use log::{info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// RTI and DSR must both exceed this.
pub const COVERAGE_THRESHOLD: f64 = 1.;
/// IRR must exceed this.
pub const IRR_THRESHOLD: f64 = 0.06;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsrIcrInput {
    /// annual sales (production volume * unit price)
    pub sales: f64,
    /// cost of goods sold plus selling and administrative expenses
    pub production_cost: f64,
    /// owner's own labor, added back to profit
    pub own_labor_cost: f64,
    /// land purchase plus facilities
    pub init_business_investment: f64,
    pub loan_principal: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsrIcrResult {
    pub rti: f64,
    pub dsr: f64,
    pub status: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrrInput {
    pub sales: f64,
    pub production_cost: f64,
    pub own_labor_cost: f64,
    pub init_business_investment: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrrResult {
    pub irr: f64,
    pub status: bool,
}

impl From<&DsrIcrInput> for IrrInput {
    fn from(input: &DsrIcrInput) -> Self {
        Self {
            sales: input.sales,
            production_cost: input.production_cost,
            own_labor_cost: input.own_labor_cost,
            init_business_investment: input.init_business_investment,
        }
    }
}

impl DsrIcrInput {
    /// Rejects negative or non-finite amounts and a zero loan principal.
    pub fn validate(&self) -> Result<()> {
        IrrInput::from(self).validate()?;
        check_amount("loan_principal", self.loan_principal)?;
        if self.loan_principal == 0. {
            return Err(FeasibilityError::InvalidInput {
                field: "loan_principal",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl IrrInput {
    /// Rejects negative or non-finite amounts.
    pub fn validate(&self) -> Result<()> {
        check_amount("sales", self.sales)?;
        check_amount("production_cost", self.production_cost)?;
        check_amount("own_labor_cost", self.own_labor_cost)?;
        check_amount("init_business_investment", self.init_business_investment)
    }
}

fn check_amount(field: &'static str, amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(FeasibilityError::InvalidInput {
            field,
            reason: format!("{} is not a finite number", amount),
        });
    }
    if amount < 0. {
        return Err(FeasibilityError::InvalidInput {
            field,
            reason: format!("{} is negative", amount),
        });
    }
    Ok(())
}

impl fmt::Display for DsrIcrResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RTI {:.4}, DSR {:.4}, status {}",
            self.rti, self.dsr, self.status
        )
    }
}

impl fmt::Display for IrrResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IRR {:.4}, status {}", self.irr, self.status)
    }
}

/// Operating profit and loan for the DSR/ICR path, shared by both variants.
fn dsr_icr_inputs(input: &DsrIcrInput, terms: LoanTerms) -> ([f64; HORIZON_YEARS], Loan) {
    let renovation_fund =
        renovation_fund_15year(input.production_cost, input.init_business_investment);
    let operating_profit = operating_profit_15year(
        input.sales,
        input.production_cost,
        input.own_labor_cost,
        &renovation_fund,
    );
    let loan = Loan::new(input.loan_principal, terms);
    (operating_profit, loan)
}

fn dsr_icr_result(rti: f64, dsr: f64) -> DsrIcrResult {
    let result = DsrIcrResult {
        rti,
        dsr,
        status: rti > COVERAGE_THRESHOLD && dsr > COVERAGE_THRESHOLD,
    };
    info!("{}", result);
    result
}

/// Interest coverage and debt service ratios over 15 years.
///
/// A zero loan principal leaves zero denominators, which surface as
/// `inf`/`NaN` ratios. Use [`checked_dsr_icr_calculator`] to get an error
/// instead.
pub fn dsr_icr_calculator(input: &DsrIcrInput) -> DsrIcrResult {
    let (operating_profit, loan) = dsr_icr_inputs(input, LoanTerms::default());

    let rti = interest_coverage_ratio(&operating_profit, &loan.interest_series());
    let dsr = debt_savings_ratio(&operating_profit, &loan.total_repayment_series());
    if !rti.is_finite() || !dsr.is_finite() {
        warn!("undefined ratio: RTI {}, DSR {}", rti, dsr);
    }
    dsr_icr_result(rti, dsr)
}

pub fn checked_dsr_icr_calculator(input: &DsrIcrInput) -> Result<DsrIcrResult> {
    checked_dsr_icr_calculator_with_terms(input, LoanTerms::default())
}

/// Like [`checked_dsr_icr_calculator`] for a loan on other terms. The terms
/// must span the 15-year horizon in whole years.
pub fn checked_dsr_icr_calculator_with_terms(
    input: &DsrIcrInput,
    terms: LoanTerms,
) -> Result<DsrIcrResult> {
    input.validate()?;
    terms.validate()?;
    let (operating_profit, loan) = dsr_icr_inputs(input, terms);

    let rti = checked_interest_coverage_ratio(&operating_profit, &loan.interest_series())?;
    let dsr = checked_debt_savings_ratio(&operating_profit, &loan.total_repayment_series())?;
    Ok(dsr_icr_result(rti, dsr))
}

/// Internal rate of return of the 15-year cash flow.
pub fn irr_calculator(input: &IrrInput) -> Result<IrrResult> {
    let cash_flow = cash_flow_15year(
        input.sales,
        input.production_cost,
        input.own_labor_cost,
        input.init_business_investment,
    );
    let irr = solve_rate(&cash_flow)?;
    if !irr.is_finite() {
        warn!("undefined rate of return: {}", irr);
    }

    let result = IrrResult {
        irr,
        status: irr > IRR_THRESHOLD,
    };
    info!("{}", result);
    Ok(result)
}

pub fn checked_irr_calculator(input: &IrrInput) -> Result<IrrResult> {
    input.validate()?;
    irr_calculator(input)
}
