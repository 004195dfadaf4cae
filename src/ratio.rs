//! Coverage ratios averaged over the projection horizon.
//!
//! The plain functions divide straight through, so a zero denominator yields
//! `inf` or `NaN` in the mean. The `checked_` variants report it instead.

use crate::error::{FeasibilityError, Result};
use crate::projection::HORIZON_YEARS;
use log::{trace, warn};

pub const INTEREST_COVERAGE: &str = "interest coverage ratio";
pub const DEBT_SAVINGS: &str = "debt savings ratio";

/// Mean of `operating_profit[i] / interest[i]` (RTI).
pub fn interest_coverage_ratio(operating_profit: &[f64], interest: &[f64]) -> f64 {
    mean_ratio(operating_profit, interest)
}

/// Mean of `operating_profit[i] / total_repayment[i]` (DSR).
pub fn debt_savings_ratio(operating_profit: &[f64], total_repayment: &[f64]) -> f64 {
    mean_ratio(operating_profit, total_repayment)
}

pub fn checked_interest_coverage_ratio(operating_profit: &[f64], interest: &[f64]) -> Result<f64> {
    checked_mean_ratio(INTEREST_COVERAGE, operating_profit, interest)
}

pub fn checked_debt_savings_ratio(operating_profit: &[f64], total_repayment: &[f64]) -> Result<f64> {
    checked_mean_ratio(DEBT_SAVINGS, operating_profit, total_repayment)
}

fn mean_ratio(numerator: &[f64], denominator: &[f64]) -> f64 {
    if numerator.len() != denominator.len() {
        warn!(
            "ratio over {} years against {} years of denominators",
            numerator.len(),
            denominator.len()
        );
    }
    let sum = numerator
        .iter()
        .zip(denominator)
        .fold(0_f64, |sum, (n, d)| sum + n / d);
    trace!("ratio sum {} over {} years", sum, numerator.len());
    sum / numerator.len() as f64
}

fn checked_mean_ratio(ratio: &'static str, numerator: &[f64], denominator: &[f64]) -> Result<f64> {
    if numerator.is_empty() {
        return Err(FeasibilityError::SeriesLength {
            expected: HORIZON_YEARS,
            actual: 0,
        });
    }
    if numerator.len() != denominator.len() {
        return Err(FeasibilityError::SeriesLength {
            expected: numerator.len(),
            actual: denominator.len(),
        });
    }
    if let Some(year) = denominator.iter().position(|&d| d == 0.) {
        return Err(FeasibilityError::UndefinedRatio { ratio, year });
    }
    Ok(mean_ratio(numerator, denominator))
}
