use crate::error::{FeasibilityError, Result};
use crate::projection::HORIZON_YEARS;
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ANNUAL_RATE: f64 = 2.;
pub const DEFAULT_GRACE_MONTHS: u32 = 60;
pub const DEFAULT_REPAYMENT_MONTHS: u32 = 120;

/// Phase of the loan a given year falls into.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Period {
    /// interest only, principal untouched
    Grace,
    /// level-principal paydown
    Repayment,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Grace => write!(f, "grace"),
            Period::Repayment => write!(f, "repayment"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct AnnualRepayment {
    pub year: usize,
    pub period: Period,
    pub interest: f64,
    pub principal_repayment: f64,
    pub total_repayment: f64,
    pub end_balance: f64,
}

impl AnnualRepayment {
    pub fn new(
        year: usize,
        period: Period,
        interest: f64,
        principal_repayment: f64,
        end_balance: f64,
    ) -> Self {
        Self {
            year,
            period,
            interest,
            principal_repayment,
            total_repayment: interest + principal_repayment,
            end_balance,
        }
    }
}

impl fmt::Display for AnnualRepayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year {} ({}), interest {:.0}, principal {:.0}, total {:.0}, ending balance {:.0}",
            self.year,
            self.period,
            self.interest,
            self.principal_repayment,
            self.total_repayment,
            self.end_balance
        )
    }
}

/// Rate and term of a level-principal loan with an interest-only grace period.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanTerms {
    /// annual interest rate in percent (i.e., 2.0 for 2%)
    pub annual_rate: f64,
    pub grace_months: u32,
    pub repayment_months: u32,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            annual_rate: DEFAULT_ANNUAL_RATE,
            grace_months: DEFAULT_GRACE_MONTHS,
            repayment_months: DEFAULT_REPAYMENT_MONTHS,
        }
    }
}

impl LoanTerms {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 100. / 12.
    }

    pub fn grace_years(&self) -> usize {
        (self.grace_months / 12) as usize
    }

    /// Whole years only; a trailing partial year is dropped. `validate`
    /// rejects month counts that are not a multiple of 12.
    pub fn repayment_years(&self) -> usize {
        (self.repayment_months / 12) as usize
    }

    pub fn total_years(&self) -> usize {
        self.grace_years() + self.repayment_years()
    }

    /// Rejects terms whose schedule does not line up with the projection
    /// horizon year for year.
    pub fn validate(&self) -> Result<()> {
        if !self.annual_rate.is_finite() || self.annual_rate < 0. {
            return Err(FeasibilityError::InvalidInput {
                field: "annual_rate",
                reason: format!("{} is not a finite, non-negative rate", self.annual_rate),
            });
        }
        for (field, months) in [
            ("grace_months", self.grace_months),
            ("repayment_months", self.repayment_months),
        ] {
            if months % 12 != 0 {
                return Err(FeasibilityError::InvalidInput {
                    field,
                    reason: format!("{} is not a whole number of years", months),
                });
            }
        }
        if self.total_years() != HORIZON_YEARS {
            return Err(FeasibilityError::InvalidInput {
                field: "repayment_months",
                reason: format!(
                    "term of {} years does not cover the {} year horizon",
                    self.total_years(),
                    HORIZON_YEARS
                ),
            });
        }
        Ok(())
    }
}

/// Annual interest and principal schedule of a level-principal loan.
///
/// Interest is rounded to whole units monthly. The reported annual principal
/// repayment is `round(principal / 10)` and is computed independently of the
/// monthly paydown, so it need not reconcile with `end_balance`.
#[derive(PartialEq, Debug)]
pub struct Loan {
    pub principal: f64,
    pub terms: LoanTerms,
    schedule: Vec<AnnualRepayment>,
}

impl Loan {
    pub fn new(principal: f64, terms: LoanTerms) -> Self {
        Self {
            principal,
            terms,
            schedule: add_scheduled_repayments(&principal, &terms),
        }
    }

    /// Loan at 2% with a 60 month grace period and 120 months of repayment.
    pub fn with_default_terms(principal: f64) -> Self {
        Self::new(principal, LoanTerms::default())
    }

    pub fn get_schedule(&self) -> &[AnnualRepayment] {
        &self.schedule
    }

    pub fn get_year_count(&self) -> usize {
        self.schedule.len()
    }

    pub fn get_year_info(&self, &year: &usize) -> String {
        match self.get_year_detail(&year) {
            Some(repayment) => repayment.to_string(),
            None => "No repayment information.".to_string(),
        }
    }

    // years are numbered from 1
    pub fn get_year_detail(&self, &year: &usize) -> Option<&AnnualRepayment> {
        self.schedule.get(year.checked_sub(1)?)
    }

    pub fn interest_series(&self) -> Vec<f64> {
        self.schedule.iter().map(|r| r.interest).collect()
    }

    pub fn principal_series(&self) -> Vec<f64> {
        self.schedule.iter().map(|r| r.principal_repayment).collect()
    }

    pub fn total_repayment_series(&self) -> Vec<f64> {
        self.schedule.iter().map(|r| r.total_repayment).collect()
    }

    pub fn show_schedule(&self) {
        for repayment in &self.schedule {
            println!("{}", repayment);
        }
    }
}

pub fn round(amt: f64, dec: f64) -> f64 {
    if amt == 0. {
        0.
    } else {
        (amt * 10_f64.powf(dec)).round() / 10_f64.powf(dec)
    }
}

fn add_scheduled_repayments(&principal: &f64, terms: &LoanTerms) -> Vec<AnnualRepayment> {
    let mut schedule: Vec<AnnualRepayment> = Vec::with_capacity(terms.total_years());
    let monthly_rate = terms.monthly_rate();

    // grace period: interest on the untouched principal
    let grace_interest_month = round(principal * monthly_rate, 0.);
    let grace_interest_year = grace_interest_month * 12.;
    for year in 0..terms.grace_years() {
        schedule.push(AnnualRepayment::new(
            year + 1,
            Period::Grace,
            grace_interest_year,
            0.,
            principal,
        ));
    }
    debug!(
        "grace period: {} years, monthly interest {}",
        terms.grace_years(),
        grace_interest_month
    );

    // repayment period
    let principal_repayment_month = round(principal / terms.repayment_months as f64, 0.);
    let principal_repayment_year = round(principal / 10., 0.);
    let mut balance = principal;

    for year in 0..terms.repayment_years() {
        let mut interest_year = 0.;
        for month in 0..12 {
            let interest_month = round(balance * monthly_rate, 0.);
            interest_year += interest_month;
            balance -= principal_repayment_month;
            trace!(
                "repayment year {}, month {}, interest {}, balance {}",
                year + 1,
                month + 1,
                interest_month,
                balance
            );
        }

        schedule.push(AnnualRepayment::new(
            terms.grace_years() + year + 1,
            Period::Repayment,
            interest_year,
            principal_repayment_year,
            balance,
        ));
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::{round, AnnualRepayment, Loan, LoanTerms, Period};
    use crate::error::FeasibilityError;
    use test_log::test;

    fn invalid_field(terms: LoanTerms) -> &'static str {
        match terms.validate() {
            Err(FeasibilityError::InvalidInput { field, .. }) => field,
            other => panic!("expected invalid terms, got {:?}", other),
        }
    }

    #[test]
    fn test_round() {
        assert_eq!(round(0., 0.), 0.);
        assert_eq!(round(1999.9999999999998, 0.), 2000.);
        assert_eq!(round(2.5, 0.), 3.);
        assert_eq!(round(-2.5, 0.), -3.);
        assert_eq!(round(1797.65654, 4.), 1797.6565);
    }

    #[test]
    fn test_default_terms() {
        let terms = LoanTerms::default();
        assert_eq!(terms.grace_years(), 5);
        assert_eq!(terms.repayment_years(), 10);
        assert_eq!(terms.total_years(), 15);
    }

    #[test]
    fn test_validate_terms() {
        assert_eq!(LoanTerms::default().validate(), Ok(()));
        assert_eq!(
            LoanTerms {
                annual_rate: 0.,
                grace_months: 0,
                repayment_months: 180,
            }
            .validate(),
            Ok(())
        );
    }

    #[test]
    fn test_validate_rejects_short_term() {
        let terms = LoanTerms {
            annual_rate: 2.,
            grace_months: 24,
            repayment_months: 60,
        };
        assert_eq!(terms.total_years(), 7);
        assert_eq!(invalid_field(terms), "repayment_months");
    }

    #[test]
    fn test_validate_rejects_partial_years() {
        let terms = LoanTerms {
            repayment_months: 126,
            ..Default::default()
        };
        // 10 whole years, so the 6 extra months would be silently dropped
        assert_eq!(terms.repayment_years(), 10);
        assert_eq!(invalid_field(terms), "repayment_months");

        let terms = LoanTerms {
            grace_months: 66,
            repayment_months: 114,
            ..Default::default()
        };
        assert_eq!(invalid_field(terms), "grace_months");
    }

    #[test]
    fn test_validate_rejects_bad_rate() {
        for annual_rate in [-0.5, f64::NAN, f64::INFINITY] {
            let terms = LoanTerms {
                annual_rate,
                ..Default::default()
            };
            assert_eq!(invalid_field(terms), "annual_rate");
        }
    }

    #[test]
    fn test_grace_period() {
        let loan = Loan::with_default_terms(1_200_000.);

        assert_eq!(loan.get_year_count(), 15);
        for year in 1..=5 {
            let detail = loan.get_year_detail(&year).unwrap();
            assert_eq!(detail.period, Period::Grace);
            assert_eq!(detail.interest, 24_000.);
            assert_eq!(detail.principal_repayment, 0.);
            assert_eq!(detail.end_balance, 1_200_000.);
        }
    }

    #[test]
    fn test_repayment_period() {
        let loan = Loan::with_default_terms(1_200_000.);

        assert_eq!(
            loan.interest_series()[5..],
            [22900., 20500., 18100., 15700., 13300., 10900., 8500., 6100., 3700., 1300.]
        );
        assert!(loan.principal_series()[5..].iter().all(|&p| p == 120_000.));
        assert_eq!(loan.get_year_detail(&15).unwrap().end_balance, 0.);
        assert_eq!(
            loan.get_year_info(&6),
            "year 6 (repayment), interest 22900, principal 120000, total 142900, ending balance 1080000"
        );
        assert_eq!(loan.get_year_info(&16), "No repayment information.");
        assert_eq!(loan.get_year_info(&0), "No repayment information.");
    }

    #[test]
    fn test_total_is_interest_plus_principal() {
        let loan = Loan::with_default_terms(34_880_000.);
        let interest = loan.interest_series();
        let principal = loan.principal_series();
        let total = loan.total_repayment_series();

        assert_eq!(interest[..5], [697_596.; 5]);
        assert_eq!(interest[5], 665_626.);
        assert_eq!(interest[14], 37_785.);
        assert_eq!(principal[5], 3_488_000.);
        for i in 0..15 {
            assert_eq!(total[i], interest[i] + principal[i]);
        }
    }

    #[test]
    fn test_custom_terms() {
        let loan = Loan::new(
            1_200_000.,
            LoanTerms {
                annual_rate: 3.,
                grace_months: 24,
                repayment_months: 60,
            },
        );

        assert_eq!(loan.get_year_count(), 7);
        assert_eq!(loan.interest_series()[..2], [36_000., 36_000.]);
        // annual principal stays principal / 10 regardless of the repayment length
        assert_eq!(loan.principal_series()[2], 120_000.);
        assert_eq!(loan.get_year_detail(&7).unwrap().end_balance, 0.);
    }

    #[test]
    fn test_zero_principal() {
        let loan = Loan::with_default_terms(0.);
        assert!(loan.total_repayment_series().iter().all(|&t| t == 0.));
        assert_eq!(
            AnnualRepayment::new(1, Period::Grace, 0., 0., 0.).to_string(),
            "year 1 (grace), interest 0, principal 0, total 0, ending balance 0"
        );
    }
}
