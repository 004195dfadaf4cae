//! Internal rate of return by bisection over the discount rate.

use crate::error::{FeasibilityError, Result};
use log::{debug, trace};

pub const RATE_LOWER_BOUND: f64 = -1.;
pub const RATE_UPPER_BOUND: f64 = 1.;
pub const TOLERANCE: f64 = 1e-21;
pub const MAX_ITERATIONS: u32 = 200;

/// Value today of `cash` received `year` years from now.
pub fn present_value(cash: f64, rate: f64, year: usize) -> f64 {
    cash / (1. + rate).powi(year as i32)
}

/// Sum of the present values of `cash_flow`, where index `i` is year `i`.
pub fn net_present_value(cash_flow: &[f64], rate: f64) -> f64 {
    cash_flow
        .iter()
        .enumerate()
        .fold(0_f64, |npv, (year, &cash)| npv + present_value(cash, rate, year))
}

/// Bisection search settings.
///
/// The search stops when two consecutive guesses differ by less than
/// `tolerance` or the NPV is within `tolerance` of zero. Hitting
/// `max_iterations` first is reported as non-convergence.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bisection {
    pub low: f64,
    pub high: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for Bisection {
    fn default() -> Self {
        Self {
            low: RATE_LOWER_BOUND,
            high: RATE_UPPER_BOUND,
            tolerance: TOLERANCE,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl Bisection {
    /// Assumes NPV falls as the rate rises, i.e. an outflow followed by inflows.
    pub fn solve(&self, cash_flow: &[f64]) -> Result<f64> {
        let mut low = self.low;
        let mut high = self.high;
        let mut last_guess = self.high;
        let mut guess = f64::NAN;
        let mut npv = f64::NAN;

        for iteration in 1..=self.max_iterations {
            guess = (low + high) / 2.;
            let settled = (last_guess - guess).abs() < self.tolerance;
            last_guess = guess;

            npv = net_present_value(cash_flow, guess);
            trace!("iteration {}, guess {}, npv {}", iteration, guess, npv);

            if npv > 0. {
                low = guess;
            } else {
                high = guess;
            }

            if settled || npv.abs() <= self.tolerance {
                debug!("rate {} after {} iterations", guess, iteration);
                return Ok(guess);
            }
        }

        Err(FeasibilityError::DidNotConverge {
            iterations: self.max_iterations,
            last_guess: guess,
            npv,
        })
    }
}

/// Solves for the rate that zeroes the NPV of `cash_flow` on [-1, 1].
pub fn solve_rate(cash_flow: &[f64]) -> Result<f64> {
    Bisection::default().solve(cash_flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_present_value() {
        assert_eq!(present_value(121., 0.1, 0), 121.);
        assert!((present_value(121., 0.1, 2) - 100.).abs() < 1e-9);
        assert_eq!(present_value(100., -0.5, 1), 200.);
    }

    #[test]
    fn test_net_present_value() {
        assert_eq!(net_present_value(&[-100., 50., 50.], 0.), 0.);
        assert!((net_present_value(&[-100., 110.], 0.1)).abs() < 1e-9);
        assert_eq!(net_present_value(&[], 0.3), 0.);
    }

    #[test]
    fn test_solve_rate_zeroes_npv() {
        let mut cash_flow = vec![-1000.];
        cash_flow.extend([100.; 14]);
        let rate = solve_rate(&cash_flow).unwrap();

        assert!((rate - 0.048410646745862373).abs() < 1e-12);
        assert!(net_present_value(&cash_flow, rate).abs() < 1e-9);
    }

    #[test]
    fn test_solve_rate_short_project() {
        let mut cash_flow = vec![-100., 30., 30., 30., 30.];
        cash_flow.extend([0.; 10]);
        let rate = solve_rate(&cash_flow).unwrap();

        assert!((rate - 0.07713847295208354).abs() < 1e-12);
        assert!(net_present_value(&cash_flow, rate).abs() < 1e-9);
    }

    #[test]
    fn test_solve_rate_negative() {
        // returns less than invested
        let cash_flow = [-100., 40., 40.];
        let rate = solve_rate(&cash_flow).unwrap();

        assert!(rate < 0.);
        assert!(net_present_value(&cash_flow, rate).abs() < 1e-9);
    }

    #[test]
    fn test_exact_root() {
        assert_eq!(solve_rate(&[-100., 100.]), Ok(0.));
    }

    #[test]
    fn test_did_not_converge() {
        let bisection = Bisection {
            max_iterations: 5,
            ..Default::default()
        };
        match bisection.solve(&[-100., 30., 30., 30., 30.]) {
            Err(FeasibilityError::DidNotConverge { iterations, .. }) => assert_eq!(iterations, 5),
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }
}
