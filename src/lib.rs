//! Loan feasibility ratios for a 15-year business projection.

pub mod calculator;
pub mod error;
pub mod irr;
pub mod loan;
pub mod projection;
pub mod ratio;

pub use calculator::{
    checked_dsr_icr_calculator, checked_dsr_icr_calculator_with_terms, checked_irr_calculator,
    dsr_icr_calculator, irr_calculator, DsrIcrInput, DsrIcrResult, IrrInput, IrrResult,
};
pub use error::{FeasibilityError, Result};
