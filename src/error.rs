use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FeasibilityError {
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{ratio} is undefined: denominator is zero in year {year}")]
    UndefinedRatio { ratio: &'static str, year: usize },

    #[error("series length mismatch: expected {expected}, got {actual}")]
    SeriesLength { expected: usize, actual: usize },

    #[error("rate did not converge after {iterations} iterations (last guess {last_guess}, npv {npv})")]
    DidNotConverge {
        iterations: u32,
        last_guess: f64,
        npv: f64,
    },
}

pub type Result<T> = std::result::Result<T, FeasibilityError>;
