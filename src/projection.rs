//! Fifteen-year projections derived from the scalar business inputs.
//!
//! Renovation reserves fall due in years 7, 10 and 15 (indices 6, 9 and 14)
//! at 4%, 5% and 8% of the total project cost.

use crate::loan::round;
use log::debug;

pub const HORIZON_YEARS: usize = 15;

const RENOVATION_RATES: [(usize, f64); 3] = [(6, 0.04), (9, 0.05), (14, 0.08)];

pub fn total_project_cost(production_cost: f64, init_business_investment: f64) -> f64 {
    production_cost + init_business_investment
}

/// Renovation fund charge per year, rounded to whole units.
pub fn renovation_fund_15year(
    production_cost: f64,
    init_business_investment: f64,
) -> [f64; HORIZON_YEARS] {
    let total = total_project_cost(production_cost, init_business_investment);
    let mut fund = [0.; HORIZON_YEARS];
    for (year, rate) in RENOVATION_RATES {
        fund[year] = round(total * rate, 0.);
    }
    debug!("renovation fund: {:?}", fund);
    fund
}

/// `sales - production_cost + own_labor_cost - renovation_fund[i]` for every year.
pub fn operating_profit_15year(
    sales: f64,
    production_cost: f64,
    own_labor_cost: f64,
    renovation_fund: &[f64; HORIZON_YEARS],
) -> [f64; HORIZON_YEARS] {
    renovation_fund.map(|renovation| sales - production_cost + own_labor_cost - renovation)
}

/// Net cash flow used for the rate of return.
///
/// Year 0 carries the initial investment. Renovation years are rounded, the
/// rest keep the unrounded revenue.
pub fn cash_flow_15year(
    sales: f64,
    production_cost: f64,
    own_labor_cost: f64,
    init_business_investment: f64,
) -> [f64; HORIZON_YEARS] {
    let revenue = sales - production_cost + own_labor_cost;
    let total = total_project_cost(production_cost, init_business_investment);

    let mut cash_flow = [revenue; HORIZON_YEARS];
    cash_flow[0] = revenue - init_business_investment;
    for (year, rate) in RENOVATION_RATES {
        cash_flow[year] = round(revenue - total * rate, 0.);
    }
    debug!("cash flow: {:?}", cash_flow);
    cash_flow
}
