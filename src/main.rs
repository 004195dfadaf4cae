use feasibility::loan::Loan;
use feasibility::*;
use log::error;
use simple_logger::SimpleLogger;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let input = DsrIcrInput {
        sales: 35300429.75241912,
        production_cost: 36950380.16565876,
        own_labor_cost: 20680000.,
        init_business_investment: 52000000.,
        loan_principal: 34880000.,
    };

    Loan::with_default_terms(input.loan_principal).show_schedule();
    println!("{}", dsr_icr_calculator(&input));

    match irr_calculator(&IrrInput::from(&input)) {
        Ok(result) => println!("{}", result),
        Err(e) => error!("{}", e),
    }
    Ok(())
}

// public types can be sent and shared across threads
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<DsrIcrInput>();
    is_normal::<DsrIcrResult>();
    is_normal::<IrrInput>();
    is_normal::<IrrResult>();
    is_normal::<Loan>();
    is_normal::<FeasibilityError>();
}
