//! Prints the standard American option report, calibrating the
//! volatility to the quoted market price first.

use qd_core::Result;
use qd_reports::{american_option_report, AmericanOptionConfig};

fn main() -> Result<()> {
    let config = AmericanOptionConfig::standard()?;
    let report = american_option_report(&config)?;
    println!("{}", report);
    Ok(())
}
