//! Prints the standard European option report.

use qd_core::Result;
use qd_reports::{european_option_report, EuropeanOptionConfig};

fn main() -> Result<()> {
    let config = EuropeanOptionConfig::standard()?;
    let report = european_option_report(&config)?;
    println!("{}", report);
    Ok(())
}
