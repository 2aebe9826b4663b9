//! Prints the standard fixed-rate bond report, calibrating the
//! z-spread over the bootstrapped deposit curve first.

use qd_core::Result;
use qd_reports::{fixed_rate_bond_report, FixedRateBondConfig};

fn main() -> Result<()> {
    let config = FixedRateBondConfig::standard()?;
    let report = fixed_rate_bond_report(&config)?;
    println!("{}", report);
    Ok(())
}
