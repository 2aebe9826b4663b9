//! Prints the standard American/European comparison report.

use qd_core::Result;
use qd_reports::{comparison_report, ComparisonConfig};

fn main() -> Result<()> {
    let config = ComparisonConfig::standard()?;
    let report = comparison_report(&config)?;
    println!("{}", report);
    Ok(())
}
