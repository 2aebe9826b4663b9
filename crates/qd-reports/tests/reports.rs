//! End-to-end report runs against known values.

use approx::assert_abs_diff_eq;
use qd_reports::{
    american_option_report, comparison_report, european_option_report, fixed_rate_bond_report,
    AmericanOptionConfig, ComparisonConfig, EuropeanOptionConfig, FixedRateBondConfig,
};

#[test]
fn european_report_reproduces_the_closed_form() {
    let config = EuropeanOptionConfig::standard().unwrap();
    let report = european_option_report(&config).unwrap();

    // S=K=123, r=1%, q=2%, sigma=3%, exactly one Act/Act ISDA year
    assert_abs_diff_eq!(report.npv, 0.923988, epsilon = 1e-3);
    assert_abs_diff_eq!(report.delta, 0.367688, epsilon = 1e-4);
    assert_abs_diff_eq!(report.gamma, 0.100735, epsilon = 1e-4);
    assert_abs_diff_eq!(report.vega, 45.721929, epsilon = 1e-2);
    assert_abs_diff_eq!(report.theta, -0.224332, epsilon = 1e-3);
    assert_abs_diff_eq!(report.rho, 44.301673, epsilon = 1e-2);
    assert_abs_diff_eq!(report.dividend_rho, -45.225661, epsilon = 1e-2);
    assert_abs_diff_eq!(report.theta_per_day, report.theta / 365.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.strike_sensitivity, -0.360176, epsilon = 1e-4);

    let text = report.to_string();
    assert_eq!(text.lines().count(), 9);
    assert!(text.starts_with("Option NPV: 0.92"));
}

#[test]
fn american_report_reprices_the_market_quote() {
    let config = AmericanOptionConfig::standard().unwrap();
    let report = american_option_report(&config).unwrap();

    // pricing at the calibrated vol reproduces the quote within the
    // calibration tolerance
    assert_abs_diff_eq!(report.npv, 7.50, epsilon = 2e-4);
    assert!(
        report.implied_volatility > 0.2 && report.implied_volatility < 0.8,
        "implied vol {} outside the plausible band",
        report.implied_volatility
    );
    assert!(report.delta > 0.5 && report.delta < 1.0);
    assert!(report.gamma > 0.0);

    let text = report.to_string();
    assert!(text.starts_with("Implied Volatility: "));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn comparison_report_agrees_across_styles() {
    let config = ComparisonConfig::standard().unwrap();
    let report = comparison_report(&config).unwrap();

    // both calibrations hit the same quote
    assert_abs_diff_eq!(report.european.npv, 7.50, epsilon = 2e-4);
    assert_abs_diff_eq!(report.american_npv, 7.50, epsilon = 2e-4);

    // a call on a non-dividend payer is never exercised early, so the
    // styles may disagree only by grid error
    assert_abs_diff_eq!(
        report.european_implied_volatility,
        report.american_implied_volatility,
        epsilon = 5e-3
    );
    assert_abs_diff_eq!(report.european.delta, report.american_delta, epsilon = 5e-2);

    let text = report.to_string();
    assert!(text.starts_with("European Results"));
    assert!(text.contains("\nAmerican Results\n"));
}

#[test]
fn bond_report_reprices_the_curve_and_the_yield() {
    let config = FixedRateBondConfig::standard().unwrap();
    let report = fixed_rate_bond_report(&config).unwrap();

    // 44 accrued days of a 184-day March-September coupon period
    assert_abs_diff_eq!(
        report.accrued_interest,
        100.0 * 0.06875 * 44.0 / 368.0,
        epsilon = 1e-10
    );

    // the z-spreaded curve reprices the dirty market value
    let market_dirty = 101.50 + report.accrued_interest;
    assert_abs_diff_eq!(report.npv, market_dirty, epsilon = 1e-6);

    // premium bond: yield below the coupon, spread well above the
    // post-crisis deposit curve
    assert!(
        report.yield_to_maturity > 0.06 && report.yield_to_maturity < 0.06875,
        "yield {} outside the premium-bond band",
        report.yield_to_maturity
    );
    assert!(
        report.z_spread_bp > 100.0 && report.z_spread_bp < 600.0,
        "z-spread {}bp outside the plausible band",
        report.z_spread_bp
    );
    assert!(report.duration > 10.0 && report.duration < 16.0);
    assert!(report.convexity > 100.0 && report.convexity < 400.0);
    assert!(report.bps > 0.0);
    assert!(report.basis_point_value < 0.0);
    assert!(report.yield_value_basis_point < 0.0);

    let text = report.to_string();
    assert!(text.starts_with("Z-Spread (bp): "));
    assert_eq!(text.lines().count(), 9);
}

#[test]
fn bond_yield_reprices_the_clean_quote() {
    let config = FixedRateBondConfig::standard().unwrap();
    let report = fixed_rate_bond_report(&config).unwrap();

    // duration approximates the price response to a small yield bump
    let dy = 1e-4;
    let bumped = report.duration * dy * (101.50 + report.accrued_interest);
    assert!(bumped > 0.0 && bumped < 1.0);
    // basis point value and the duration-based estimate agree in size
    assert_abs_diff_eq!(report.basis_point_value.abs(), bumped, epsilon = bumped * 0.05);
}
