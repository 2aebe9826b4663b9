use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qd_instruments::{OptionType, PricingEngine, VanillaOption};
use qd_pricingengines::{black_scholes_merton, AnalyticEuropeanEngine, FdAmericanEngine};
use qd_processes::GeneralizedBlackScholesProcess;
use qd_quotes::SimpleQuote;
use qd_termstructures::{BlackConstantVol, BlackVolTermStructure, FlatForward, YieldTermStructure};
use qd_time::{Actual365Fixed, Date};

fn process_at(
    spot: f64,
    r: f64,
    q: f64,
    sigma: f64,
    reference: Date,
) -> Arc<GeneralizedBlackScholesProcess> {
    let quote = Arc::new(SimpleQuote::new(spot));
    let rates: Arc<dyn YieldTermStructure> =
        Arc::new(FlatForward::continuous(reference, r, Actual365Fixed));
    let dividends: Arc<dyn YieldTermStructure> =
        Arc::new(FlatForward::continuous(reference, q, Actual365Fixed));
    let vol: Arc<dyn BlackVolTermStructure> =
        Arc::new(BlackConstantVol::new(reference, sigma, Actual365Fixed));
    Arc::new(GeneralizedBlackScholesProcess::new(
        quote, rates, dividends, vol,
    ))
}

fn bench_engines(c: &mut Criterion) {
    c.bench_function("black_scholes_merton", |b| {
        b.iter(|| {
            black_scholes_merton(
                OptionType::Call,
                black_box(100.0),
                black_box(105.0),
                0.05,
                0.02,
                black_box(0.25),
                1.0,
            )
        })
    });

    let reference = Date::from_ymd(2014, 4, 17).unwrap();
    let expiry = Date::from_ymd(2016, 1, 15).unwrap();
    let process = process_at(36.35, 0.01, 0.02, 0.50, reference);

    let european = VanillaOption::european(OptionType::Call, 35.0, expiry);
    let analytic = AnalyticEuropeanEngine::new(process.clone());
    let args = european.arguments();
    c.bench_function("analytic_european_engine", |b| {
        b.iter(|| analytic.calculate(black_box(&args)))
    });

    let american = VanillaOption::american(OptionType::Call, 35.0, reference, expiry);
    let fd = FdAmericanEngine::new(process, 100, 100);
    let args = american.arguments();
    c.bench_function("fd_american_engine_100x100", |b| {
        b.iter(|| fd.calculate(black_box(&args)))
    });
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
