// tests/solver_convergence_test.rs
use sde_paths::analytics::gbm_moments;
use sde_paths::analytics::path_stats::terminal_summary;
use sde_paths::models::gbm::Gbm;
use sde_paths::models::rate::integrate_rate;
use sde_paths::solvers::log_euler::LogEuler;
use sde_paths::{IncrementSource, Sinusoidal, TimeDependent, TimeGrid};
use statrs::statistics::Statistics;

// Exact ∫₀ᵀ (a + b sin(2πt/P)) dt
fn sinusoid_integral(a: f64, b: f64, period: f64, t: f64) -> f64 {
    let w = 2.0 * std::f64::consts::PI / period;
    a * t + b * (1.0 - (w * t).cos()) / w
}

#[test]
fn test_left_riemann_first_order_convergence() {
    let rate = Sinusoidal::new(0.05, 0.04, 4.0);
    let horizon = 1.0;
    let exact = sinusoid_integral(0.05, 0.04, 4.0, horizon);

    let mut errors = Vec::new();
    for steps in [50, 100, 200, 400] {
        let grid = TimeGrid::new(horizon, steps).unwrap();
        let integrated = integrate_rate(&rate, &grid);
        errors.push((integrated.terminal() - exact).abs());
    }

    for i in 0..(errors.len() - 1) {
        assert!(
            errors[i] > errors[i + 1],
            "Left Riemann sum did not converge as expected at refinement {}",
            i
        );
        // halving dt roughly halves the error
        let ratio = errors[i] / errors[i + 1];
        assert!(ratio > 1.8 && ratio < 2.2, "Convergence ratio {} is not first order", ratio);
    }
}

#[test]
fn test_constant_coefficients_exact_in_distribution() {
    // The log-space step is exact for constant coefficients, so one coarse
    // step and many fine steps driven by the same Brownian motion agree.
    let fine = TimeGrid::new(1.0, 64).unwrap();
    let batch = IncrementSource::new(Some(5))
        .increments(fine.dt(), 64, 1)
        .unwrap();
    let gbm = Gbm::constant(100.0, 0.05, 0.3).unwrap();
    let path = gbm.evolve(&fine, &batch).unwrap();

    let w_t: f64 = batch.path(0).sum();
    let coarse = LogEuler::step(100.0, 0.05, 0.3, 1.0, w_t);

    let fine_terminal = path[[0, 64]];
    assert!((fine_terminal - coarse).abs() / coarse < 1e-12);
}

#[test]
fn test_gbm_terminal_moments() {
    let grid = TimeGrid::new(1.0, 50).unwrap();
    let batch = IncrementSource::new(Some(2024))
        .increments(grid.dt(), 50, 100_000)
        .unwrap();
    let gbm = Gbm::constant(100.0, 0.1, 0.2).unwrap();
    let paths = gbm.evolve(&grid, &batch).unwrap();

    let summary = terminal_summary(paths.view());
    let expected = gbm.expected_value(1.0).unwrap();
    let expected_sd = gbm_moments::variance(100.0, 0.1, 0.2, 1.0).sqrt();

    assert!((summary.mean - expected).abs() / expected < 0.005);
    assert!((summary.std_dev - expected_sd).abs() / expected_sd < 0.02);
}

#[test]
fn test_time_dependent_volatility_converges_in_variance() {
    // With ∫σ(t)² dt fixed, Var[ln S_T] depends only on the integrated variance.
    let vol = TimeDependent(|t: f64| 0.1 + 0.2 * t);
    let integrated_variance = {
        // ∫₀¹ (0.1 + 0.2t)² dt
        0.01 + 0.02 + 0.04 / 3.0
    };

    let grid = TimeGrid::new(1.0, 400).unwrap();
    let batch = IncrementSource::new(Some(99))
        .increments(grid.dt(), 400, 20_000)
        .unwrap();
    let gbm = Gbm::with_volatility(1.0, 0.0, vol, Default::default()).unwrap();
    let paths = gbm.evolve(&grid, &batch).unwrap();

    let log_terminal: Vec<f64> = paths.column(400).iter().map(|s| s.ln()).collect();
    let var = log_terminal.iter().variance();

    assert!(
        (var - integrated_variance).abs() / integrated_variance < 0.05,
        "Var[ln S_T] = {}, expected ≈ {}",
        var,
        integrated_variance
    );
}
