// src/models/rate.rs
//! GBM driven by a time-dependent short rate
//!
//! # Mathematical Framework
//!
//! Under the risk-neutral measure with deterministic rate `r(t)`:
//! ```text
//! S_t = S_0 * exp(∫₀ᵗ r(s) ds - ½σ²t + σW_t)
//! ```
//! The rate integral is replaced by its left Riemann sum `R_k`, so the price
//! is evaluated directly on a given Wiener path instead of stepped forward.
//! Feeding the same Wiener path to a constant-rate and a time-dependent-rate
//! model isolates the effect of the rate term.

use super::coefficient::Coefficient;
use crate::error::{validation::*, SdeResult};
use crate::grid::TimeGrid;
use crate::solvers::quadrature::left_riemann_cumulative;
use ndarray::{Array1, ArrayView1, Zip};
use serde::Serialize;

/// Cumulative rate integral `R_k ≈ ∫₀^{t_k} r(s) ds`, with `R_0 = 0`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegratedRate {
    values: Array1<f64>,
}

impl IntegratedRate {
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Value at the horizon
    pub fn terminal(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}

pub fn integrate_rate<C: Coefficient + ?Sized>(rate: &C, grid: &TimeGrid) -> IntegratedRate {
    IntegratedRate {
        values: left_riemann_cumulative(rate, grid),
    }
}

/// Integrated rate together with the price path it produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatePath {
    pub integrated_rate: IntegratedRate,
    pub prices: Array1<f64>,
}

#[derive(Debug, Clone)]
pub struct RateDrivenGbm<R> {
    pub s0: f64,
    pub sigma: f64,
    pub rate: R,
}

impl<R: Coefficient> RateDrivenGbm<R> {
    pub fn new(s0: f64, sigma: f64, rate: R) -> SdeResult<Self> {
        validate_positive("s0", s0)?;
        validate_non_negative("sigma", sigma)?;
        if let Some(r) = rate.constant_value() {
            validate_finite("r", r)?;
        }
        Ok(RateDrivenGbm { s0, sigma, rate })
    }

    /// Price path on a shared Wiener path `wiener` of length `N + 1`.
    pub fn price_path(&self, grid: &TimeGrid, wiener: ArrayView1<'_, f64>) -> SdeResult<RatePath> {
        validate_len("wiener path", grid.steps() + 1, wiener.len())?;

        let integrated_rate = integrate_rate(&self.rate, grid);
        let half_var = 0.5 * self.sigma * self.sigma;

        let mut prices = Array1::zeros(wiener.len());
        Zip::from(&mut prices)
            .and(integrated_rate.values())
            .and(grid.points())
            .and(wiener)
            .for_each(|s, &r_int, &t, &w| {
                *s = self.s0 * (r_int - half_var * t + self.sigma * w).exp();
            });

        Ok(RatePath {
            integrated_rate,
            prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::coefficient::{Constant, Sinusoidal};
    use crate::models::gbm::Gbm;
    use crate::models::wiener::WienerProcess;
    use crate::rng::IncrementSource;
    use approx::assert_relative_eq;

    #[test]
    fn test_integrated_rate_starts_at_zero() {
        let grid = TimeGrid::new(5.0, 500).unwrap();
        let rate = Sinusoidal::new(0.05, 0.04, 5.0);
        let integrated = integrate_rate(&rate, &grid);
        assert_eq!(integrated.values()[0], 0.0);
        assert_eq!(integrated.values().len(), 501);
        // one full period of the sine integrates to ~0, leaving base * T
        assert_relative_eq!(integrated.terminal(), 0.25, max_relative = 1e-3);
    }

    #[test]
    fn test_constant_rate_matches_stepped_gbm() {
        let grid = TimeGrid::new(1.0, 252).unwrap();
        let batch = IncrementSource::new(Some(42))
            .increments(grid.dt(), 252, 1)
            .unwrap();
        let wiener = WienerProcess::build(&batch);

        let rate_model = RateDrivenGbm::new(100.0, 0.2, Constant(0.05)).unwrap();
        let closed_form = rate_model.price_path(&grid, wiener.row(0)).unwrap();

        let stepped = Gbm::constant(100.0, 0.05, 0.2)
            .unwrap()
            .evolve(&grid, &batch)
            .unwrap();

        assert_eq!(closed_form.prices[0], 100.0);
        for (a, b) in closed_form.prices.iter().zip(stepped.row(0).iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-10);
        }
    }

    #[test]
    fn test_rate_term_is_only_difference() {
        let grid = TimeGrid::new(5.0, 500).unwrap();
        let batch = IncrementSource::new(Some(42))
            .increments(grid.dt(), 500, 1)
            .unwrap();
        let wiener = WienerProcess::single_path(batch.path(0));

        let constant = RateDrivenGbm::new(100.0, 0.2, Constant(0.05))
            .unwrap()
            .price_path(&grid, wiener.view())
            .unwrap();
        let variable = RateDrivenGbm::new(100.0, 0.2, Sinusoidal::new(0.05, 0.04, 5.0))
            .unwrap()
            .price_path(&grid, wiener.view())
            .unwrap();

        for k in 0..=500 {
            let log_ratio = (variable.prices[k] / constant.prices[k]).ln();
            let rate_gap =
                variable.integrated_rate.values()[k] - constant.integrated_rate.values()[k];
            assert_relative_eq!(log_ratio, rate_gap, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_wiener_length_mismatch() {
        let grid = TimeGrid::new(1.0, 10).unwrap();
        let model = RateDrivenGbm::new(100.0, 0.2, Constant(0.05)).unwrap();
        let short = Array1::zeros(10);
        assert!(model.price_path(&grid, short.view()).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RateDrivenGbm::new(0.0, 0.2, Constant(0.05)).is_err());
        assert!(RateDrivenGbm::new(100.0, -0.2, Constant(0.05)).is_err());
        assert!(RateDrivenGbm::new(100.0, 0.2, Constant(f64::INFINITY)).is_err());
    }
}
