// src/models/gbm.rs
//! Geometric Brownian motion
//!
//! ```text
//! dS_t = r(t) S_t dt + σ(t) S_t dW_t
//! ```
//!
//! One model covers both the constant-coefficient case and the
//! time-dependent-volatility case: drift and volatility are [`Coefficient`]s,
//! sampled once per step at the start-of-step time and shared by all paths.

use super::coefficient::{Coefficient, Constant, VolatilityPolicy};
use crate::error::{validation::*, SdeResult};
use crate::grid::TimeGrid;
use crate::rng::IncrementBatch;
use crate::solvers::log_euler::LogEuler;
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct Gbm<D, V> {
    pub s0: f64,
    pub drift: D,
    pub volatility: V,
    pub policy: VolatilityPolicy,
}

impl Gbm<Constant, Constant> {
    /// Constant drift `r` and volatility `sigma ≥ 0`.
    pub fn constant(s0: f64, r: f64, sigma: f64) -> SdeResult<Self> {
        Gbm::new(s0, Constant(r), Constant(sigma), VolatilityPolicy::PassThrough)
    }
}

impl<V: Coefficient> Gbm<Constant, V> {
    /// Constant drift `r` with volatility re-evaluated at every step.
    pub fn with_volatility(s0: f64, r: f64, volatility: V, policy: VolatilityPolicy) -> SdeResult<Self> {
        Gbm::new(s0, Constant(r), volatility, policy)
    }
}

impl<D: Coefficient, V: Coefficient> Gbm<D, V> {
    pub fn new(s0: f64, drift: D, volatility: V, policy: VolatilityPolicy) -> SdeResult<Self> {
        validate_positive("s0", s0)?;
        if let Some(r) = drift.constant_value() {
            validate_finite("r", r)?;
        }
        if let Some(sigma) = volatility.constant_value() {
            validate_non_negative("sigma", sigma)?;
        }
        if let VolatilityPolicy::Floor(floor) = policy {
            validate_non_negative("volatility floor", floor)?;
        }

        Ok(Gbm {
            s0,
            drift,
            volatility,
            policy,
        })
    }

    /// Simulate one price path per increment row.
    ///
    /// Returns a `(paths, N + 1)` table with `S0` in the first column. The
    /// batch must have been sampled with the grid's `dt` and step count.
    pub fn evolve(&self, grid: &TimeGrid, increments: &IncrementBatch) -> SdeResult<Array2<f64>> {
        validate_len("increment batch steps", grid.steps(), increments.steps())?;
        validate_step_size("increment batch dt", grid.dt(), increments.dt())?;

        let drift = self.drift.left_samples(grid);
        let sigma = self.policy.schedule(&self.volatility, grid);

        LogEuler::evolve(
            self.s0,
            drift.view(),
            sigma.view(),
            grid.dt(),
            increments.values(),
        )
    }

    /// Expected price `E[S_t] = S0 * exp(∫₀ᵗ r(s) ds)` for a constant drift.
    pub fn expected_value(&self, t: f64) -> Option<f64> {
        self.drift
            .constant_value()
            .map(|r| crate::analytics::gbm_moments::expected_value(self.s0, r, t))
    }
}
