// src/models/coefficient.rs
//! Drift and volatility as functions of calendar time
//!
//! Every evolver in the crate reads its coefficients through [`Coefficient`],
//! so a constant rate and a time-dependent rate go through the same update.
//! Implementations must be pure: the engine may evaluate them at any grid
//! point, in any order, any number of times.

use crate::grid::TimeGrid;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

pub trait Coefficient {
    /// Coefficient value at time `t`
    fn value_at(&self, t: f64) -> f64;

    /// `Some(v)` when the coefficient does not depend on time.
    fn constant_value(&self) -> Option<f64> {
        None
    }

    /// Start-of-step values `c(t_0), ..., c(t_{N-1})`, one per interval.
    fn left_samples(&self, grid: &TimeGrid) -> Array1<f64> {
        grid.left_endpoints().mapv(|t| self.value_at(t))
    }
}

impl<C: Coefficient + ?Sized> Coefficient for &C {
    fn value_at(&self, t: f64) -> f64 {
        (**self).value_at(t)
    }

    fn constant_value(&self) -> Option<f64> {
        (**self).constant_value()
    }
}

/// Time-independent coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constant(pub f64);

impl Coefficient for Constant {
    fn value_at(&self, _t: f64) -> f64 {
        self.0
    }

    fn constant_value(&self) -> Option<f64> {
        Some(self.0)
    }
}

/// Arbitrary function of time, e.g. a closure
#[derive(Clone, Copy)]
pub struct TimeDependent<F>(pub F);

impl<F: Fn(f64) -> f64> Coefficient for TimeDependent<F> {
    fn value_at(&self, t: f64) -> f64 {
        (self.0)(t)
    }
}

/// `base + amplitude * sin(2πt / period)`
///
/// With `period` equal to the simulation horizon this completes one full
/// oscillation over the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sinusoidal {
    pub base: f64,
    pub amplitude: f64,
    pub period: f64,
}

impl Sinusoidal {
    pub fn new(base: f64, amplitude: f64, period: f64) -> Self {
        Sinusoidal {
            base,
            amplitude,
            period,
        }
    }
}

impl Coefficient for Sinusoidal {
    fn value_at(&self, t: f64) -> f64 {
        self.base + self.amplitude * (2.0 * PI * t / self.period).sin()
    }
}

/// What to do with a negative volatility sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum VolatilityPolicy {
    /// Use the sampled value unchanged, even if negative.
    #[default]
    PassThrough,
    /// Replace every sample by `max(floor, sigma)`.
    Floor(f64),
}

impl VolatilityPolicy {
    pub fn apply(&self, sigma: f64) -> f64 {
        match *self {
            VolatilityPolicy::PassThrough => sigma,
            VolatilityPolicy::Floor(floor) => sigma.max(floor),
        }
    }

    /// Sample `vol` at the start of each step and apply the policy.
    pub fn schedule<V: Coefficient + ?Sized>(&self, vol: &V, grid: &TimeGrid) -> Array1<f64> {
        let mut sigmas = vol.left_samples(grid);
        sigmas.mapv_inplace(|s| self.apply(s));

        let negative = sigmas.iter().filter(|s| **s < 0.0).count();
        if negative > 0 {
            warn!(
                negative_steps = negative,
                steps = sigmas.len(),
                "negative volatility passed through to the diffusion term"
            );
        }
        sigmas
    }
}
