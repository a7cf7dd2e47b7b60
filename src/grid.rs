// src/grid.rs
//! Uniform time discretisation shared by every simulator.
//!
//! ```text
//! t_k = k * dt,   dt = T / N,   k = 0..=N
//! ```
//!
//! The last point is pinned to `T` exactly so that downstream consumers never
//! see `N * dt` drift away from the requested horizon.

use crate::error::{validation::*, SdeResult};
use ndarray::{s, Array1, ArrayView1};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    horizon: f64,
    dt: f64,
    points: Array1<f64>,
}

impl TimeGrid {
    /// Build the grid `{0, dt, ..., T}` with `steps` intervals.
    pub fn new(horizon: f64, steps: usize) -> SdeResult<Self> {
        validate_positive("horizon", horizon)?;
        validate_count("steps", steps)?;

        let dt = horizon / steps as f64;
        let mut points = Array1::from_shape_fn(steps + 1, |k| k as f64 * dt);
        points[steps] = horizon;

        Ok(TimeGrid {
            horizon,
            dt,
            points,
        })
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of intervals `N` (the grid holds `N + 1` points).
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    pub fn points(&self) -> ArrayView1<'_, f64> {
        self.points.view()
    }

    /// Start-of-step times `t_0..t_{N-1}`, one per interval.
    pub fn left_endpoints(&self) -> ArrayView1<'_, f64> {
        self.points.slice(s![..-1])
    }
}
