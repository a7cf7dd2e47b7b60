// src/solvers/quadrature.rs
//! Cumulative quadrature of a rate curve over a time grid
//!
//! Uses the left Riemann sum
//! ```text
//! R_0 = 0,   R_k = R_{k-1} + r(t_{k-1}) Δt
//! ```
//! which approximates `∫₀^{t_k} r(s) ds` with O(Δt) error. The rate is never
//! evaluated at the horizon itself.

use crate::grid::TimeGrid;
use crate::models::coefficient::Coefficient;
use ndarray::Array1;

pub fn left_riemann_cumulative<C: Coefficient + ?Sized>(rate: &C, grid: &TimeGrid) -> Array1<f64> {
    let dt = grid.dt();
    let samples = rate.left_samples(grid);

    let mut out = Array1::zeros(grid.steps() + 1);
    let mut acc = 0.0;
    for (k, r) in samples.iter().enumerate() {
        acc += r * dt;
        out[k + 1] = acc;
    }
    out
}
