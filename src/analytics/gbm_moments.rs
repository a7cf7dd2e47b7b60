// src/analytics/gbm_moments.rs
//! Closed-form GBM moments used as references for simulated paths
//!
//! Under constant coefficients:
//! ```text
//! E[S_t]   = S_0 e^{rt}
//! Var[S_t] = S_0² e^{2rt} (e^{σ²t} - 1)
//! ```

use crate::grid::TimeGrid;
use ndarray::Array1;

/// `E[S_t] = S_0 e^{rt}`
pub fn expected_value(s0: f64, r: f64, t: f64) -> f64 {
    s0 * (r * t).exp()
}

/// `Var[S_t] = S_0² e^{2rt} (e^{σ²t} - 1)`
pub fn variance(s0: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let mean = expected_value(s0, r, t);
    mean * mean * ((sigma * sigma * t).exp() - 1.0)
}

/// Path a GBM collapses to when `σ = 0`: `S_0 e^{r t_k}` on every grid point.
pub fn deterministic_curve(s0: f64, r: f64, grid: &TimeGrid) -> Array1<f64> {
    grid.points().mapv(|t| expected_value(s0, r, t))
}
