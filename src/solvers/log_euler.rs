// src/solvers/log_euler.rs
//! Log-space Euler scheme for geometric Brownian motion
//!
//! # Mathematical Framework
//!
//! For the GBM SDE with time-dependent coefficients
//! ```text
//! dS_t = r(t) S_t dt + σ(t) S_t dW_t
//! ```
//! Itô's lemma gives `d ln S_t = (r(t) - ½σ(t)²) dt + σ(t) dW_t`. Freezing the
//! coefficients at the start of each step yields the update
//! ```text
//! S_{k} = S_{k-1} * exp((r_{k-1} - ½σ_{k-1}²) Δt + σ_{k-1} ΔW_{k-1})
//! ```
//!
//! # Properties
//!
//! - **Exact** for constant coefficients (no discretisation error per step)
//! - **Positivity**: the exponential keeps every price strictly positive
//! - Time-dependent coefficients are first-order (left endpoint) in Δt
//!
//! # Overflow
//!
//! The exponential is not guarded. Extreme inputs produce `inf`/`NaN` in the
//! output table rather than a clamped value.

use crate::error::{validation::validate_len, SdeResult};
use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

pub struct LogEuler;

impl LogEuler {
    /// Single log-space step
    #[inline]
    pub fn step(s: f64, drift: f64, sigma: f64, dt: f64, dw: f64) -> f64 {
        s * ((drift - 0.5 * sigma * sigma) * dt + sigma * dw).exp()
    }

    /// Evolve every row of `increments` from `s0`.
    ///
    /// `drift[k]` and `sigma[k]` hold the coefficients for the step from
    /// `t_k` to `t_{k+1}` and are shared by all paths. Paths run in parallel,
    /// steps within a path run sequentially. Both schedules must hold one
    /// entry per increment column.
    pub fn evolve(
        s0: f64,
        drift: ArrayView1<'_, f64>,
        sigma: ArrayView1<'_, f64>,
        dt: f64,
        increments: ArrayView2<'_, f64>,
    ) -> SdeResult<Array2<f64>> {
        let (paths, steps) = increments.dim();
        validate_len("drift schedule", steps, drift.len())?;
        validate_len("volatility schedule", steps, sigma.len())?;
        let mut out = Array2::zeros((paths, steps + 1));

        Zip::from(out.rows_mut())
            .and(increments.rows())
            .par_for_each(|mut path, dws| {
                let mut current = s0;
                path[0] = current;
                for k in 0..steps {
                    current = Self::step(current, drift[k], sigma[k], dt, dws[k]);
                    path[k + 1] = current;
                }
            });

        Ok(out)
    }
}
