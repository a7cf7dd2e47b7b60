// src/models/wiener.rs
//! Standard Brownian motion (Wiener process)
//!
//! A discretised Wiener path is the running sum of its increments:
//! ```text
//! W_0 = 0,   W_k = W_{k-1} + ΔW_{k-1},   ΔW ~ N(0, dt)
//! ```
//! All randomness is resolved upstream in [`crate::rng`]; building the path is
//! a pure transform of the increment batch.

use crate::rng::IncrementBatch;
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Zip};

pub struct WienerProcess;

impl WienerProcess {
    /// Cumulate every row of `increments` into a path of length `N + 1`.
    ///
    /// Rows are independent and processed in parallel; the summation order
    /// within a row is strictly left to right.
    pub fn build(increments: &IncrementBatch) -> Array2<f64> {
        let (paths, steps) = increments.shape();
        let mut out = Array2::zeros((paths, steps + 1));

        Zip::from(out.rows_mut())
            .and(increments.values().rows())
            .par_for_each(|path, dws| Self::cumulate(dws, path));

        out
    }

    /// Single path from a one-dimensional increment sequence.
    pub fn single_path(increments: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut path = Array1::zeros(increments.len() + 1);
        Self::cumulate(increments, path.view_mut());
        path
    }

    fn cumulate(dws: ArrayView1<'_, f64>, mut path: ArrayViewMut1<'_, f64>) {
        let mut current = 0.0;
        path[0] = current;
        for (k, dw) in dws.iter().enumerate() {
            current += dw;
            path[k + 1] = current;
        }
    }
}
