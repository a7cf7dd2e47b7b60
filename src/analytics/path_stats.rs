// src/analytics/path_stats.rs
//! Sample statistics over simulated increments and path tables

use crate::rng::IncrementBatch;
use ndarray::{ArrayView, ArrayView1, ArrayView2, Dimension};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::borrow::Borrow;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    /// Unbiased (n - 1) sample standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSummary {
    /// Summarise a sample. Following statrs, every statistic of an empty
    /// sample is `NaN`, and `std_dev` is `NaN` for fewer than two values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator + Clone,
        I::Item: Borrow<f64>,
    {
        SampleSummary {
            count: values.clone().into_iter().count(),
            mean: <I as Statistics<f64>>::mean(values.clone()),
            std_dev: <I as Statistics<f64>>::std_dev(values.clone()),
            min: <I as Statistics<f64>>::min(values.clone()),
            max: <I as Statistics<f64>>::max(values),
        }
    }
}

/// Summary of every increment in the batch; `std_dev` should approach `√dt`.
pub fn increment_summary(batch: &IncrementBatch) -> SampleSummary {
    SampleSummary::from_values(batch.values().iter())
}

/// Summary of the last column of a `(paths, N + 1)` table.
///
/// A single-path table gives `std_dev = NaN`; a table without columns gives
/// an empty summary (`count = 0`, all statistics `NaN`).
pub fn terminal_summary(paths: ArrayView2<'_, f64>) -> SampleSummary {
    match paths.ncols().checked_sub(1) {
        Some(last) => SampleSummary::from_values(paths.column(last).iter()),
        None => SampleSummary::from_values(std::iter::empty::<&f64>()),
    }
}

/// `Σ (X_{k+1} - X_k)²`; tends to `T` for a Brownian path as `dt → 0`.
pub fn quadratic_variation(path: ArrayView1<'_, f64>) -> f64 {
    path.iter()
        .zip(path.iter().skip(1))
        .map(|(a, b)| {
            let diff = b - a;
            diff * diff
        })
        .sum()
}

/// Number of `NaN`/`±inf` entries in a path or table.
pub fn count_non_finite<D: Dimension>(values: ArrayView<'_, f64, D>) -> usize {
    values.iter().filter(|v| !v.is_finite()).count()
}
