// src/rng.rs
//! Gaussian increments for path simulation
//!
//! # Design
//!
//! All randomness in the crate comes from this module. A run owns one
//! [`RngFactory`] built from a single base seed; every path gets its own
//! `StdRng` seeded with a SplitMix64 mix of `(base_seed, path_index)`, so
//! neighbouring base seeds do not share shifted rows. This gives:
//! 1. **Reproducibility**: same seed → bit-identical increments, across runs
//!    and process invocations
//! 2. **Parallel safety**: paths are generated on the rayon pool without any
//!    shared generator, and the result does not depend on the thread count
//! 3. **Isolation**: no process-wide generator state, so concurrent runs never
//!    perturb each other
//!
//! # Scaling
//!
//! Increments are drawn directly as `ΔW ~ N(0, dt)`, i.e. with standard
//! deviation `√dt`, so they can be summed into a Wiener path without further
//! scaling.

use crate::error::{validation::*, SdeError, SdeResult};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Per-path generator factory for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Factory seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Generator for a specific path
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.path_seed(path_id))
    }

    /// Seed handed to the generator of `path_id`.
    pub fn path_seed(&self, path_id: u64) -> u64 {
        splitmix64(self.base_seed ^ path_id.wrapping_mul(GOLDEN_GAMMA))
    }
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer
#[inline]
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Independent `N(0, dt)` increments laid out as `(paths, steps)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncrementBatch {
    dt: f64,
    seed: Option<u64>,
    values: Array2<f64>,
}

impl IncrementBatch {
    /// Wrap externally produced increments.
    ///
    /// The values are taken as already scaled to the step size `dt`.
    pub fn from_array(dt: f64, values: Array2<f64>) -> SdeResult<Self> {
        validate_positive("dt", dt)?;
        validate_count("paths", values.nrows())?;
        validate_count("steps", values.ncols())?;
        Ok(Self {
            dt,
            seed: None,
            values,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Base seed that produced the batch, `None` for caller-supplied data.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn paths(&self) -> usize {
        self.values.nrows()
    }

    pub fn steps(&self) -> usize {
        self.values.ncols()
    }

    /// `(paths, steps)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn path(&self, p: usize) -> ArrayView1<'_, f64> {
        self.values.index_axis(Axis(0), p)
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }
}

/// Source of Gaussian increments for one run
#[derive(Debug, Clone)]
pub struct IncrementSource {
    factory: RngFactory,
}

impl IncrementSource {
    /// `Some(seed)` makes every batch reproducible; `None` draws a fresh base
    /// seed from OS entropy (recorded on each produced batch).
    pub fn new(seed: Option<u64>) -> Self {
        let factory = match seed {
            Some(seed) => RngFactory::new(seed),
            None => RngFactory::from_entropy(),
        };
        Self { factory }
    }

    pub fn seed(&self) -> u64 {
        self.factory.base_seed()
    }

    /// Draw a `(paths, steps)` batch of `N(0, √dt)` increments.
    pub fn increments(&self, dt: f64, steps: usize, paths: usize) -> SdeResult<IncrementBatch> {
        validate_positive("dt", dt)?;
        validate_count("steps", steps)?;
        validate_count("paths", paths)?;

        let normal = Normal::new(0.0, dt.sqrt()).map_err(|e| SdeError::InvalidParameter {
            parameter: "dt".to_string(),
            value: dt,
            constraint: e.to_string(),
        })?;

        debug!(
            paths,
            steps,
            dt,
            seed = self.factory.base_seed(),
            "sampling increment batch"
        );

        let factory = self.factory;
        let flat: Vec<f64> = (0..paths)
            .into_par_iter()
            .flat_map_iter(|p| {
                let mut rng = factory.create_std_rng(p as u64);
                (0..steps)
                    .map(|_| normal.sample(&mut rng))
                    .collect::<Vec<f64>>()
            })
            .collect();

        let drawn = flat.len();
        let values = Array2::from_shape_vec((paths, steps), flat).map_err(|_| {
            SdeError::DimensionMismatch {
                context: "increment batch".to_string(),
                expected: paths * steps,
                actual: drawn,
            }
        })?;

        Ok(IncrementBatch {
            dt,
            seed: Some(factory.base_seed()),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::statistics::Statistics;

    #[test]
    fn test_factory_reproducibility() {
        let factory = RngFactory::new(42);
        let normal = Normal::new(0.0, 1.0).unwrap();

        let mut rng1 = factory.create_std_rng(0);
        let mut rng2 = factory.create_std_rng(0);

        for _ in 0..100 {
            let a: f64 = normal.sample(&mut rng1);
            let b: f64 = normal.sample(&mut rng2);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_factory_different_paths() {
        let factory = RngFactory::new(42);
        let normal = Normal::new(0.0, 1.0).unwrap();

        let mut rng1 = factory.create_std_rng(0);
        let mut rng2 = factory.create_std_rng(1);

        let vals1: Vec<f64> = (0..10).map(|_| normal.sample(&mut rng1)).collect();
        let vals2: Vec<f64> = (0..10).map(|_| normal.sample(&mut rng2)).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_batch_shape_and_seed() {
        let source = IncrementSource::new(Some(7));
        let batch = source.increments(0.01, 100, 3).unwrap();
        assert_eq!(batch.shape(), (3, 100));
        assert_eq!(batch.seed(), Some(7));
        assert_eq!(batch.dt(), 0.01);
    }

    #[test]
    fn test_same_seed_same_batch() {
        let a = IncrementSource::new(Some(42)).increments(0.004, 252, 8).unwrap();
        let b = IncrementSource::new(Some(42)).increments(0.004, 252, 8).unwrap();
        assert_eq!(a, b);

        let c = IncrementSource::new(Some(43)).increments(0.004, 252, 8).unwrap();
        assert_ne!(a.values(), c.values());
    }

    #[test]
    fn test_neighbouring_seeds_share_no_paths() {
        let a = IncrementSource::new(Some(42)).increments(0.01, 100, 5).unwrap();
        let b = IncrementSource::new(Some(43)).increments(0.01, 100, 5).unwrap();

        for p in 0..5 {
            for q in 0..5 {
                assert_ne!(a.path(p), b.path(q), "seed 42 row {} equals seed 43 row {}", p, q);
            }
        }
    }

    #[test]
    fn test_path_seeds_are_distinct() {
        let f42 = RngFactory::new(42);
        let f43 = RngFactory::new(43);
        let mut seeds: Vec<u64> = (0..64)
            .flat_map(|p| [f42.path_seed(p), f43.path_seed(p)])
            .collect();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 128);
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let source = IncrementSource::new(None);
        let batch = source.increments(0.01, 10, 2).unwrap();
        let replay = IncrementSource::new(batch.seed()).increments(0.01, 10, 2).unwrap();
        assert_eq!(batch.values(), replay.values());
    }

    #[test]
    fn test_increment_scaling() {
        let dt = 1.0 / 1000.0;
        let batch = IncrementSource::new(Some(42))
            .increments(dt, 1000, 50)
            .unwrap();

        let mean = batch.values().iter().mean();
        let std_dev = batch.values().iter().std_dev();

        assert!(mean.abs() < 0.001, "Mean should be close to 0, got {}", mean);
        assert!(
            (std_dev / dt.sqrt() - 1.0).abs() < 0.01,
            "Std dev should be close to {}, got {}",
            dt.sqrt(),
            std_dev
        );
    }

    #[test]
    fn test_invalid_requests() {
        let source = IncrementSource::new(Some(1));
        assert!(source.increments(0.0, 10, 1).is_err());
        assert!(source.increments(-0.1, 10, 1).is_err());
        assert!(source.increments(0.1, 0, 1).is_err());
        assert!(source.increments(0.1, 10, 0).is_err());
        assert!(IncrementBatch::from_array(0.1, Array2::zeros((0, 3))).is_err());
    }
}
