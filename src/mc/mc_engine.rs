// src/mc/mc_engine.rs
use crate::analytics::path_stats::count_non_finite;
use crate::error::{validation::*, SdeResult};
use crate::grid::TimeGrid;
use crate::models::coefficient::{Coefficient, Constant, VolatilityPolicy};
use crate::models::gbm::Gbm;
use crate::models::rate::{RateDrivenGbm, RatePath};
use crate::models::wiener::WienerProcess;
use crate::rng::{IncrementBatch, IncrementSource};
use ndarray::{Array1, Array2, ArrayView, Dimension};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Parameters shared by every simulation flow
///
/// Missing fields fall back to [`Default`] when deserialised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub paths: usize,
    pub steps: usize,
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
    /// Horizon `T` in years
    pub t: f64,
    /// `None` draws a fresh seed; the one used is reported on the output.
    pub seed: Option<u64>,
    pub volatility_policy: VolatilityPolicy,
}

impl SimConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> SdeResult<()> {
        validate_count("paths", self.paths)?;
        validate_count("steps", self.steps)?;
        validate_positive("s0", self.s0)?;
        validate_finite("r", self.r)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_positive("t", self.t)?;
        if let VolatilityPolicy::Floor(floor) = self.volatility_policy {
            validate_non_negative("volatility floor", floor)?;
        }
        Ok(())
    }

    pub fn grid(&self) -> SdeResult<TimeGrid> {
        TimeGrid::new(self.t, self.steps)
    }

    /// Draw the `(paths, steps)` increments for this configuration.
    pub fn increments(&self, grid: &TimeGrid) -> SdeResult<IncrementBatch> {
        IncrementSource::new(self.seed).increments(grid.dt(), grid.steps(), self.paths)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            paths: 5,
            steps: 252,
            s0: 100.0,
            r: 0.05,
            sigma: 0.2,
            t: 1.0,
            seed: Some(42),
            volatility_policy: VolatilityPolicy::PassThrough,
        }
    }
}

/// Grid plus a `(paths, N + 1)` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutput {
    pub grid: TimeGrid,
    pub paths: Array2<f64>,
    /// Base seed of the increments that drove the run
    pub seed: Option<u64>,
}

/// Constant-rate and time-dependent-rate prices on one shared Wiener path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateComparison {
    pub grid: TimeGrid,
    pub wiener: Array1<f64>,
    pub constant_rate: RatePath,
    pub variable_rate: RatePath,
    pub seed: Option<u64>,
}

/// Brownian motion fan: `cfg.paths` Wiener paths on `[0, cfg.t]`.
///
/// Only `paths`, `steps`, `t` and `seed` are used, but the whole config is
/// validated.
pub fn simulate_wiener(cfg: &SimConfig) -> SdeResult<SimulationOutput> {
    cfg.validate()?;
    let grid = cfg.grid()?;
    let increments = cfg.increments(&grid)?;
    debug!(paths = cfg.paths, steps = cfg.steps, "simulating wiener paths");

    let paths = WienerProcess::build(&increments);
    Ok(SimulationOutput {
        grid,
        paths,
        seed: increments.seed(),
    })
}

/// GBM with constant `cfg.r` and `cfg.sigma`.
pub fn simulate_gbm(cfg: &SimConfig) -> SdeResult<SimulationOutput> {
    cfg.validate()?;
    let gbm = Gbm::constant(cfg.s0, cfg.r, cfg.sigma)?;
    run_gbm(cfg, &gbm)
}

/// GBM with constant `cfg.r` and volatility `vol(t)`; `cfg.sigma` is ignored.
///
/// For a given seed the increments are the ones [`simulate_gbm`] uses, so
/// the two runs differ only through the volatility term.
pub fn simulate_gbm_with_volatility<V: Coefficient>(
    cfg: &SimConfig,
    vol: V,
) -> SdeResult<SimulationOutput> {
    cfg.validate()?;
    let gbm = Gbm::with_volatility(cfg.s0, cfg.r, vol, cfg.volatility_policy)?;
    run_gbm(cfg, &gbm)
}

/// One Wiener path priced under the constant rate `cfg.r` and under `rate(t)`.
///
/// `cfg.paths` is ignored: the comparison is always made on a single path.
pub fn simulate_rate_comparison<R: Coefficient>(
    cfg: &SimConfig,
    rate: R,
) -> SdeResult<RateComparison> {
    cfg.validate()?;
    let constant_model = RateDrivenGbm::new(cfg.s0, cfg.sigma, Constant(cfg.r))?;
    let variable_model = RateDrivenGbm::new(cfg.s0, cfg.sigma, rate)?;

    let grid = cfg.grid()?;
    let increments = IncrementSource::new(cfg.seed).increments(grid.dt(), grid.steps(), 1)?;
    debug!(steps = cfg.steps, t = cfg.t, "simulating rate comparison");

    let wiener = WienerProcess::single_path(increments.path(0));
    let constant_rate = constant_model.price_path(&grid, wiener.view())?;
    let variable_rate = variable_model.price_path(&grid, wiener.view())?;

    report_non_finite("constant-rate prices", constant_rate.prices.view());
    report_non_finite("variable-rate prices", variable_rate.prices.view());

    Ok(RateComparison {
        grid,
        wiener,
        constant_rate,
        variable_rate,
        seed: increments.seed(),
    })
}

fn run_gbm<D: Coefficient, V: Coefficient>(
    cfg: &SimConfig,
    gbm: &Gbm<D, V>,
) -> SdeResult<SimulationOutput> {
    let grid = cfg.grid()?;
    let increments = cfg.increments(&grid)?;
    debug!(
        paths = cfg.paths,
        steps = cfg.steps,
        s0 = cfg.s0,
        r = cfg.r,
        "simulating gbm paths"
    );

    let paths = gbm.evolve(&grid, &increments)?;
    report_non_finite("gbm prices", paths.view());

    Ok(SimulationOutput {
        grid,
        paths,
        seed: increments.seed(),
    })
}

fn report_non_finite<D: Dimension>(what: &str, values: ArrayView<'_, f64, D>) {
    let bad = count_non_finite(values);
    if bad > 0 {
        warn!(non_finite = bad, "{} contain non-finite values", what);
    }
}
