// demos/simulate.rs
//! Runs the three reference scenarios and prints a JSON summary.
//!
//! ```text
//! RUST_LOG=debug cargo run --release --example simulate
//! ```

use sde_paths::analytics::path_stats::{increment_summary, quadratic_variation, terminal_summary};
use sde_paths::mc::mc_engine::{
    simulate_gbm, simulate_gbm_with_volatility, simulate_rate_comparison, simulate_wiener,
    SimConfig,
};
use sde_paths::{IncrementSource, SdeResult, Sinusoidal};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> SdeResult<()> {
    // Brownian motion fan
    let fan_cfg = SimConfig {
        paths: 50,
        steps: 1000,
        t: 1.0,
        seed: Some(42),
        ..Default::default()
    };
    let fan = simulate_wiener(&fan_cfg)?;
    let fan_increments =
        IncrementSource::new(fan.seed).increments(fan.grid.dt(), fan_cfg.steps, fan_cfg.paths)?;
    info!(paths = fan_cfg.paths, steps = fan_cfg.steps, "brownian fan done");

    // Constant vs time-dependent volatility
    let vol_cfg = SimConfig::default();
    let vol = Sinusoidal::new(0.2, 0.1, vol_cfg.t);
    let constant_vol = simulate_gbm(&vol_cfg)?;
    let varying_vol = simulate_gbm_with_volatility(&vol_cfg, vol)?;
    info!(paths = vol_cfg.paths, "volatility comparison done");

    // Constant vs time-dependent rate on one shared Wiener path
    let rate_cfg = SimConfig {
        t: 5.0,
        steps: 500,
        ..Default::default()
    };
    let rate = Sinusoidal::new(0.05, 0.04, rate_cfg.t);
    let rates = simulate_rate_comparison(&rate_cfg, rate)?;
    info!(steps = rate_cfg.steps, "rate comparison done");

    let last = rate_cfg.steps;
    let summary = json!({
        "brownian_fan": {
            "config": fan_cfg,
            "increments": increment_summary(&fan_increments),
            "sqrt_dt": fan.grid.dt().sqrt(),
            "terminal": terminal_summary(fan.paths.view()),
            "quadratic_variation_path0": quadratic_variation(fan.paths.row(0)),
        },
        "volatility_comparison": {
            "config": vol_cfg,
            "volatility": vol,
            "constant_terminal": terminal_summary(constant_vol.paths.view()),
            "time_dependent_terminal": terminal_summary(varying_vol.paths.view()),
        },
        "rate_comparison": {
            "config": rate_cfg,
            "rate": rate,
            "constant_rate_terminal": rates.constant_rate.prices[last],
            "variable_rate_terminal": rates.variable_rate.prices[last],
            "integrated_constant_rate": rates.constant_rate.integrated_rate.terminal(),
            "integrated_variable_rate": rates.variable_rate.integrated_rate.terminal(),
        },
    });

    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("could not serialise summary: {}", e),
    }
    Ok(())
}
