// src/analytics/mod.rs
pub mod gbm_moments;
pub mod path_stats;
