// src/models/mod.rs
pub mod coefficient;
pub mod gbm;
pub mod rate;
pub mod wiener;
