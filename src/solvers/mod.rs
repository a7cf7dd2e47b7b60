// src/solvers/mod.rs
pub mod log_euler;
pub mod quadrature;
