// src/mc/mod.rs
pub mod mc_engine;
