pub mod calculator;
pub mod config;
pub mod error;
pub mod faker;
pub mod generator;
pub mod params;
pub mod rng;
pub mod suite;
