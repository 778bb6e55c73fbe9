//! Synthetic benchmark data for dry runs.

pub mod sample;

pub use sample::*;
