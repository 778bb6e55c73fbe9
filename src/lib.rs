//! `pfp-curves` library crate.
//!
//! Picks the methods shown in a protein-function-prediction S-min plot: the
//! best submission of each of the top PIs, plus the naive and BLAST baselines.
//!
//! The binary (`pfp`) is a thin wrapper around this library so that:
//!
//! - the selection logic is testable without spawning processes
//! - the engine can be driven from other front-ends (notebooks, plot scripts)

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod select;
