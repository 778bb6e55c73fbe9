//! Reporting utilities: formatted terminal output for selections.

pub mod format;

pub use format::*;
