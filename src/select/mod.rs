//! Method selection for the S-min comparison plot.
//!
//! Responsibilities:
//!
//! - strip the degenerate tau = 0 point from each curve
//! - classify each curve (baseline / candidate / skipped), in parallel
//! - rank candidates by S-min and keep the best method per PI

pub mod classify;
pub mod engine;
pub mod preprocess;

pub use classify::*;
pub use engine::*;
pub use preprocess::*;
