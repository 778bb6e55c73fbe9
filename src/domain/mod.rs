//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input curves and registry records (`Curve`, `TeamRecord`, `Category`, `TeamRegistry`)
//! - selection policy (`SelectConfig`, `BaselineIds`)
//! - selection outputs (`SelectionEntry`, `Selection`, `SelectWarning`)

pub mod registry;
pub mod types;

pub use registry::*;
pub use types::*;
