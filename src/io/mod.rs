//! Input/output helpers.
//!
//! - curve JSON + team registry ingest (`ingest`)
//! - selection exports (JSON/CSV) and dataset writers (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
