//! Numeric primitives: optimum solvers and Pareto reduction.

pub mod pareto;
pub mod smin;

pub use pareto::*;
pub use smin::*;
