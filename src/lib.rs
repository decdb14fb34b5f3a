//! Meta-optimization of multi-objective evolutionary algorithms.
//!
//! A parameter space describes a family of configurable algorithms. Each
//! candidate configuration is encoded as a vector in the unit hypercube,
//! decoded, built into a runnable algorithm and scored on a set of training
//! problems with quality indicators. An outer NSGA-II searches that space.

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod operators;
pub mod problems;
pub mod types;

pub use error::{MetaError, Result};
pub use types::{Front, ParameterValue, Solution};
