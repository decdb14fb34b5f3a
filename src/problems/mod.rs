//! Training problems for the base-level algorithm.
//!
//! Problems are minimization problems over box-constrained real variables.
//! Evaluation returns `anyhow::Result` so that custom problems can signal
//! numerical failures; the meta-level contains those per candidate.

pub mod zdt;
pub mod dtlz;

use crate::error::{MetaError, Result};
use std::sync::Arc;

pub use dtlz::Dtlz2;
pub use zdt::{Zdt1, Zdt2, Zdt3, Zdt4, Zdt6};

pub trait Problem: Send + Sync {
    fn name(&self) -> &str;

    fn number_of_variables(&self) -> usize;

    fn number_of_objectives(&self) -> usize;

    /// `(lower, upper)` bound per variable
    fn bounds(&self) -> Vec<(f64, f64)>;

    fn evaluate(&self, variables: &[f64]) -> anyhow::Result<Vec<f64>>;
}

/// Resolve a benchmark by name, optionally with a variable count: `ZDT1`, `ZDT4:10`
pub fn problem_by_name(spec: &str) -> Result<Arc<dyn Problem>> {
    let (name, variables) = match spec.split_once(':') {
        Some((name, count)) => {
            let count = count.trim().parse::<usize>().map_err(|_| {
                MetaError::Configuration(format!("invalid variable count in problem '{}'", spec))
            })?;
            (name.trim(), Some(count))
        }
        None => (spec.trim(), None),
    };

    if variables == Some(0) {
        return Err(MetaError::Configuration(format!(
            "problem '{}' needs at least one variable",
            spec
        )));
    }

    let problem: Arc<dyn Problem> = match name.to_ascii_uppercase().as_str() {
        "ZDT1" => Arc::new(Zdt1::new(variables.unwrap_or(30))),
        "ZDT2" => Arc::new(Zdt2::new(variables.unwrap_or(30))),
        "ZDT3" => Arc::new(Zdt3::new(variables.unwrap_or(30))),
        "ZDT4" => Arc::new(Zdt4::new(variables.unwrap_or(10))),
        "ZDT6" => Arc::new(Zdt6::new(variables.unwrap_or(10))),
        "DTLZ2" => Arc::new(Dtlz2::new(variables.unwrap_or(12), 3)),
        _ => {
            return Err(MetaError::Configuration(format!(
                "unknown training problem '{}'",
                name
            )))
        }
    };
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_lookup() {
        let problem = problem_by_name("ZDT1").unwrap();
        assert_eq!(problem.number_of_variables(), 30);
        assert_eq!(problem.number_of_objectives(), 2);

        let problem = problem_by_name("zdt4:5").unwrap();
        assert_eq!(problem.number_of_variables(), 5);

        let problem = problem_by_name("DTLZ2").unwrap();
        assert_eq!(problem.number_of_objectives(), 3);
    }

    #[test]
    fn test_unknown_problem() {
        assert!(matches!(problem_by_name("WFG9"), Err(MetaError::Configuration(_))));
        assert!(problem_by_name("ZDT1:abc").is_err());
        assert!(problem_by_name("ZDT1:0").is_err());
    }
}
