use super::Problem;
use anyhow::{bail, Result};
use std::f64::consts::FRAC_PI_2;

/// DTLZ2: spherical front, `sum(f_i^2) = 1` on the optimum
#[derive(Debug, Clone)]
pub struct Dtlz2 {
    variables: usize,
    objectives: usize,
}

impl Dtlz2 {
    pub fn new(variables: usize, objectives: usize) -> Self {
        Self {
            variables,
            objectives,
        }
    }
}

impl Problem for Dtlz2 {
    fn name(&self) -> &str {
        "DTLZ2"
    }

    fn number_of_variables(&self) -> usize {
        self.variables
    }

    fn number_of_objectives(&self) -> usize {
        self.objectives
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.variables]
    }

    fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>> {
        let m = self.objectives;
        if m < 2 || self.variables < m || x.len() != self.variables {
            bail!(
                "DTLZ2 with {} objectives expects {} variables (>= objectives), got {}",
                m,
                self.variables,
                x.len()
            );
        }

        let g: f64 = x[m - 1..].iter().map(|xi| (xi - 0.5).powi(2)).sum();

        let mut f = vec![1.0 + g; m];
        for (i, fi) in f.iter_mut().enumerate() {
            for xj in &x[..m - 1 - i] {
                *fi *= (xj * FRAC_PI_2).cos();
            }
            if i > 0 {
                *fi *= (x[m - 1 - i] * FRAC_PI_2).sin();
            }
        }
        Ok(f)
    }
}
