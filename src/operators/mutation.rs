use super::traits::Mutation;
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::Rng;

fn check_length(name: &str, variables: &[f64], bounds: &[(f64, f64)]) -> Result<()> {
    if variables.len() != bounds.len() {
        bail!(
            "{} expects {} variables, got {}",
            name,
            bounds.len(),
            variables.len()
        );
    }
    Ok(())
}

/// Per-variable mutation probability derived from a factor: `factor / n`, capped at 1
pub fn probability_from_factor(factor: f64, number_of_variables: usize) -> f64 {
    if number_of_variables == 0 {
        return 0.0;
    }
    (factor / number_of_variables as f64).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct PolynomialMutation {
    probability: f64,
    distribution_index: f64,
    bounds: Vec<(f64, f64)>,
}

impl PolynomialMutation {
    pub fn new(probability: f64, distribution_index: f64, bounds: Vec<(f64, f64)>) -> Self {
        Self {
            probability,
            distribution_index,
            bounds,
        }
    }
}

impl Mutation for PolynomialMutation {
    fn name(&self) -> &'static str {
        "polynomial"
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn execute(&self, variables: &mut [f64], rng: &mut StdRng) -> Result<()> {
        check_length(self.name(), variables, &self.bounds)?;
        let eta = self.distribution_index;

        for (x, &(lo, hi)) in variables.iter_mut().zip(&self.bounds) {
            if rng.gen::<f64>() >= self.probability || hi <= lo {
                continue;
            }

            let y = *x;
            let delta1 = (y - lo) / (hi - lo);
            let delta2 = (hi - y) / (hi - lo);

            let u: f64 = rng.gen();
            let deltaq = if u < 0.5 {
                let xy = 1.0 - delta1;
                let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
                val.powf(1.0 / (eta + 1.0)) - 1.0
            } else {
                let xy = 1.0 - delta2;
                let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
                1.0 - val.powf(1.0 / (eta + 1.0))
            };

            *x = (y + deltaq * (hi - lo)).clamp(lo, hi);
        }
        Ok(())
    }
}

/// Uniform perturbation of `perturbation * range` centred on the current value
#[derive(Debug, Clone)]
pub struct UniformMutation {
    probability: f64,
    perturbation: f64,
    bounds: Vec<(f64, f64)>,
}

impl UniformMutation {
    pub fn new(probability: f64, perturbation: f64, bounds: Vec<(f64, f64)>) -> Self {
        Self {
            probability,
            perturbation,
            bounds,
        }
    }
}

impl Mutation for UniformMutation {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn execute(&self, variables: &mut [f64], rng: &mut StdRng) -> Result<()> {
        check_length(self.name(), variables, &self.bounds)?;

        for (x, &(lo, hi)) in variables.iter_mut().zip(&self.bounds) {
            if rng.gen::<f64>() >= self.probability {
                continue;
            }
            let shift = (rng.gen::<f64>() - 0.5) * self.perturbation * (hi - lo);
            *x = (*x + shift).clamp(lo, hi);
        }
        Ok(())
    }
}
