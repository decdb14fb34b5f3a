use super::traits::Crossover;
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::Rng;

fn check_parents(name: &str, parents: &[&[f64]], bounds: &[(f64, f64)]) -> Result<()> {
    if parents.len() != 2 {
        bail!("{} needs two parents, got {}", name, parents.len());
    }
    if parents.iter().any(|p| p.len() != bounds.len()) {
        bail!(
            "{} parents must have {} variables, got {} and {}",
            name,
            bounds.len(),
            parents[0].len(),
            parents[1].len()
        );
    }
    Ok(())
}

/// Simulated binary crossover
#[derive(Debug, Clone)]
pub struct SbxCrossover {
    probability: f64,
    distribution_index: f64,
    bounds: Vec<(f64, f64)>,
}

impl SbxCrossover {
    pub fn new(probability: f64, distribution_index: f64, bounds: Vec<(f64, f64)>) -> Self {
        Self {
            probability,
            distribution_index,
            bounds,
        }
    }
}

impl Crossover for SbxCrossover {
    fn name(&self) -> &'static str {
        "SBX"
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn execute(&self, parents: &[&[f64]], rng: &mut StdRng) -> Result<Vec<Vec<f64>>> {
        check_parents(self.name(), parents, &self.bounds)?;
        let (p1, p2) = (parents[0], parents[1]);
        let mut c1 = p1.to_vec();
        let mut c2 = p2.to_vec();
        let eta = self.distribution_index;

        for (i, &(lo, hi)) in self.bounds.iter().enumerate() {
            if rng.gen::<f64>() > 0.5 {
                continue;
            }

            let y1 = p1[i].min(p2[i]);
            let y2 = p1[i].max(p2[i]);
            if (y2 - y1).abs() < 1e-10 {
                continue;
            }

            let beta = 1.0 + (2.0 * (y1 - lo) / (y2 - y1));
            let alpha = 2.0 - beta.powf(-(eta + 1.0));
            let u: f64 = rng.gen();
            let betaq = if u <= 1.0 / alpha {
                (u * alpha).powf(1.0 / (eta + 1.0))
            } else {
                (1.0 / (2.0 - u * alpha)).powf(1.0 / (eta + 1.0))
            };

            let low = (0.5 * ((y1 + y2) - betaq * (y2 - y1))).clamp(lo, hi);
            let high = (0.5 * ((y1 + y2) + betaq * (y2 - y1))).clamp(lo, hi);

            if rng.gen::<bool>() {
                c1[i] = high;
                c2[i] = low;
            } else {
                c1[i] = low;
                c2[i] = high;
            }
        }

        Ok(vec![c1, c2])
    }
}

/// Blend crossover: children are uniform in the parents' interval widened by alpha
#[derive(Debug, Clone)]
pub struct BlxAlphaCrossover {
    probability: f64,
    alpha: f64,
    bounds: Vec<(f64, f64)>,
}

impl BlxAlphaCrossover {
    pub fn new(probability: f64, alpha: f64, bounds: Vec<(f64, f64)>) -> Self {
        Self {
            probability,
            alpha,
            bounds,
        }
    }
}

impl Crossover for BlxAlphaCrossover {
    fn name(&self) -> &'static str {
        "BLX_ALPHA"
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn execute(&self, parents: &[&[f64]], rng: &mut StdRng) -> Result<Vec<Vec<f64>>> {
        check_parents(self.name(), parents, &self.bounds)?;
        let mut children = vec![Vec::with_capacity(self.bounds.len()); 2];

        for (i, &(lo, hi)) in self.bounds.iter().enumerate() {
            let cmin = parents[0][i].min(parents[1][i]);
            let cmax = parents[0][i].max(parents[1][i]);
            let spread = self.alpha * (cmax - cmin);

            for child in children.iter_mut() {
                let value = cmin - spread + rng.gen::<f64>() * (cmax - cmin + 2.0 * spread);
                child.push(value.clamp(lo, hi));
            }
        }

        Ok(children)
    }
}

/// Convex combination of both parents with one random weight per mating
#[derive(Debug, Clone)]
pub struct WholeArithmeticCrossover {
    probability: f64,
    bounds: Vec<(f64, f64)>,
}

impl WholeArithmeticCrossover {
    pub fn new(probability: f64, bounds: Vec<(f64, f64)>) -> Self {
        Self { probability, bounds }
    }
}

impl Crossover for WholeArithmeticCrossover {
    fn name(&self) -> &'static str {
        "wholeArithmetic"
    }

    fn probability(&self) -> f64 {
        self.probability
    }

    fn execute(&self, parents: &[&[f64]], rng: &mut StdRng) -> Result<Vec<Vec<f64>>> {
        check_parents(self.name(), parents, &self.bounds)?;
        let weight: f64 = rng.gen();

        let blend = |a: &[f64], b: &[f64]| -> Vec<f64> {
            self.bounds
                .iter()
                .enumerate()
                .map(|(i, &(lo, hi))| (weight * a[i] + (1.0 - weight) * b[i]).clamp(lo, hi))
                .collect()
        };

        Ok(vec![
            blend(parents[0], parents[1]),
            blend(parents[1], parents[0]),
        ])
    }
}
