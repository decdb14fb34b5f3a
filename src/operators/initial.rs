use super::traits::SolutionsCreation;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct RandomSolutionsCreation;

impl SolutionsCreation for RandomSolutionsCreation {
    fn name(&self) -> &'static str {
        "random"
    }

    fn create(&self, bounds: &[(f64, f64)], count: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
        (0..count)
            .map(|_| {
                bounds
                    .iter()
                    .map(|&(lo, hi)| lo + rng.gen::<f64>() * (hi - lo))
                    .collect()
            })
            .collect()
    }
}

/// Latin hypercube design of `samples` strata per variable. Requests larger
/// than one design are served from further independent designs.
#[derive(Debug, Clone)]
pub struct LatinHypercubeSampling {
    samples: usize,
}

impl LatinHypercubeSampling {
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(1),
        }
    }

    fn design(&self, bounds: &[(f64, f64)], rng: &mut StdRng) -> Vec<Vec<f64>> {
        let n = self.samples;
        let mut points = vec![Vec::with_capacity(bounds.len()); n];
        let mut strata: Vec<usize> = (0..n).collect();

        for &(lo, hi) in bounds {
            strata.shuffle(rng);
            for (point, &stratum) in points.iter_mut().zip(&strata) {
                let position = (stratum as f64 + rng.gen::<f64>()) / n as f64;
                point.push(lo + position * (hi - lo));
            }
        }
        points
    }
}

impl SolutionsCreation for LatinHypercubeSampling {
    fn name(&self) -> &'static str {
        "latinHypercube"
    }

    fn create(&self, bounds: &[(f64, f64)], count: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
        let mut created = Vec::with_capacity(count);
        while created.len() < count {
            let design = self.design(bounds, rng);
            let missing = count - created.len();
            created.extend(design.into_iter().take(missing));
        }
        created
    }
}
