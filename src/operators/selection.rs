use super::traits::{Fitness, Selection};
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::Rng;

/// Tournament selection: pick best of K random candidates
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }
}

impl Selection for TournamentSelection {
    fn name(&self) -> &'static str {
        "tournament"
    }

    fn select(&self, fitness: &[Fitness], count: usize, rng: &mut StdRng) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            bail!("tournament selection on an empty population");
        }

        let mut selected = Vec::with_capacity(count);
        for _ in 0..count {
            let mut best = rng.gen_range(0..fitness.len());
            for _ in 1..self.size {
                let idx = rng.gen_range(0..fitness.len());
                if fitness[idx].is_better_than(&fitness[best]) {
                    best = idx;
                }
            }
            selected.push(best);
        }
        Ok(selected)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RandomSelection;

impl Selection for RandomSelection {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select(&self, fitness: &[Fitness], count: usize, rng: &mut StdRng) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            bail!("random selection on an empty population");
        }
        Ok((0..count).map(|_| rng.gen_range(0..fitness.len())).collect())
    }
}
