use crate::types::Solution;
use anyhow::Result;
use rand::rngs::StdRng;

/// Rank and density of a population member after replacement.
/// Lower rank is better; on equal rank, higher density value wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitness {
    pub rank: usize,
    pub density: f64,
}

impl Fitness {
    pub fn new(rank: usize, density: f64) -> Self {
        Self { rank, density }
    }

    /// Crowded comparison
    pub fn is_better_than(&self, other: &Fitness) -> bool {
        self.rank < other.rank || (self.rank == other.rank && self.density > other.density)
    }
}

pub trait Crossover: Send + Sync {
    fn name(&self) -> &'static str;

    /// Probability that a mating is recombined at all
    fn probability(&self) -> f64;

    fn number_of_parents(&self) -> usize {
        2
    }

    fn execute(&self, parents: &[&[f64]], rng: &mut StdRng) -> Result<Vec<Vec<f64>>>;
}

pub trait Mutation: Send + Sync {
    fn name(&self) -> &'static str;

    fn probability(&self) -> f64;

    fn execute(&self, variables: &mut [f64], rng: &mut StdRng) -> Result<()>;
}

/// Picks `count` mating indices from the ranked population
pub trait Selection: Send + Sync {
    fn name(&self) -> &'static str;

    fn select(&self, fitness: &[Fitness], count: usize, rng: &mut StdRng) -> Result<Vec<usize>>;
}

/// Assigns a rank (0 = best) to every objective vector
pub trait Ranking: Send + Sync {
    fn name(&self) -> &'static str;

    fn rank(&self, objectives: &[&[f64]]) -> Vec<usize>;
}

/// Diversity value per point; larger means more isolated
pub trait DensityEstimator: Send + Sync {
    fn name(&self) -> &'static str;

    fn estimate(&self, objectives: &[&[f64]]) -> Vec<f64>;
}

pub trait Replacement: Send + Sync {
    fn name(&self) -> &'static str;

    /// Merge parents and offspring down to `size` survivors, returned with their fitness
    fn replace(
        &self,
        population: Vec<Solution>,
        offspring: Vec<Solution>,
        size: usize,
    ) -> Result<(Vec<Solution>, Vec<Fitness>)>;
}

/// Result container for non-dominated solutions found during a run
pub trait Archive: Send {
    fn name(&self) -> &'static str;

    /// Returns whether the solution entered the archive
    fn add(&mut self, solution: Solution) -> bool;

    fn solutions(&self) -> &[Solution];

    fn capacity(&self) -> Option<usize>;
}

/// Creates the initial variable vectors within bounds
pub trait SolutionsCreation: Send + Sync {
    fn name(&self) -> &'static str;

    fn create(&self, bounds: &[(f64, f64)], count: usize, rng: &mut StdRng) -> Vec<Vec<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crowded_comparison() {
        let front = Fitness::new(0, 0.5);
        let back = Fitness::new(1, f64::INFINITY);
        assert!(front.is_better_than(&back));
        assert!(!back.is_better_than(&front));

        let isolated = Fitness::new(0, 2.0);
        assert!(isolated.is_better_than(&front));
        assert!(!front.is_better_than(&front));
    }
}
