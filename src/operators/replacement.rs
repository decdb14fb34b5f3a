use super::traits::{DensityEstimator, Fitness, Ranking, Replacement};
use crate::types::Solution;
use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// (mu + lambda) survival: fill by rank, break the last front by density
pub struct RankingAndDensityReplacement {
    ranking: Box<dyn Ranking>,
    density: Box<dyn DensityEstimator>,
}

impl RankingAndDensityReplacement {
    pub fn new(ranking: Box<dyn Ranking>, density: Box<dyn DensityEstimator>) -> Self {
        Self { ranking, density }
    }

    /// Rank and density for every member of `solutions`
    pub fn assess(&self, solutions: &[Solution]) -> Vec<Fitness> {
        let objectives: Vec<&[f64]> = solutions.iter().map(|s| s.objectives.as_slice()).collect();
        let ranks = self.ranking.rank(&objectives);

        let mut fitness = vec![Fitness::new(0, 0.0); solutions.len()];
        for (rank, members) in group_by_rank(&ranks) {
            let points: Vec<&[f64]> = members.iter().map(|&i| objectives[i]).collect();
            let density = self.density.estimate(&points);
            for (&index, value) in members.iter().zip(density) {
                fitness[index] = Fitness::new(rank, value);
            }
        }
        fitness
    }
}

fn group_by_rank(ranks: &[usize]) -> BTreeMap<usize, Vec<usize>> {
    let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (index, &rank) in ranks.iter().enumerate() {
        groups.entry(rank).or_default().push(index);
    }
    groups
}

impl Replacement for RankingAndDensityReplacement {
    fn name(&self) -> &'static str {
        "rankingAndDensityEstimator"
    }

    fn replace(
        &self,
        population: Vec<Solution>,
        offspring: Vec<Solution>,
        size: usize,
    ) -> Result<(Vec<Solution>, Vec<Fitness>)> {
        let mut merged = population;
        merged.extend(offspring);

        if let Some(unevaluated) = merged.iter().position(|s| !s.is_evaluated()) {
            bail!("solution {} reached replacement without objectives", unevaluated);
        }

        let objectives: Vec<&[f64]> = merged.iter().map(|s| s.objectives.as_slice()).collect();
        let ranks = self.ranking.rank(&objectives);

        let mut survivors: Vec<usize> = Vec::with_capacity(size);
        for (_, mut front) in group_by_rank(&ranks) {
            if survivors.len() >= size {
                break;
            }
            let room = size - survivors.len();
            if front.len() > room {
                let points: Vec<&[f64]> = front.iter().map(|&i| objectives[i]).collect();
                let density = self.density.estimate(&points);
                let mut order: Vec<usize> = (0..front.len()).collect();
                order.sort_by(|&a, &b| {
                    density[b]
                        .partial_cmp(&density[a])
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                front = order.into_iter().take(room).map(|i| front[i]).collect();
            }
            survivors.extend(front);
        }

        let mut slots: Vec<Option<Solution>> = merged.into_iter().map(Some).collect();
        let next: Vec<Solution> = survivors
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();

        let fitness = self.assess(&next);
        Ok((next, fitness))
    }
}
