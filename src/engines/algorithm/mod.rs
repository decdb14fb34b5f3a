//! Base-level evolutionary algorithms assembled from catalogue operators.

pub mod generational;
pub mod asynchronous;

use crate::operators::{
    Archive, Crossover, Fitness, Mutation, Replacement, Selection, SolutionsCreation,
};
use crate::problems::Problem;
use crate::types::Solution;
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::Rng;

pub use asynchronous::AsynchronousAlgorithm;
pub use generational::GenerationalAlgorithm;

/// A runnable base-level optimizer bound to one problem and one budget
pub trait BaseAlgorithm: Send {
    fn name(&self) -> &str;

    /// Run to budget exhaustion and return the result population
    fn run(&mut self) -> Result<Vec<Solution>>;

    /// Problem evaluations performed so far
    fn evaluations(&self) -> usize;
}

/// Operators and sizes of one configured algorithm instance
pub struct AlgorithmComponents {
    pub initial_solutions: Box<dyn SolutionsCreation>,
    pub crossover: Box<dyn Crossover>,
    pub mutation: Box<dyn Mutation>,
    pub selection: Box<dyn Selection>,
    pub replacement: Box<dyn Replacement>,
    pub archive: Option<Box<dyn Archive>>,
    pub population_size: usize,
    pub offspring_population_size: usize,
}

impl AlgorithmComponents {
    /// Produce `count` offspring variable vectors from the ranked population
    pub(crate) fn breed(
        &self,
        population: &[Solution],
        fitness: &[Fitness],
        count: usize,
        rng: &mut StdRng,
    ) -> Result<Vec<Vec<f64>>> {
        let mut offspring = Vec::with_capacity(count);

        while offspring.len() < count {
            let mates = self
                .selection
                .select(fitness, self.crossover.number_of_parents(), rng)?;
            let parents: Vec<&[f64]> = mates
                .iter()
                .map(|&i| population[i].variables.as_slice())
                .collect();

            let children = if rng.gen::<f64>() < self.crossover.probability() {
                self.crossover.execute(&parents, rng)?
            } else {
                parents.iter().map(|p| p.to_vec()).collect()
            };

            for mut child in children {
                if offspring.len() == count {
                    break;
                }
                self.mutation.execute(&mut child, rng)?;
                offspring.push(child);
            }
        }

        Ok(offspring)
    }

    pub(crate) fn archive(&mut self, solutions: &[Solution]) {
        if let Some(archive) = self.archive.as_mut() {
            for solution in solutions {
                archive.add(solution.clone());
            }
        }
    }

    /// The archive contents when an archive is configured, else the population
    pub(crate) fn result(&self, population: Vec<Solution>) -> Vec<Solution> {
        match &self.archive {
            Some(archive) => archive.solutions().to_vec(),
            None => population,
        }
    }
}

/// Evaluate one variable vector, rejecting malformed or non-finite objectives
pub fn evaluate_objectives(problem: &dyn Problem, variables: &[f64]) -> Result<Vec<f64>> {
    let objectives = problem.evaluate(variables)?;

    if objectives.len() != problem.number_of_objectives() {
        bail!(
            "{} returned {} objectives, expected {}",
            problem.name(),
            objectives.len(),
            problem.number_of_objectives()
        );
    }
    if let Some(value) = objectives.iter().find(|v| !v.is_finite()) {
        bail!("{} produced non-finite objective {}", problem.name(), value);
    }

    Ok(objectives)
}

pub(crate) fn evaluate_solution(problem: &dyn Problem, variables: Vec<f64>) -> Result<Solution> {
    let objectives = evaluate_objectives(problem, &variables)?;
    Ok(Solution {
        variables,
        objectives,
    })
}
