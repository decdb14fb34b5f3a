use super::{evaluate_solution, AlgorithmComponents, BaseAlgorithm};
use crate::problems::Problem;
use crate::types::Solution;
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Generational (mu + lambda) algorithm of the NSGA-II family.
/// The last offspring batch is truncated so the budget is never exceeded.
pub struct GenerationalAlgorithm {
    name: String,
    problem: Arc<dyn Problem>,
    components: AlgorithmComponents,
    budget: usize,
    evaluations: usize,
    rng: StdRng,
}

impl GenerationalAlgorithm {
    pub fn new(
        name: &str,
        problem: Arc<dyn Problem>,
        components: AlgorithmComponents,
        budget: usize,
        seed: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            problem,
            components,
            budget,
            evaluations: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn evaluate_all(&mut self, batch: Vec<Vec<f64>>) -> Result<Vec<Solution>> {
        let mut evaluated = Vec::with_capacity(batch.len());
        for variables in batch {
            evaluated.push(evaluate_solution(self.problem.as_ref(), variables)?);
            self.evaluations += 1;
        }
        self.components.archive(&evaluated);
        Ok(evaluated)
    }
}

impl BaseAlgorithm for GenerationalAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self) -> Result<Vec<Solution>> {
        if self.budget == 0 {
            bail!("{} cannot run with an evaluation budget of zero", self.name);
        }
        self.evaluations = 0;

        let bounds = self.problem.bounds();
        let population_size = self.components.population_size.max(1);
        let initial = self.components.initial_solutions.create(
            &bounds,
            population_size.min(self.budget),
            &mut self.rng,
        );
        let initial = self.evaluate_all(initial)?;

        let (mut population, mut fitness) =
            self.components
                .replacement
                .replace(initial, Vec::new(), population_size)?;

        let offspring_size = self.components.offspring_population_size.max(1);
        while self.evaluations < self.budget {
            let batch = offspring_size.min(self.budget - self.evaluations);
            let children =
                self.components
                    .breed(&population, &fitness, batch, &mut self.rng)?;
            let offspring = self.evaluate_all(children)?;

            let (next, next_fitness) =
                self.components
                    .replacement
                    .replace(population, offspring, population_size)?;
            population = next;
            fitness = next_fitness;
        }

        log::debug!(
            "{} finished on {} after {} evaluations",
            self.name,
            self.problem.name(),
            self.evaluations
        );
        Ok(self.components.result(population))
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::algorithm::test_support::nsgaii_components;
    use crate::operators::UnboundedArchive;
    use crate::operators::pareto::dominates;
    use crate::problems::Zdt1;

    #[test]
    fn test_respects_budget_exactly() {
        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(6));
        let components = nsgaii_components(problem.as_ref(), 10);
        let mut algorithm = GenerationalAlgorithm::new("NSGAII", problem, components, 95, 1);

        let result = algorithm.run().unwrap();
        assert_eq!(algorithm.evaluations(), 95);
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(6));
        let run = |seed| {
            let components = nsgaii_components(problem.as_ref(), 8);
            GenerationalAlgorithm::new("NSGAII", Arc::clone(&problem), components, 200, seed)
                .run()
                .unwrap()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_archive_result_is_non_dominated() {
        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(6));
        let mut components = nsgaii_components(problem.as_ref(), 10);
        components.archive = Some(Box::new(UnboundedArchive::new()));

        let result = GenerationalAlgorithm::new("NSGAII", problem, components, 300, 3)
            .run()
            .unwrap();
        for a in &result {
            for b in &result {
                assert!(!dominates(&a.objectives, &b.objectives));
            }
        }
    }

    #[test]
    fn test_zero_budget_fails() {
        let problem: Arc<dyn Problem> = Arc::new(Zdt1::new(3));
        let components = nsgaii_components(problem.as_ref(), 4);
        assert!(GenerationalAlgorithm::new("NSGAII", problem, components, 0, 1)
            .run()
            .is_err());
    }
}
