use crate::engines::algorithm::AlgorithmComponents;
use crate::engines::evaluation::{ConfigurationReport, EvaluationHarness, MetaOptimizationProblem};
use crate::error::{MetaError, Result};
use crate::operators::mutation::probability_from_factor;
use crate::operators::{
    CrowdingDistance, DominanceRanking, Fitness, PolynomialMutation, RandomSolutionsCreation,
    RankingAndDensityReplacement, Replacement, SbxCrossover, TournamentSelection,
};
use crate::types::Solution;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct MetaOptimizerSettings {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_probability: f64,
    pub crossover_distribution_index: f64,
    pub mutation_probability_factor: f64,
    pub mutation_distribution_index: f64,
    pub seed: Option<u64>,
}

impl Default for MetaOptimizerSettings {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 10,
            crossover_probability: 0.9,
            crossover_distribution_index: 20.0,
            mutation_probability_factor: 1.0,
            mutation_distribution_index: 20.0,
            seed: None,
        }
    }
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_objectives: &[f64], front_size: usize);
    fn on_batch_evaluated(&mut self, evaluated: usize, total: usize);
}

impl<C: ProgressCallback> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation)
    }

    fn on_generation_complete(&mut self, generation: usize, best_objectives: &[f64], front_size: usize) {
        (**self).on_generation_complete(generation, best_objectives, front_size)
    }

    fn on_batch_evaluated(&mut self, evaluated: usize, total: usize) {
        (**self).on_batch_evaluated(evaluated, total)
    }
}

/// NSGA-II over the unit hypercube of configuration vectors. Every batch of
/// candidates is scored through the evaluation harness.
pub struct MetaOptimizer {
    settings: MetaOptimizerSettings,
    harness: EvaluationHarness<MetaOptimizationProblem>,
    rng: StdRng,
}

impl MetaOptimizer {
    pub fn new(
        settings: MetaOptimizerSettings,
        harness: EvaluationHarness<MetaOptimizationProblem>,
    ) -> Result<Self> {
        if settings.population_size < 2 {
            return Err(MetaError::Configuration(
                "outer population size must be at least 2".to_string(),
            ));
        }

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            settings,
            harness,
            rng,
        })
    }

    pub fn harness(&self) -> &EvaluationHarness<MetaOptimizationProblem> {
        &self.harness
    }

    fn components(&self) -> AlgorithmComponents {
        let n = self.harness.factory().number_of_variables();
        let bounds = vec![(0.0, 1.0); n];
        let settings = &self.settings;

        AlgorithmComponents {
            initial_solutions: Box::new(RandomSolutionsCreation),
            crossover: Box::new(SbxCrossover::new(
                settings.crossover_probability,
                settings.crossover_distribution_index,
                bounds.clone(),
            )),
            mutation: Box::new(PolynomialMutation::new(
                probability_from_factor(settings.mutation_probability_factor, n),
                settings.mutation_distribution_index,
                bounds,
            )),
            selection: Box::new(TournamentSelection::new(2)),
            replacement: Box::new(RankingAndDensityReplacement::new(
                Box::new(DominanceRanking),
                Box::new(CrowdingDistance),
            )),
            archive: None,
            population_size: settings.population_size,
            offspring_population_size: settings.population_size,
        }
    }

    fn evaluate<C: ProgressCallback>(
        &self,
        candidates: Vec<Vec<f64>>,
        callback: &mut C,
    ) -> Result<Vec<Solution>> {
        let objectives = self.harness.evaluate_batch(&candidates)?;
        callback.on_batch_evaluated(candidates.len(), self.harness.evaluations());

        Ok(candidates
            .into_iter()
            .zip(objectives)
            .map(|(variables, objectives)| Solution {
                variables,
                objectives,
            })
            .collect())
    }

    /// Run the outer search and return its first non-dominated front
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<Vec<Solution>> {
        let components = self.components();
        let size = self.settings.population_size;

        let initial: Vec<Vec<f64>> = (0..size)
            .map(|_| self.harness.factory().create_candidate(&mut self.rng))
            .collect();
        let initial = self.evaluate(initial, &mut callback)?;

        let (mut population, mut fitness) = components
            .replacement
            .replace(initial, Vec::new(), size)
            .map_err(|e| MetaError::Computation(e.to_string()))?;

        for generation in 0..self.settings.generations {
            callback.on_generation_start(generation);

            let children = components
                .breed(&population, &fitness, size, &mut self.rng)
                .map_err(|e| MetaError::Computation(e.to_string()))?;
            let offspring = self.evaluate(children, &mut callback)?;

            let (next, next_fitness) = components
                .replacement
                .replace(population, offspring, size)
                .map_err(|e| MetaError::Computation(e.to_string()))?;
            population = next;
            fitness = next_fitness;

            let front_size = fitness.iter().filter(|f| f.rank == 0).count();
            callback.on_generation_complete(generation, &best_objectives(&population), front_size);
        }

        Ok(first_front(population, &fitness))
    }

    /// Decode each solution into an exportable report
    pub fn reports(&self, front: &[Solution]) -> Result<Vec<ConfigurationReport>> {
        let mut decoder = self.harness.factory().make_evaluator();
        let names = decoder.objective_names();
        let space = decoder.space().name().to_string();

        front
            .iter()
            .map(|solution| {
                let configuration = decoder.decode(&solution.variables)?;
                Ok(ConfigurationReport::new(
                    &space,
                    &solution.variables,
                    &configuration,
                    &names,
                    &solution.objectives,
                ))
            })
            .collect()
    }
}

/// Per-objective minimum over the population
fn best_objectives(population: &[Solution]) -> Vec<f64> {
    let Some(first) = population.first() else {
        return Vec::new();
    };
    let mut best = first.objectives.clone();
    for solution in &population[1..] {
        for (b, v) in best.iter_mut().zip(&solution.objectives) {
            *b = b.min(*v);
        }
    }
    best
}

fn first_front(population: Vec<Solution>, fitness: &[Fitness]) -> Vec<Solution> {
    population
        .into_iter()
        .zip(fitness)
        .filter(|(_, f)| f.rank == 0)
        .map(|(solution, _)| solution)
        .collect()
}
