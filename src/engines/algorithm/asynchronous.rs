use super::{evaluate_objectives, AlgorithmComponents, BaseAlgorithm};
use crate::operators::Fitness;
use crate::problems::Problem;
use crate::types::Solution;
use anyhow::{anyhow, bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

type Completion = (Vec<f64>, Result<Vec<f64>>);

/// Asynchronous steady-state variant.
///
/// Evaluations run on a pool of worker threads fed through a task channel.
/// Every completed evaluation is merged into the population immediately and
/// a new child is bred to keep all workers busy. Completion order depends on
/// thread scheduling, so runs are not reproducible.
pub struct AsynchronousAlgorithm {
    name: String,
    problem: Arc<dyn Problem>,
    components: AlgorithmComponents,
    budget: usize,
    workers: usize,
    evaluations: usize,
    rng: StdRng,
}

impl AsynchronousAlgorithm {
    pub fn new(
        name: &str,
        problem: Arc<dyn Problem>,
        components: AlgorithmComponents,
        budget: usize,
        workers: usize,
        seed: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            problem,
            components,
            budget,
            workers: workers.max(1),
            evaluations: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Feeds the workers and merges completions until the budget is spent.
    /// Owns the task sender so the workers stop once this returns.
    fn coordinate(
        &mut self,
        tasks: Sender<Vec<f64>>,
        completions: &Receiver<Completion>,
    ) -> Result<Vec<Solution>> {
        let bounds = self.problem.bounds();
        let population_size = self.components.population_size.max(1);
        let initial_size = population_size.min(self.budget);

        let mut submitted = 0;
        for variables in self
            .components
            .initial_solutions
            .create(&bounds, initial_size, &mut self.rng)
        {
            tasks
                .send(variables)
                .map_err(|_| anyhow!("evaluation workers stopped"))?;
            submitted += 1;
        }

        let mut population: Vec<Solution> = Vec::with_capacity(population_size + 1);
        let mut fitness: Vec<Fitness> = Vec::new();
        let mut seeded = false;

        while self.evaluations < submitted {
            let (variables, outcome) = completions
                .recv()
                .map_err(|_| anyhow!("evaluation workers stopped"))?;
            let objectives = outcome?;
            self.evaluations += 1;

            let solution = Solution {
                variables,
                objectives,
            };
            self.components.archive(std::slice::from_ref(&solution));

            let incoming = if seeded {
                vec![solution]
            } else {
                population.push(solution);
                if population.len() < initial_size {
                    continue;
                }
                seeded = true;
                Vec::new()
            };

            let (next, next_fitness) = self.components.replacement.replace(
                std::mem::take(&mut population),
                incoming,
                population_size,
            )?;
            population = next;
            fitness = next_fitness;

            while submitted < self.budget && submitted - self.evaluations < self.workers {
                for child in self
                    .components
                    .breed(&population, &fitness, 1, &mut self.rng)?
                {
                    tasks
                        .send(child)
                        .map_err(|_| anyhow!("evaluation workers stopped"))?;
                    submitted += 1;
                }
            }
        }

        Ok(population)
    }
}

impl BaseAlgorithm for AsynchronousAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self) -> Result<Vec<Solution>> {
        if self.budget == 0 {
            bail!("{} cannot run with an evaluation budget of zero", self.name);
        }
        self.evaluations = 0;

        let (task_tx, task_rx) = mpsc::channel::<Vec<f64>>();
        let (done_tx, done_rx) = mpsc::channel::<Completion>();
        let task_rx = Arc::new(Mutex::new(task_rx));
        let problem = Arc::clone(&self.problem);
        let workers = self.workers;

        let population = thread::scope(|scope| {
            for _ in 0..workers {
                let task_rx = Arc::clone(&task_rx);
                let done_tx = done_tx.clone();
                let problem = Arc::clone(&problem);

                scope.spawn(move || loop {
                    let next = match task_rx.lock() {
                        Ok(receiver) => receiver.recv(),
                        Err(_) => break,
                    };
                    let Ok(variables) = next else { break };

                    let outcome = evaluate_objectives(problem.as_ref(), &variables);
                    if done_tx.send((variables, outcome)).is_err() {
                        break;
                    }
                });
            }
            drop(done_tx);

            self.coordinate(task_tx, &done_rx)
        })?;

        log::debug!(
            "{} finished on {} after {} evaluations with {} workers",
            self.name,
            self.problem.name(),
            self.evaluations,
            self.workers
        );
        Ok(self.components.result(population))
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}
